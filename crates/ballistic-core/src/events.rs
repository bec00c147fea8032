//! Events emitted by the simulation for the presentation layer.
//!
//! Each tick's events ride on the snapshot; the renderer turns them into
//! particles, flashes, popups, and sounds.

use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::enums::EnemyKind;
use crate::types::Position;

/// Discrete simulation events, in emission order within a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// An enemy entered the world at a viewport edge.
    EnemySpawned {
        enemy_id: EnemyId,
        kind: EnemyKind,
        position: Position,
    },
    /// A bullet struck an enemy without destroying it.
    EnemyHit {
        enemy_id: EnemyId,
        position: Position,
        kind: EnemyKind,
    },
    /// A bullet destroyed an enemy; `points` were added to the score.
    EnemyKilled {
        enemy_id: EnemyId,
        position: Position,
        kind: EnemyKind,
        points: u32,
    },
    /// An enemy reached the defended center and was removed (no score).
    EnemyReachedTurret { position: Position, kind: EnemyKind },
    /// The player took damage; `health` is the new value.
    TurretDamaged { health: i32 },
    /// All enemies of `wave` resolved; `bonus` added to the score.
    WaveCompleted { wave: u32, bonus: u32 },
    /// Health reached zero. Terminal until restart.
    GameOver { final_score: u32, wave_reached: u32 },
    /// A bullet left the muzzle.
    Fired { origin: Position, direction: f64 },
}
