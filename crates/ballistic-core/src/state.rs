//! Run state snapshot — the complete visible state sent to the
//! presentation layer each tick.

use serde::{Deserialize, Serialize};

use crate::components::EnemyId;
use crate::enums::{EnemyKind, RunPhase};
use crate::events::SimEvent;
use crate::types::{Position, SimTime, Velocity, Viewport};

/// Complete run state broadcast after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub time: SimTime,
    pub phase: RunPhase,
    pub score: u32,
    pub wave: u32,
    pub health: i32,
    pub max_health: i32,
    pub invulnerable: bool,
    /// Current viewport; the defended center is its midpoint.
    pub viewport: Viewport,
    pub wave_progress: WaveProgressView,
    pub turret: TurretView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    /// Events that occurred during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Spawn/kill counters for the current wave.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WaveProgressView {
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    pub total_wave_enemies: u32,
}

/// Turret pose for display.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TurretView {
    pub position: Position,
    /// Barrel rotation (radians).
    pub rotation: f64,
}

/// A live enemy for display, in spawn-id order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: i32,
    pub max_health: i32,
    /// Facing angle (radians) for sprite orientation.
    pub facing: f64,
}

/// A live bullet for display, in fire order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub velocity: Velocity,
}
