//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Enemy archetype. Immutable after spawn; determines health, speed,
/// and point value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Tank,
    Elite,
}

/// Run phase (top-level state machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Pre-first-wave delay. The turret is live but no enemies exist yet.
    #[default]
    Intro,
    /// Spawning and combat ongoing.
    WaveActive,
    /// All wave enemies resolved; bonus awarded, brief pause before the next.
    WaveClear,
    /// Terminal until an explicit restart.
    GameOver,
}
