//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::EnemyKind;

/// Stable per-run enemy identity, assigned in spawn order.
///
/// Used instead of raw `hecs::Entity` ids in events and snapshots so the
/// presentation layer sees monotonically increasing ids and collision
/// evaluation has a deterministic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// Enemy combat state. Kind, max health, speed, and points are fixed at
/// spawn; health only decreases.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Current health. The enemy is destroyed on the tick this reaches 0.
    pub health: i32,
    /// Health at spawn, constant per kind.
    pub max_health: i32,
    /// Movement speed toward the defended center (units per tick).
    pub speed: f64,
    /// Score reward when destroyed by a bullet.
    pub points: u32,
    /// Facing angle (radians), derived each tick from the bearing to center.
    pub facing: f64,
}

/// Marks an entity as a bullet; the payload is its fire order, which fixes
/// the collision evaluation order. Position and Velocity carry its motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Bullet(pub u32);

/// The singleton turret at the defended center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Turret {
    /// Current barrel rotation (radians), smoothed toward the aim target.
    pub rotation: f64,
    /// Tick of the last successful fire, for the cooldown gate.
    pub last_fire_tick: Option<u64>,
}
