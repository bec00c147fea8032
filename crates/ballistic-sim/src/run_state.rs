//! Run state value object — score, health, wave progress.
//!
//! Kept beside the ECS world rather than in it, so the state machine can be
//! updated by pure-ish functions and inspected directly in tests.

use ballistic_core::constants::STARTING_HEALTH;

/// Mutable per-run state consumed and produced by the systems each tick.
#[derive(Debug, Clone)]
pub struct RunState {
    /// Non-decreasing within a run; resets to 0 only on restart.
    pub score: u32,
    /// Current wave number, starting at 1.
    pub wave: u32,
    /// Remaining player health.
    pub health: i32,
    /// Health at run start. Reset to the same fixed value every run;
    /// there is deliberately no cross-run progression.
    pub max_health: i32,
    /// True during the post-damage grace window.
    pub invulnerable: bool,
    /// Enemies spawned so far in the current wave.
    pub enemies_spawned: u32,
    /// Enemies resolved (killed or reached the turret) in the current wave.
    pub enemies_killed: u32,
    /// Total enemies the current wave will spawn.
    pub total_wave_enemies: u32,
}

impl RunState {
    /// Fresh state for a new run.
    pub fn new_run() -> Self {
        Self {
            score: 0,
            wave: 1,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            invulnerable: false,
            enemies_spawned: 0,
            enemies_killed: 0,
            total_wave_enemies: 0,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new_run()
    }
}
