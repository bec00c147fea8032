//! Headless simulation engine for BALLISTIC.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems in a fixed per-tick order, and produces `RunSnapshot`s.
//! No rendering or input dependency, enabling deterministic testing.

pub mod engine;
pub mod run_state;
pub mod systems;
pub mod timers;
pub mod world_setup;

#[cfg(test)]
mod tests;
