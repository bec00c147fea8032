//! Simulation systems, run in a fixed order each tick:
//! aiming -> fire -> movement -> collision -> wave completion -> snapshot.

pub mod aiming;
pub mod collision;
pub mod movement;
pub mod snapshot;
pub mod wave_director;
