//! Core types and definitions for the BALLISTIC simulation.
//!
//! This crate defines the vocabulary shared across the workspace:
//! components, commands, state snapshots, events, and constants.
//! It has no dependency on the engine or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod math;
pub mod state;
pub mod types;
