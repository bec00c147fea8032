//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Continuous aim update (pointer position). Last write before a tick
    /// wins; non-finite coordinates are ignored.
    SetAimTarget { x: f64, y: f64 },
    /// Fire intent held while true, subject to the fire-rate cooldown.
    SetFiring { firing: bool },
    /// Restart after game over. Ignored in any other phase.
    Restart,
    /// Viewport resize from the host canvas. Moves the defended center.
    ResizeViewport { width: f64, height: f64 },
}
