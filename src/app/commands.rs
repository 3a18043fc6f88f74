//! Inbound commands to the application service.
//!
//! These are the actions the remote control API can request.  The
//! [`AppService`](super::service::AppService) applies them inline with the
//! control loop, so they never interleave with a button-driven change.

/// Relative threshold step direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    Increase,
    Decrease,
}

impl Adjust {
    /// Parse the `action` query value.  Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "increase" => Some(Self::Increase),
            "decrease" => Some(Self::Decrease),
            _ => None,
        }
    }
}

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Step the threshold by one.
    AdjustThreshold(Adjust),

    /// Set the threshold outright (clamped to 0–100).
    SetThreshold(i32),

    /// Flip Manual ↔ Remote and show the mode banner.
    ToggleMode,
}
