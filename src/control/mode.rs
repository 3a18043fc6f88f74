//! Manual/Remote operating mode.
//!
//! The mode selects which control path owns the relay: the local decision
//! cycle (Manual) or the most recent remote status evaluation (Remote).
//! It only changes through [`ModeController::toggle`].

use log::info;
use serde::Serialize;

use crate::app::ports::DisplayPort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperatingMode {
    Manual,
    Remote,
}

impl OperatingMode {
    /// Banner text shown on entry.
    pub fn label(self) -> &'static str {
        match self {
            Self::Manual => "Manual Mode",
            Self::Remote => "Remote Mode",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Manual => Self::Remote,
            Self::Remote => Self::Manual,
        }
    }
}

pub struct ModeController {
    mode: OperatingMode,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// Boots in Manual.
    pub fn new() -> Self {
        Self {
            mode: OperatingMode::Manual,
        }
    }

    pub fn current(&self) -> OperatingMode {
        self.mode
    }

    /// Flip the mode and put its label on the display.
    pub fn toggle(&mut self, display: &mut impl DisplayPort) -> OperatingMode {
        self.mode = self.mode.flipped();
        display.clear();
        display.show_line(0, self.mode.label());
        info!("Operating mode -> {:?}", self.mode);
        self.mode
    }
}
