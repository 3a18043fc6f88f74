//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port whenever something
//! observable changes.  Adapters decide where they go.

use crate::control::mode::OperatingMode;
use crate::fsm::MenuState;
use crate::sensors::normalizer::MoisturePercent;

/// Which path changed the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    Buttons,
    Remote,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries loaded threshold and boot mode).
    Started { threshold: u8, mode: OperatingMode },

    /// Threshold value moved.
    ThresholdChanged {
        from: u8,
        to: u8,
        source: ChangeSource,
    },

    /// Menu toggled between Inactive and Editing.
    MenuChanged { from: MenuState, to: MenuState },

    /// Operating mode toggled.
    ModeChanged(OperatingMode),

    /// Relay output changed, with the mode whose path drove it.
    RelayChanged { on: bool, mode: OperatingMode },

    /// Dry-soil alarm changed.
    AlarmChanged(bool),

    /// A fresh moisture sample.
    Reading { raw: u16, moisture: MoisturePercent },
}
