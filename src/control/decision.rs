//! Irrigation decision engine.
//!
//! Pure function of (moisture, threshold, mode).  Applying the result to
//! the relay and buzzer is the caller's job, and only from the control
//! path that matches the current mode.

use serde::Serialize;

use super::mode::OperatingMode;
use crate::sensors::normalizer::MoisturePercent;

/// Fixed critical-dryness level for the alarm, independent of the threshold.
pub const CRITICAL_MOISTURE_PERCENT: MoisturePercent = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusLabel {
    IrrigatingManual,
    IdleManual,
    IrrigatingRemote,
    IdleRemote,
}

impl StatusLabel {
    pub fn from_parts(relay_on: bool, mode: OperatingMode) -> Self {
        match (relay_on, mode) {
            (true, OperatingMode::Manual) => Self::IrrigatingManual,
            (false, OperatingMode::Manual) => Self::IdleManual,
            (true, OperatingMode::Remote) => Self::IrrigatingRemote,
            (false, OperatingMode::Remote) => Self::IdleRemote,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IrrigatingManual => "Irrigating (Manual)",
            Self::IdleManual => "Idle (Manual)",
            Self::IrrigatingRemote => "Irrigating (Remote)",
            Self::IdleRemote => "Idle (Remote)",
        }
    }
}

impl core::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrrigationDecision {
    pub relay_on: bool,
    pub alarm_on: bool,
    pub status: StatusLabel,
}

/// Water strictly below the threshold; alarm strictly below 20 %.
pub fn decide(
    moisture: MoisturePercent,
    threshold: u8,
    mode: OperatingMode,
) -> IrrigationDecision {
    let relay_on = moisture < threshold;
    IrrigationDecision {
        relay_on,
        alarm_on: moisture < CRITICAL_MOISTURE_PERCENT,
        status: StatusLabel::from_parts(relay_on, mode),
    }
}
