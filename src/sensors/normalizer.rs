//! Raw ADC → moisture percentage.
//!
//! System-wide, a [`MoisturePercent`] is *wetness*: higher = wetter.  Probes
//! disagree on direction (capacitive probes read higher when dry), so the
//! normalizer carries a [`Polarity`] and inverts when needed.  Out-of-range
//! raw values are clamped, never rejected.

use serde::{Deserialize, Serialize};

/// Wetness percentage, always in `0..=100`.
pub type MoisturePercent = u8;

/// Which raw direction corresponds to wetter soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Raw value rises with wetness (resistive probes, reference board).
    WetHigh,
    /// Raw value rises with dryness (most capacitive probes), inverted.
    DryHigh,
}

#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    raw_max: u16,
    polarity: Polarity,
}

impl Normalizer {
    pub fn new(raw_max: u16, polarity: Polarity) -> Self {
        Self { raw_max, polarity }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Linearly rescale `raw` from `0..=raw_max` to `0..=100`.
    ///
    /// Integer truncation matches the classic Arduino `map()` so readings
    /// line up with previously deployed units.
    pub fn normalize(&self, raw: u16) -> MoisturePercent {
        if self.raw_max == 0 {
            return 0;
        }
        let clamped = raw.min(self.raw_max) as u32;
        let scaled = (clamped * 100 / self.raw_max as u32) as u8;
        match self.polarity {
            Polarity::WetHigh => scaled,
            Polarity::DryHigh => 100 - scaled,
        }
    }
}
