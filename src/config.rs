//! System configuration parameters
//!
//! All tunable parameters for the irrigation controller.  The moisture
//! threshold is *not* here: it is operator state owned by the
//! [`ThresholdStore`](crate::control::threshold::ThresholdStore) and
//! persisted under its own NVS key.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::sensors::normalizer::Polarity;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Buttons ---
    /// Minimum gap between two accepted menu-button edges (milliseconds)
    pub debounce_ms: u32,
    /// Auto-repeat period for a held increase/decrease button (milliseconds)
    pub repeat_interval_ms: u32,

    // --- Sensor ---
    /// Moisture re-sampling interval (milliseconds)
    pub sample_interval_ms: u32,
    /// Full-scale raw ADC value (12-bit ADC → 4095)
    pub raw_max: u16,
    /// Which raw direction means wetter soil
    pub polarity: Polarity,

    // --- Display ---
    /// Boot splash hold (milliseconds)
    pub splash_ms: u32,
    /// Mode banner hold after a toggle (milliseconds)
    pub mode_banner_ms: u32,

    // --- Loop ---
    /// Fixed idle delay between two loop passes (milliseconds)
    pub loop_idle_ms: u32,
    /// Task watchdog timeout (milliseconds)
    pub watchdog_timeout_ms: u32,

    // --- Network ---
    /// Soft-AP SSID
    pub ap_ssid: heapless::String<32>,
    /// Soft-AP WPA2 passphrase (empty = open network)
    pub ap_password: heapless::String<64>,
    /// Control API listen port
    pub http_port: u16,
    /// Upper bound on requests served in one loop pass
    pub max_requests_per_pass: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut ap_ssid = heapless::String::new();
        let _ = ap_ssid.push_str("SmartIrrigation");
        let mut ap_password = heapless::String::new();
        let _ = ap_password.push_str("IrrigationSystem2024!");

        Self {
            // Buttons
            debounce_ms: 50,
            repeat_interval_ms: 200,

            // Sensor
            sample_interval_ms: 1000, // 1 Hz
            raw_max: 4095,
            polarity: Polarity::WetHigh,

            // Display
            splash_ms: 2000,
            mode_banner_ms: 1500,

            // Loop
            loop_idle_ms: 20,
            watchdog_timeout_ms: 10_000,

            // Network
            ap_ssid,
            ap_password,
            http_port: 80,
            max_requests_per_pass: 4,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), Error> {
        if !(5..=1000).contains(&self.debounce_ms) {
            return Err(Error::Config("debounce_ms must be 5–1000"));
        }
        if self.repeat_interval_ms < self.debounce_ms || self.repeat_interval_ms > 5000 {
            return Err(Error::Config(
                "repeat_interval_ms must be debounce_ms–5000",
            ));
        }
        if !(100..=60_000).contains(&self.sample_interval_ms) {
            return Err(Error::Config("sample_interval_ms must be 100–60000"));
        }
        if self.raw_max == 0 {
            return Err(Error::Config("raw_max must be > 0"));
        }
        if !(1..=500).contains(&self.loop_idle_ms) {
            return Err(Error::Config("loop_idle_ms must be 1–500"));
        }
        if self.loop_idle_ms >= self.debounce_ms {
            return Err(Error::Config("loop_idle_ms must be < debounce_ms"));
        }
        if self.watchdog_timeout_ms < 1000 {
            return Err(Error::Config("watchdog_timeout_ms must be >= 1000"));
        }
        if self.max_requests_per_pass == 0 {
            return Err(Error::Config("max_requests_per_pass must be > 0"));
        }
        Ok(())
    }
}
