//! Soil moisture probe driver.
//!
//! Reads the probe's analog output through ADC1 and reports the raw
//! count.  Conversion to a percentage happens in the domain layer
//! ([`Normalizer`](super::normalizer::Normalizer)), so this driver stays
//! a dumb sampler.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_MOISTURE_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_moisture_adc(raw: u16) {
    SIM_MOISTURE_ADC.store(raw, Ordering::Relaxed);
}

pub struct MoistureSensor {
    adc_channel: u32,
    raw_max: u16,
    last_raw: u16,
    total_reads: u32,
}

impl MoistureSensor {
    pub fn new(adc_channel: u32, raw_max: u16) -> Self {
        Self {
            adc_channel,
            raw_max,
            last_raw: 0,
            total_reads: 0,
        }
    }

    /// Sample the probe once.  Values above full scale are clamped.
    pub fn read(&mut self) -> u16 {
        self.total_reads = self.total_reads.saturating_add(1);
        let raw = self.read_adc();
        if raw > self.raw_max {
            log::warn!(
                "moisture: raw {} above full scale {}, clamping",
                raw, self.raw_max
            );
        }
        self.last_raw = raw.min(self.raw_max);
        self.last_raw
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        let _ = self.adc_channel;
        SIM_MOISTURE_ADC.load(Ordering::Relaxed)
    }
}
