//! Persisted moisture threshold.
//!
//! The store owns the one threshold value for the device.  It is read once
//! at boot and every mutation is written straight back through
//! [`StoragePort`], with no batching.  A failed write is logged and the
//! in-memory value stays authoritative until the next mutation retries.

use log::{info, warn};

use crate::app::ports::StoragePort;

/// Key-value slot holding the threshold.
pub const THRESHOLD_KEY: &str = "threshold";

/// Threshold used when nothing valid is stored.
pub const DEFAULT_THRESHOLD: u8 = 40;

/// Upper bound of the threshold domain (inclusive).
pub const MAX_THRESHOLD: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdStore {
    value: u8,
    /// Memory differs from storage because the last write failed.
    dirty: bool,
}

impl ThresholdStore {
    /// Read the persisted threshold.
    ///
    /// Missing, unreadable, or out-of-range values yield
    /// [`DEFAULT_THRESHOLD`].  Nothing is written back here.
    pub fn load(storage: &impl StoragePort) -> Self {
        let value = match storage.get_int(THRESHOLD_KEY) {
            Ok(Some(v)) if (0..=i32::from(MAX_THRESHOLD)).contains(&v) => v as u8,
            Ok(Some(v)) => {
                warn!("Stored threshold {} out of range, using default", v);
                DEFAULT_THRESHOLD
            }
            Ok(None) => {
                info!("No stored threshold, using default {}", DEFAULT_THRESHOLD);
                DEFAULT_THRESHOLD
            }
            Err(e) => {
                warn!("Threshold read failed ({}), using default", e);
                DEFAULT_THRESHOLD
            }
        };
        Self {
            value,
            dirty: false,
        }
    }

    /// In-memory store that has never touched storage.
    pub fn with_value(value: u8) -> Self {
        Self {
            value: value.min(MAX_THRESHOLD),
            dirty: false,
        }
    }

    pub fn current(&self) -> u8 {
        self.value
    }

    /// Raise by `by`, saturating at 100, and persist.
    pub fn increment(&mut self, by: u8, storage: &mut impl StoragePort) -> u8 {
        self.set_absolute(i32::from(self.value) + i32::from(by), storage)
    }

    /// Lower by `by`, saturating at 0, and persist.
    pub fn decrement(&mut self, by: u8, storage: &mut impl StoragePort) -> u8 {
        self.set_absolute(i32::from(self.value) - i32::from(by), storage)
    }

    /// Clamp `value` into [0, 100] and persist.  Returns the new value.
    ///
    /// An unchanged value is still written while an earlier write is
    /// outstanding.
    pub fn set_absolute(&mut self, value: i32, storage: &mut impl StoragePort) -> u8 {
        let clamped = value.clamp(0, i32::from(MAX_THRESHOLD)) as u8;
        if clamped != self.value || self.dirty {
            self.value = clamped;
            self.persist(storage);
        }
        self.value
    }

    /// Whether the in-memory value has not reached storage yet.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn persist(&mut self, storage: &mut impl StoragePort) {
        match storage.put_int(THRESHOLD_KEY, i32::from(self.value)) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                self.dirty = true;
                warn!("Threshold write failed ({}), keeping {} in memory", e, self.value);
            }
        }
    }
}
