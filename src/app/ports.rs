//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (moisture probe, relay/buzzer, buttons, LCD, NVS, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::drivers::button::ButtonLevels;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the soil probe.
pub trait SensorPort {
    /// Raw ADC reading.  May exceed the configured `raw_max`; the
    /// normalizer clamps.
    fn read_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the water relay and the dry-soil alarm.
pub trait OutputPort {
    fn set_relay(&mut self, on: bool);

    fn set_alarm(&mut self, on: bool);

    /// De-energise relay and alarm.
    fn all_off(&mut self) {
        self.set_relay(false);
        self.set_alarm(false);
    }
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw level sampling for the three front-panel buttons.  Debouncing
/// happens in the domain, not here.
pub trait ButtonPort {
    fn read_levels(&mut self) -> ButtonLevels;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Two-row character display.
pub trait DisplayPort {
    /// Write `text` on `row` starting at column 0.
    fn show_line(&mut self, row: u8, text: &str);

    /// Blank the whole display.
    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ NVS / flash)
// ───────────────────────────────────────────────────────────────

/// Persistent integer key-value storage.
///
/// Writes must be atomic: no partial value survives a power loss.  The
/// ESP-IDF NVS API guarantees this natively.
pub trait StoragePort {
    /// Read an integer.  `Ok(None)` when the key was never written.
    fn get_int(&self, key: &str) -> Result<Option<i32>, StorageError>;

    /// Write an integer and commit it before returning.
    fn put_int(&mut self, key: &str, value: i32) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for StorageError {}
