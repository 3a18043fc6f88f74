//! Unified error types for the irrigation firmware.
//!
//! The control cycle itself never fails: sensor anomalies are clamped,
//! persistence failures fall back to the in-memory value, and malformed
//! remote requests are ignored.  This type covers the boot-time paths
//! (peripheral bring-up, config validation, display bus, network) so that
//! `main` can funnel them through one `?`-friendly enum.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// A configuration field failed range validation.
    Config(&'static str),
    /// The LCD backpack did not acknowledge on the I²C bus.
    Display(&'static str),
    /// Access point or HTTP listener failure.
    Network(NetworkError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Display(msg) => write!(f, "display: {msg}"),
            Self::Network(e) => write!(f, "network: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Network errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    /// SSID must be 1–32 printable ASCII bytes.
    InvalidSsid,
    /// WPA2 passphrase must be 8–64 bytes (or empty for an open AP).
    InvalidPassword,
    /// The WiFi driver refused to start the soft-AP.
    ApStartFailed,
    /// The HTTP listener could not bind its port.
    BindFailed,
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::ApStartFailed => write!(f, "soft-AP start failed"),
            Self::BindFailed => write!(f, "HTTP listener bind failed"),
        }
    }
}

impl From<NetworkError> for Error {
    fn from(e: NetworkError) -> Self {
        Self::Network(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
