//! Sensor subsystem: the moisture probe driver and the pure
//! raw-to-percentage normalizer.

pub mod moisture;
pub mod normalizer;
