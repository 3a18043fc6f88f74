//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control cycle for the irrigation controller:
//! input debouncing, the menu FSM, threshold persistence, mode ownership of
//! the relay, and display rendering.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
