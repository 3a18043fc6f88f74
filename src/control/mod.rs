//! Irrigation control: the persisted threshold, the operating mode, and
//! the pure relay/alarm decision.

pub mod decision;
pub mod mode;
pub mod threshold;
