//! Property tests for the pure control logic.
//!
//! Runs on host (x86_64) only — proptest is not available for ESP32 targets.
//! On ESP32, these tests are compiled out.

#![cfg(not(target_os = "espidf"))]

use std::collections::HashMap;

use proptest::prelude::*;
use smart_irrigation::app::ports::{StorageError, StoragePort};
use smart_irrigation::control::decision::{StatusLabel, decide};
use smart_irrigation::control::mode::OperatingMode;
use smart_irrigation::control::threshold::ThresholdStore;
use smart_irrigation::drivers::button::{Level, PressMode, TrackedButton};
use smart_irrigation::sensors::normalizer::{Normalizer, Polarity};

fn arb_polarity() -> impl Strategy<Value = Polarity> {
    prop_oneof![Just(Polarity::WetHigh), Just(Polarity::DryHigh)]
}

fn arb_mode() -> impl Strategy<Value = OperatingMode> {
    prop_oneof![Just(OperatingMode::Manual), Just(OperatingMode::Remote)]
}

// ── Normalizer ────────────────────────────────────────────────

proptest! {
    #[test]
    fn normalize_stays_in_percent_range(
        raw_max in 1u16..=u16::MAX,
        raw in any::<u16>(),
        polarity in arb_polarity(),
    ) {
        let m = Normalizer::new(raw_max, polarity).normalize(raw);
        prop_assert!(m <= 100);
    }

    #[test]
    fn normalize_is_monotonic_in_polarity_direction(
        raw_max in 1u16..=4095,
        a in 0u16..=4095,
        b in 0u16..=4095,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let wet = Normalizer::new(raw_max, Polarity::WetHigh);
        let dry = Normalizer::new(raw_max, Polarity::DryHigh);
        prop_assert!(wet.normalize(lo) <= wet.normalize(hi));
        prop_assert!(dry.normalize(lo) >= dry.normalize(hi));
    }
}

// ── Threshold store ───────────────────────────────────────────

#[derive(Default)]
struct MemStore(HashMap<String, i32>);

impl StoragePort for MemStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>, StorageError> {
        Ok(self.0.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        self.0.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum ThresholdOp {
    Increment(u8),
    Decrement(u8),
    Set(i32),
}

fn arb_threshold_op() -> impl Strategy<Value = ThresholdOp> {
    prop_oneof![
        (1u8..=20).prop_map(ThresholdOp::Increment),
        (1u8..=20).prop_map(ThresholdOp::Decrement),
        any::<i32>().prop_map(ThresholdOp::Set),
    ]
}

proptest! {
    /// Any mutation sequence keeps the value in [0, 100], and a reload
    /// returns exactly the last value.
    #[test]
    fn threshold_clamped_and_reloadable(
        ops in proptest::collection::vec(arb_threshold_op(), 1..=40),
    ) {
        let mut store = MemStore::default();
        let mut t = ThresholdStore::load(&store);
        for op in ops {
            let v = match op {
                ThresholdOp::Increment(by) => t.increment(by, &mut store),
                ThresholdOp::Decrement(by) => t.decrement(by, &mut store),
                ThresholdOp::Set(v) => t.set_absolute(v, &mut store),
            };
            prop_assert!(v <= 100);
            prop_assert_eq!(v, t.current());
        }
        prop_assert_eq!(ThresholdStore::load(&store).current(), t.current());
    }
}

// ── Decision engine ───────────────────────────────────────────

proptest! {
    #[test]
    fn decision_rules_hold(
        m in 0u8..=100,
        t in 0u8..=100,
        mode in arb_mode(),
    ) {
        let d = decide(m, t, mode);
        prop_assert_eq!(d.relay_on, m < t);
        prop_assert_eq!(d.alarm_on, m < 20);
        prop_assert_eq!(d.status, StatusLabel::from_parts(d.relay_on, mode));
    }
}

// ── Debounce ──────────────────────────────────────────────────

proptest! {
    /// Bounces confined to one debounce window yield at most one press.
    #[test]
    fn bounce_within_window_fires_at_most_once(
        levels in proptest::collection::vec(any::<bool>(), 1..=49),
    ) {
        let mut b = TrackedButton::new(PressMode::Discrete { debounce_ms: 50 });
        let fires = levels
            .iter()
            .enumerate()
            .filter(|(i, high)| b.update(Level::from_high(**high), 1000 + *i as u32))
            .count();
        prop_assert!(fires <= 1);
    }

    /// Holding for 3 × repeat interval fires exactly 3 times regardless
    /// of the polling period.
    #[test]
    fn held_button_repeats_three_times(
        step in 1u32..=40,
        start in 0u32..=100_000,
    ) {
        let repeat = 200;
        let mut b = TrackedButton::new(PressMode::AutoRepeat { repeat_ms: repeat });
        let mut fires = 0;
        let mut now = start;
        while now < start + 3 * repeat {
            if b.update(Level::Low, now) {
                fires += 1;
            }
            now += step;
        }
        prop_assert_eq!(fires, 3);
    }
}
