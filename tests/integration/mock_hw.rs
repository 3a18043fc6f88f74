//! Mock adapters for integration tests.
//!
//! Records every port call so tests can assert on the full output and
//! display history without touching real GPIO, I²C or flash.

use smart_irrigation::app::events::AppEvent;
use smart_irrigation::app::ports::{
    ButtonPort, DisplayPort, EventSink, OutputPort, SensorPort, StorageError, StoragePort,
};
use smart_irrigation::drivers::button::{ButtonLevels, Level};
use std::collections::HashMap;

// ── Output call record ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Relay(bool),
    Alarm(bool),
}

// ── MockBoard ─────────────────────────────────────────────────

/// Sensor, buttons and outputs of one board.
pub struct MockBoard {
    pub raw: u16,
    pub levels: ButtonLevels,
    pub calls: Vec<OutputCall>,
    pub reads: u32,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(raw: u16) -> Self {
        Self {
            raw,
            levels: ButtonLevels::IDLE,
            calls: Vec::new(),
            reads: 0,
        }
    }

    /// Raw value that normalises to `percent` with `raw_max = 100`.
    pub fn set_percent(&mut self, percent: u16) {
        self.raw = percent;
    }

    pub fn press_menu(&mut self) {
        self.levels.menu = Level::Low;
    }

    pub fn hold_increase(&mut self) {
        self.levels.increase = Level::Low;
    }

    pub fn hold_decrease(&mut self) {
        self.levels.decrease = Level::Low;
    }

    pub fn release_all(&mut self) {
        self.levels = ButtonLevels::IDLE;
    }

    pub fn relay(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Relay(on) => Some(*on),
                OutputCall::Alarm(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn alarm(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                OutputCall::Alarm(on) => Some(*on),
                OutputCall::Relay(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn relay_writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, OutputCall::Relay(_)))
            .count()
    }
}

impl SensorPort for MockBoard {
    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        self.raw
    }
}

impl OutputPort for MockBoard {
    fn set_relay(&mut self, on: bool) {
        self.calls.push(OutputCall::Relay(on));
    }

    fn set_alarm(&mut self, on: bool) {
        self.calls.push(OutputCall::Alarm(on));
    }
}

impl ButtonPort for MockBoard {
    fn read_levels(&mut self) -> ButtonLevels {
        self.levels
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub rows: [String; 2],
    pub clears: u32,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, row: usize) -> &str {
        &self.rows[row]
    }
}

impl DisplayPort for MockDisplay {
    fn show_line(&mut self, row: u8, text: &str) {
        if let Some(slot) = self.rows.get_mut(row as usize) {
            *slot = text.to_string();
        }
    }

    fn clear(&mut self) {
        self.rows = Default::default();
        self.clears += 1;
    }
}

// ── MockStore ─────────────────────────────────────────────────

/// In-memory key-value store with write accounting and fault injection.
#[derive(Default)]
pub struct MockStore {
    pub values: HashMap<String, i32>,
    pub writes: u32,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: i32) -> Self {
        let mut s = Self::default();
        s.values.insert(key.to_string(), value);
        s
    }
}

impl StoragePort for MockStore {
    fn get_int(&self, key: &str) -> Result<Option<i32>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::IoError);
        }
        Ok(self.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i32) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::IoError);
        }
        self.writes += 1;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events other than per-sample readings.
    pub fn changes(&self) -> Vec<&AppEvent> {
        self.events
            .iter()
            .filter(|e| !matches!(e, AppEvent::Reading { .. }))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
