//! Integration tests for the buttons → menu → threshold → outputs pipeline.
//!
//! These run on the host (x86_64) and drive [`AppService`] pass by pass
//! with a mock board, display, store and event sink.

use crate::mock_hw::{MockBoard, MockDisplay, MockStore, RecordingSink};

use smart_irrigation::app::commands::{Adjust, AppCommand};
use smart_irrigation::app::events::{AppEvent, ChangeSource};
use smart_irrigation::app::service::{AppService, StatusReport};
use smart_irrigation::config::SystemConfig;
use smart_irrigation::control::mode::OperatingMode;
use smart_irrigation::control::threshold::THRESHOLD_KEY;
use smart_irrigation::fsm::MenuState;

/// Defaults, but with `raw_max = 100` so raw readings equal percentages.
fn config() -> SystemConfig {
    let mut c = SystemConfig::default();
    c.raw_max = 100;
    c
}

struct Rig {
    app: AppService,
    board: MockBoard,
    display: MockDisplay,
    store: MockStore,
    sink: RecordingSink,
}

impl Rig {
    fn new(moisture: u16, store: MockStore) -> Self {
        let mut app = AppService::new(config(), &store);
        let mut display = MockDisplay::new();
        let mut sink = RecordingSink::new();
        app.start(0, &mut display, &mut sink);
        Self {
            app,
            board: MockBoard::new(moisture),
            display,
            store,
            sink,
        }
    }

    fn tick(&mut self, now: u32) {
        self.app.tick(
            now,
            &mut self.board,
            &mut self.display,
            &mut self.store,
            &mut self.sink,
        );
    }

    fn command(&mut self, cmd: AppCommand, now: u32) {
        self.app
            .handle_command(cmd, now, &mut self.display, &mut self.store, &mut self.sink);
    }

    fn status(&mut self) -> StatusReport {
        self.app.status_report(&mut self.board, &mut self.sink)
    }

    /// Press and release the menu button over two passes.
    fn press_menu(&mut self, now: u32) {
        self.board.press_menu();
        self.tick(now);
        self.board.release_all();
        self.tick(now + 10);
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn splash_holds_display_until_expiry() {
    let mut rig = Rig::new(35, MockStore::new());
    assert_eq!(rig.display.row(0), "Smart Irrigation");

    rig.tick(100);
    assert_eq!(rig.display.row(0), "Smart Irrigation");
    assert!(rig.app.display_held(100));

    rig.tick(2000);
    assert!(!rig.app.display_held(2000));
    assert_eq!(rig.display.row(0), "Moisture: 35%");
    assert_eq!(rig.display.row(1), "Status: Irrigate");
    // One clear at start, one when the splash expires.
    assert_eq!(rig.display.clears, 2);
}

#[test]
fn started_event_carries_loaded_threshold() {
    let rig = Rig::new(50, MockStore::with(THRESHOLD_KEY, 63));
    assert_eq!(
        rig.sink.events.first(),
        Some(&AppEvent::Started {
            threshold: 63,
            mode: OperatingMode::Manual
        })
    );
}

// ── Decision end to end ───────────────────────────────────────

#[test]
fn manual_decision_scenario() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.tick(0);
    assert!(rig.board.relay());
    assert!(!rig.board.alarm());
    assert_eq!(rig.app.decision().status.as_str(), "Irrigating (Manual)");

    rig.command(AppCommand::SetThreshold(30), 500);
    rig.tick(1000);
    assert!(!rig.board.relay());
    assert_eq!(rig.app.decision().status.as_str(), "Idle (Manual)");

    rig.board.set_percent(15);
    rig.tick(2000);
    assert!(rig.board.alarm());
    assert!(rig.app.alarm_on());
}

#[test]
fn moisture_is_resampled_on_interval_only() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.tick(0);
    rig.board.set_percent(80);
    rig.tick(500);
    assert_eq!(rig.app.moisture(), 35);
    rig.tick(1000);
    assert_eq!(rig.app.moisture(), 80);
    assert_eq!(rig.board.reads, 2);
}

// ── Mutual exclusion ──────────────────────────────────────────

#[test]
fn remote_mode_locks_out_local_loop() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.tick(0);
    assert!(rig.board.relay());

    rig.command(AppCommand::ToggleMode, 100);
    assert_eq!(rig.app.mode(), OperatingMode::Remote);
    let writes = rig.board.relay_writes();

    rig.board.set_percent(90);
    for now in [1100, 2100, 3100, 4100] {
        rig.tick(now);
    }
    assert_eq!(rig.board.relay_writes(), writes, "local loop wrote the relay in Remote");
    assert!(rig.board.relay(), "relay keeps its last state until /status");

    let report = rig.status();
    assert_eq!(report.moisture, 90);
    assert_eq!(report.status, "Idle (Remote)");
    assert!(!rig.board.relay());
    assert_eq!(rig.board.relay_writes(), writes + 1);
}

#[test]
fn manual_mode_status_request_leaves_outputs_alone() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.tick(0);
    let writes = rig.board.relay_writes();

    rig.board.set_percent(10);
    let report = rig.status();
    assert_eq!(report.moisture, 10);
    assert_eq!(report.threshold, 40);
    assert_eq!(report.status, "Irrigating (Manual)");
    assert_eq!(rig.board.relay_writes(), writes);
    assert!(!rig.board.alarm());
}

// ── Menu ──────────────────────────────────────────────────────

#[test]
fn two_menu_presses_return_to_inactive() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.press_menu(100);
    assert_eq!(rig.app.menu_state(), MenuState::Editing);
    rig.press_menu(200);
    assert_eq!(rig.app.menu_state(), MenuState::Inactive);

    let menu_events = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::MenuChanged { .. }))
        .count();
    assert_eq!(menu_events, 2);
}

#[test]
fn contact_bounce_registers_one_press() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.board.press_menu();
    rig.tick(100);
    rig.board.release_all();
    rig.tick(102);
    rig.board.press_menu();
    rig.tick(104);
    rig.board.release_all();
    rig.tick(110);
    assert_eq!(rig.app.menu_state(), MenuState::Editing);
}

#[test]
fn held_increase_steps_and_survives_menu_round_trip() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.press_menu(100);

    rig.board.hold_increase();
    for i in 0..10 {
        rig.tick(200 + i * 200);
    }
    rig.board.release_all();
    rig.tick(2010);
    assert_eq!(rig.app.threshold(), 50);
    assert_eq!(rig.store.writes, 10);

    rig.press_menu(2100);
    rig.press_menu(2200);
    assert_eq!(rig.app.menu_state(), MenuState::Editing);
    assert_eq!(rig.app.threshold(), 50);
    assert_eq!(rig.display.row(0), "Set Threshold:");
    assert_eq!(rig.display.row(1), "50%");

    // A fresh boot on the same store reloads the value.
    let reloaded = AppService::new(config(), &rig.store);
    assert_eq!(reloaded.threshold(), 50);
}

#[test]
fn held_decrease_clamps_at_zero() {
    let mut rig = Rig::new(35, MockStore::with(THRESHOLD_KEY, 2));
    rig.press_menu(100);
    rig.board.hold_decrease();
    for i in 0..5 {
        rig.tick(200 + i * 200);
    }
    assert_eq!(rig.app.threshold(), 0);
    assert_eq!(rig.store.writes, 2);
}

#[test]
fn adjust_buttons_are_inert_while_inactive() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.board.hold_increase();
    for i in 0..5 {
        rig.tick(i * 200);
    }
    assert_eq!(rig.app.menu_state(), MenuState::Inactive);
    assert_eq!(rig.app.threshold(), 40);
    assert_eq!(rig.store.writes, 0);
}

// ── Mode banner ───────────────────────────────────────────────

#[test]
fn mode_banner_then_remote_view() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.tick(2500);
    assert_eq!(rig.display.row(1), "Status: Irrigate");

    rig.command(AppCommand::ToggleMode, 3000);
    assert_eq!(rig.display.row(0), "Remote Mode");

    rig.tick(3100);
    assert!(rig.app.display_held(3100));
    assert_eq!(rig.display.row(0), "Remote Mode");

    rig.tick(4500);
    assert_eq!(rig.display.row(0), "Moisture: 35%");
    assert_eq!(rig.display.row(1), "Mode: Remote");

    rig.command(AppCommand::ToggleMode, 5000);
    assert_eq!(rig.app.mode(), OperatingMode::Manual);
    assert_eq!(rig.display.row(0), "Manual Mode");
}

// ── Threshold persistence ─────────────────────────────────────

#[test]
fn corrupt_or_unreadable_threshold_falls_back_without_writing() {
    let rig = Rig::new(35, MockStore::with(THRESHOLD_KEY, 250));
    assert_eq!(rig.app.threshold(), 40);
    assert_eq!(rig.store.writes, 0);

    let mut failing = MockStore::new();
    failing.fail_reads = true;
    let rig = Rig::new(35, failing);
    assert_eq!(rig.app.threshold(), 40);
}

#[test]
fn failed_write_keeps_in_memory_value() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.store.fail_writes = true;
    rig.command(AppCommand::SetThreshold(70), 100);
    assert_eq!(rig.app.threshold(), 70);
    assert!(rig.store.values.is_empty());

    rig.store.fail_writes = false;
    rig.command(AppCommand::AdjustThreshold(Adjust::Increase), 200);
    assert_eq!(rig.app.threshold(), 71);
    assert_eq!(rig.store.values.get(THRESHOLD_KEY), Some(&71));
}

#[test]
fn repeated_value_after_failed_write_reaches_storage() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.store.fail_writes = true;
    rig.command(AppCommand::SetThreshold(70), 100);

    rig.store.fail_writes = false;
    rig.command(AppCommand::SetThreshold(70), 200);
    assert_eq!(rig.store.values.get(THRESHOLD_KEY), Some(&70));

    let reloaded = AppService::new(config(), &rig.store);
    assert_eq!(reloaded.threshold(), 70);
}

#[test]
fn remote_threshold_change_is_reported_once() {
    let mut rig = Rig::new(35, MockStore::new());
    rig.command(AppCommand::SetThreshold(55), 100);
    rig.command(AppCommand::SetThreshold(55), 200);
    rig.command(AppCommand::SetThreshold(-20), 300);

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::ThresholdChanged { .. }))
        .cloned()
        .collect();
    assert_eq!(
        changes,
        vec![
            AppEvent::ThresholdChanged {
                from: 40,
                to: 55,
                source: ChangeSource::Remote
            },
            AppEvent::ThresholdChanged {
                from: 55,
                to: 0,
                source: ChangeSource::Remote
            },
        ]
    );
    assert_eq!(rig.store.writes, 2);
}
