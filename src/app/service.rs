//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the menu FSM, the input tracker, the threshold
//! store and the mode controller.  It exposes a hardware-agnostic API:
//! all I/O flows through port traits injected at call sites, making the
//! whole control cycle testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!  ButtonPort ──▶ │         AppService          │ ──▶ DisplayPort
//! OutputPort ◀──  │ Inputs · Menu · Threshold   │ ◀─▶ StoragePort
//!                 │ Mode · Decision             │
//!                 └────────────────────────────┘
//! ```
//!
//! ## Relay ownership
//!
//! Two paths may drive the relay and buzzer: the local loop
//! ([`AppService::tick`]) and the remote status evaluation
//! ([`AppService::status_report`]).  Both go through `drive_outputs`,
//! which refuses any path that does not own the current mode, so at most
//! one of them writes the outputs in a given cycle.

use core::fmt::Write as _;

use log::{debug, info};
use serde::Serialize;

use crate::config::SystemConfig;
use crate::control::decision::{IrrigationDecision, decide};
use crate::control::mode::{ModeController, OperatingMode};
use crate::control::threshold::ThresholdStore;
use crate::drivers::button::InputTracker;
use crate::fsm::context::MenuContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, MenuState};
use crate::sensors::normalizer::{MoisturePercent, Normalizer};

use super::commands::{Adjust, AppCommand};
use super::events::{AppEvent, ChangeSource};
use super::ports::{ButtonPort, DisplayPort, EventSink, OutputPort, SensorPort, StoragePort};

/// Text shown during the boot splash.
pub const SPLASH_TEXT: &str = "Smart Irrigation";

/// Row buffer; one LCD line plus slack for formatting.
type Line = heapless::String<24>;

// ───────────────────────────────────────────────────────────────
// Supporting types
// ───────────────────────────────────────────────────────────────

/// Which control path is asking to drive the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPath {
    /// Periodic local decision cycle.  Owns the outputs in Manual.
    Local,
    /// Remote status evaluation.  Owns the outputs in Remote.
    Remote,
}

impl ControlPath {
    pub fn owner_mode(self) -> OperatingMode {
        match self {
            Self::Local => OperatingMode::Manual,
            Self::Remote => OperatingMode::Remote,
        }
    }
}

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    pub moisture: MoisturePercent,
    pub threshold: u8,
    pub status: &'static str,
}

/// A timed message that suppresses normal rendering.
#[derive(Debug, Clone, Copy)]
struct DisplayHold {
    since_ms: u32,
    duration_ms: u32,
}

impl DisplayHold {
    fn expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.since_ms) >= self.duration_ms
    }
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    normalizer: Normalizer,
    inputs: InputTracker,
    menu: Fsm,
    menu_ctx: MenuContext,
    threshold: ThresholdStore,
    mode: ModeController,
    moisture: MoisturePercent,
    last_raw: u16,
    last_sample_ms: Option<u32>,
    /// Outputs as last written by the owning path.
    relay_on: bool,
    alarm_on: bool,
    hold: Option<DisplayHold>,
    pass_count: u64,
}

impl AppService {
    /// Construct the service and load the persisted threshold.
    ///
    /// Does **not** start the menu or touch the display; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, storage: &impl StoragePort) -> Self {
        let normalizer = Normalizer::new(config.raw_max, config.polarity);
        let inputs = InputTracker::new(config.debounce_ms, config.repeat_interval_ms);
        let menu = Fsm::new(build_state_table(), MenuState::Inactive);
        let threshold = ThresholdStore::load(storage);

        Self {
            config,
            normalizer,
            inputs,
            menu,
            menu_ctx: MenuContext::new(),
            threshold,
            mode: ModeController::new(),
            moisture: 0,
            last_raw: 0,
            last_sample_ms: None,
            relay_on: false,
            alarm_on: false,
            hold: None,
            pass_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the initial menu state and show the boot splash.
    pub fn start(
        &mut self,
        now_ms: u32,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.menu.start(&mut self.menu_ctx);
        let _ = self.menu_ctx.take_requests();

        display.clear();
        display.show_line(0, SPLASH_TEXT);
        self.hold_display(now_ms, self.config.splash_ms);

        sink.emit(&AppEvent::Started {
            threshold: self.threshold.current(),
            mode: self.mode.current(),
        });
        info!(
            "AppService started: threshold={} mode={:?}",
            self.threshold.current(),
            self.mode.current()
        );
    }

    // ── Per-pass orchestration ────────────────────────────────

    /// Run one loop pass: sample → buttons → menu → decide → outputs → display.
    ///
    /// The `hw` parameter satisfies [`SensorPort`], [`OutputPort`] and
    /// [`ButtonPort`] at once, which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + OutputPort + ButtonPort),
        display: &mut impl DisplayPort,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        self.pass_count += 1;

        // 1. Re-sample moisture on its own interval.
        let due = match self.last_sample_ms {
            None => true,
            Some(t) => now_ms.wrapping_sub(t) >= self.config.sample_interval_ms,
        };
        if due {
            self.last_sample_ms = Some(now_ms);
            self.sample(hw, sink);
        }

        // 2. Buttons → menu FSM.
        let levels = hw.read_levels();
        let events = self.inputs.poll(now_ms, levels);
        let prev_menu = self.menu.current_state();
        self.menu_ctx.begin_pass(events);
        self.menu.tick(&mut self.menu_ctx);
        let requests = self.menu_ctx.take_requests();

        let menu_now = self.menu.current_state();
        if menu_now != prev_menu {
            sink.emit(&AppEvent::MenuChanged {
                from: prev_menu,
                to: menu_now,
            });
        }

        // 3. Apply menu requests.
        if requests.threshold_step != 0 {
            let from = self.threshold.current();
            let step = requests.threshold_step.unsigned_abs();
            let to = if requests.threshold_step > 0 {
                self.threshold.increment(step, storage)
            } else {
                self.threshold.decrement(step, storage)
            };
            self.emit_threshold_change(from, to, ChangeSource::Buttons, sink);
        }
        if requests.clear_display {
            self.hold = None;
            display.clear();
        }

        // 4. Local decision; only lands on the outputs in Manual.
        let decision = self.decision();
        self.drive_outputs(ControlPath::Local, decision, hw, sink);

        // 5. Display.
        self.render(now_ms, decision, display);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a remote command.  Runs inline with the loop.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now_ms: u32,
        display: &mut impl DisplayPort,
        storage: &mut impl StoragePort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::AdjustThreshold(adjust) => {
                let from = self.threshold.current();
                let to = match adjust {
                    Adjust::Increase => self.threshold.increment(1, storage),
                    Adjust::Decrease => self.threshold.decrement(1, storage),
                };
                self.emit_threshold_change(from, to, ChangeSource::Remote, sink);
            }
            AppCommand::SetThreshold(value) => {
                let from = self.threshold.current();
                let to = self.threshold.set_absolute(value, storage);
                self.emit_threshold_change(from, to, ChangeSource::Remote, sink);
            }
            AppCommand::ToggleMode => {
                let mode = self.mode.toggle(display);
                self.hold_display(now_ms, self.config.mode_banner_ms);
                sink.emit(&AppEvent::ModeChanged(mode));
            }
        }
    }

    /// Remote status evaluation: fresh sample, decide, and drive the
    /// outputs if Remote owns them.
    pub fn status_report(
        &mut self,
        hw: &mut (impl SensorPort + OutputPort),
        sink: &mut impl EventSink,
    ) -> StatusReport {
        self.sample(hw, sink);
        let decision = self.decision();
        self.drive_outputs(ControlPath::Remote, decision, hw, sink);

        StatusReport {
            moisture: self.moisture,
            threshold: self.threshold.current(),
            status: decision.status.as_str(),
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn menu_state(&self) -> MenuState {
        self.menu.current_state()
    }

    pub fn mode(&self) -> OperatingMode {
        self.mode.current()
    }

    pub fn threshold(&self) -> u8 {
        self.threshold.current()
    }

    /// Most recent moisture sample.
    pub fn moisture(&self) -> MoisturePercent {
        self.moisture
    }

    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    /// Decision for the latest sample under the current threshold and mode.
    pub fn decision(&self) -> IrrigationDecision {
        decide(self.moisture, self.threshold.current(), self.mode.current())
    }

    /// Relay state as last written.
    pub fn relay_on(&self) -> bool {
        self.relay_on
    }

    pub fn alarm_on(&self) -> bool {
        self.alarm_on
    }

    /// Whether a splash or mode banner currently owns the display.
    pub fn display_held(&self, now_ms: u32) -> bool {
        self.hold.is_some_and(|h| !h.expired(now_ms))
    }

    /// Loop passes executed since startup.
    pub fn pass_count(&self) -> u64 {
        self.pass_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn sample(&mut self, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        let raw = hw.read_raw();
        self.last_raw = raw;
        self.moisture = self.normalizer.normalize(raw);
        sink.emit(&AppEvent::Reading {
            raw,
            moisture: self.moisture,
        });
    }

    /// Write relay and alarm if `path` owns the current mode.  Returns
    /// `false` when the path was refused.
    fn drive_outputs(
        &mut self,
        path: ControlPath,
        decision: IrrigationDecision,
        hw: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) -> bool {
        let mode = self.mode.current();
        if path.owner_mode() != mode {
            return false;
        }

        hw.set_relay(decision.relay_on);
        hw.set_alarm(decision.alarm_on);

        if decision.relay_on != self.relay_on {
            self.relay_on = decision.relay_on;
            sink.emit(&AppEvent::RelayChanged {
                on: decision.relay_on,
                mode,
            });
        }
        if decision.alarm_on != self.alarm_on {
            self.alarm_on = decision.alarm_on;
            sink.emit(&AppEvent::AlarmChanged(decision.alarm_on));
        }
        true
    }

    fn emit_threshold_change(
        &self,
        from: u8,
        to: u8,
        source: ChangeSource,
        sink: &mut impl EventSink,
    ) {
        if from != to {
            sink.emit(&AppEvent::ThresholdChanged { from, to, source });
        }
    }

    fn hold_display(&mut self, now_ms: u32, duration_ms: u32) {
        self.hold = Some(DisplayHold {
            since_ms: now_ms,
            duration_ms,
        });
    }

    fn render(
        &mut self,
        now_ms: u32,
        decision: IrrigationDecision,
        display: &mut impl DisplayPort,
    ) {
        if let Some(hold) = self.hold {
            if !hold.expired(now_ms) {
                return;
            }
            self.hold = None;
            display.clear();
            debug!("Display hold released");
        }

        let mut top = Line::new();
        let mut bottom = Line::new();
        match (self.menu.current_state(), self.mode.current()) {
            (MenuState::Editing, _) => {
                let _ = top.push_str("Set Threshold:");
                let _ = write!(bottom, "{}%", self.threshold.current());
            }
            (MenuState::Inactive, OperatingMode::Manual) => {
                let _ = write!(top, "Moisture: {}%", self.moisture);
                let _ = bottom.push_str(if decision.relay_on {
                    "Status: Irrigate"
                } else {
                    "Status: Idle"
                });
            }
            (MenuState::Inactive, OperatingMode::Remote) => {
                let _ = write!(top, "Moisture: {}%", self.moisture);
                let _ = bottom.push_str("Mode: Remote");
            }
        }
        display.show_line(0, &top);
        display.show_line(1, &bottom);
    }
}
