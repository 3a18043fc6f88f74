//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production), one tagged line per event.

use log::{debug, info, warn};

use crate::app::events::{AppEvent, ChangeSource};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { threshold, mode } => {
                info!("START | threshold={}% mode={:?}", threshold, mode);
            }
            AppEvent::ThresholdChanged { from, to, source } => {
                let via = match source {
                    ChangeSource::Buttons => "buttons",
                    ChangeSource::Remote => "remote",
                };
                info!("THRESH | {}% -> {}% ({})", from, to, via);
            }
            AppEvent::MenuChanged { from, to } => {
                info!("MENU | {:?} -> {:?}", from, to);
            }
            AppEvent::ModeChanged(mode) => {
                info!("MODE | {}", mode.label());
            }
            AppEvent::RelayChanged { on, mode } => {
                info!("RELAY | {} ({:?})", if *on { "ON" } else { "OFF" }, mode);
            }
            AppEvent::AlarmChanged(on) => {
                if *on {
                    warn!("ALARM | critical dryness");
                } else {
                    info!("ALARM | cleared");
                }
            }
            AppEvent::Reading { raw, moisture } => {
                debug!("READ | raw={} moisture={}%", raw, moisture);
            }
        }
    }
}
