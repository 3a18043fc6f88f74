//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the moisture probe and the relay/buzzer output channels, and
//! samples the button pins, exposing them through [`SensorPort`],
//! [`OutputPort`] and [`ButtonPort`].  On non-espidf targets the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{ButtonPort, OutputPort, SensorPort};
use crate::drivers::button::{ButtonLevels, Level};
use crate::drivers::hw_init;
use crate::drivers::output::OutputChannel;
use crate::pins;
use crate::sensors::moisture::MoistureSensor;

/// Concrete adapter that combines all board I/O behind port traits.
pub struct HardwareAdapter {
    moisture: MoistureSensor,
    relay: OutputChannel,
    buzzer: OutputChannel,
}

impl HardwareAdapter {
    pub fn new(moisture: MoistureSensor, relay: OutputChannel, buzzer: OutputChannel) -> Self {
        Self {
            moisture,
            relay,
            buzzer,
        }
    }

    /// Adapter wired to the pins in [`crate::pins`].
    pub fn from_board(raw_max: u16) -> Self {
        Self::new(
            MoistureSensor::new(pins::MOISTURE_ADC_CHANNEL, raw_max),
            OutputChannel::new("relay", pins::RELAY_GPIO, pins::RELAY_ACTIVE_LOW),
            OutputChannel::new("buzzer", pins::BUZZER_GPIO, pins::BUZZER_ACTIVE_LOW),
        )
    }

    pub fn relay_on(&self) -> bool {
        self.relay.is_on()
    }

    pub fn buzzer_on(&self) -> bool {
        self.buzzer.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_raw(&mut self) -> u16 {
        self.moisture.read()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl OutputPort for HardwareAdapter {
    fn set_relay(&mut self, on: bool) {
        self.relay.set(on);
    }

    fn set_alarm(&mut self, on: bool) {
        self.buzzer.set(on);
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl ButtonPort for HardwareAdapter {
    fn read_levels(&mut self) -> ButtonLevels {
        ButtonLevels {
            menu: Level::from_high(hw_init::gpio_read(pins::MENU_BUTTON_GPIO)),
            increase: Level::from_high(hw_init::gpio_read(pins::PLUS_BUTTON_GPIO)),
            decrease: Level::from_high(hw_init::gpio_read(pins::MINUS_BUTTON_GPIO)),
        }
    }
}
