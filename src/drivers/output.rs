//! Digital output channel (relay module, buzzer).
//!
//! Tracks the logical on/off state and hides per-channel polarity.  Only
//! state changes touch the pin and the log.

use log::info;

use super::hw_init;

pub struct OutputChannel {
    name: &'static str,
    gpio: i32,
    active_low: bool,
    on: bool,
    switches: u32,
}

impl OutputChannel {
    /// Channel starts off; `hw_init` already drove the pin to its idle level.
    pub fn new(name: &'static str, gpio: i32, active_low: bool) -> Self {
        Self {
            name,
            gpio,
            active_low,
            on: false,
            switches: 0,
        }
    }

    pub fn set(&mut self, on: bool) {
        if on == self.on {
            return;
        }
        self.on = on;
        self.switches = self.switches.wrapping_add(1);
        hw_init::gpio_write(self.gpio, self.pin_level(on));
        info!("{}: {}", self.name, if on { "ON" } else { "OFF" });
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of on/off transitions since boot.
    pub fn switches(&self) -> u32 {
        self.switches
    }

    /// Electrical level for a logical state.
    pub fn pin_level(&self, on: bool) -> bool {
        on != self.active_low
    }
}
