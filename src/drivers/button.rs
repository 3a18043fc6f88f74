//! Polled, debounced input tracker for the three front-panel buttons.
//!
//! ## Hardware
//!
//! Active-low momentary switches with pull-ups: idle = HIGH, pressed = LOW.
//! There is no interrupt path; [`InputTracker::poll`] is called once per
//! control-loop pass with the current levels and a monotonic millisecond
//! timestamp.
//!
//! ## Timing regimes
//!
//! | Regime      | Fires when                                             |
//! |-------------|--------------------------------------------------------|
//! | Discrete    | HIGH→LOW edge and `debounce_ms` since this button's last accepted edge |
//! | Auto-repeat | level LOW and `repeat_ms` since this button's last fire |
//!
//! Every button owns its own timestamp.  A shared clock would let a menu
//! press swallow a simultaneous increase/decrease press.

/// Sampled logic level of one input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    /// Map a raw GPIO read (`true` = pin high) to a level.
    pub fn from_high(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

/// Levels of all three buttons sampled in the same pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLevels {
    pub menu: Level,
    pub increase: Level,
    pub decrease: Level,
}

impl ButtonLevels {
    /// All buttons released.
    pub const IDLE: Self = Self {
        menu: Level::High,
        increase: Level::High,
        decrease: Level::High,
    };
}

impl Default for ButtonLevels {
    fn default() -> Self {
        Self::IDLE
    }
}

/// How a tracked button turns levels into actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressMode {
    /// One action per debounced falling edge.
    Discrete { debounce_ms: u32 },
    /// Re-fire on a timer while held low.
    AutoRepeat { repeat_ms: u32 },
}

/// Per-button edge state: last observed level and last accepted fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdgeState {
    pub last_level: Level,
    pub last_fire_ms: Option<u32>,
}

impl Default for ButtonEdgeState {
    fn default() -> Self {
        Self {
            last_level: Level::High,
            last_fire_ms: None,
        }
    }
}

/// One button plus its timing regime.
#[derive(Debug, Clone, Copy)]
pub struct TrackedButton {
    mode: PressMode,
    state: ButtonEdgeState,
}

impl TrackedButton {
    pub fn new(mode: PressMode) -> Self {
        Self {
            mode,
            state: ButtonEdgeState::default(),
        }
    }

    pub fn state(&self) -> ButtonEdgeState {
        self.state
    }

    /// Advance with the level sampled at `now_ms`.  Returns `true` if the
    /// button's action fires in this pass.
    pub fn update(&mut self, level: Level, now_ms: u32) -> bool {
        let since_last_fire = |state: &ButtonEdgeState, gap: u32| match state.last_fire_ms {
            None => true,
            Some(t) => now_ms.wrapping_sub(t) >= gap,
        };

        let fired = match self.mode {
            PressMode::Discrete { debounce_ms } => {
                let falling = self.state.last_level == Level::High && level == Level::Low;
                falling && since_last_fire(&self.state, debounce_ms)
            }
            PressMode::AutoRepeat { repeat_ms } => {
                level == Level::Low && since_last_fire(&self.state, repeat_ms)
            }
        };

        if fired {
            self.state.last_fire_ms = Some(now_ms);
        }
        self.state.last_level = level;
        fired
    }
}

/// Actions produced by one [`InputTracker::poll`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputEvents {
    pub menu_pressed: bool,
    pub increase_fired: bool,
    pub decrease_fired: bool,
}

impl InputEvents {
    pub fn any(&self) -> bool {
        self.menu_pressed || self.increase_fired || self.decrease_fired
    }
}

/// Menu button in discrete mode, increase/decrease in auto-repeat mode.
pub struct InputTracker {
    menu: TrackedButton,
    increase: TrackedButton,
    decrease: TrackedButton,
}

impl InputTracker {
    pub fn new(debounce_ms: u32, repeat_ms: u32) -> Self {
        Self {
            menu: TrackedButton::new(PressMode::Discrete { debounce_ms }),
            increase: TrackedButton::new(PressMode::AutoRepeat { repeat_ms }),
            decrease: TrackedButton::new(PressMode::AutoRepeat { repeat_ms }),
        }
    }

    /// Call once per loop pass.
    pub fn poll(&mut self, now_ms: u32, levels: ButtonLevels) -> InputEvents {
        InputEvents {
            menu_pressed: self.menu.update(levels.menu, now_ms),
            increase_fired: self.increase.update(levels.increase, now_ms),
            decrease_fired: self.decrease.update(levels.decrease, now_ms),
        }
    }

    pub fn menu_state(&self) -> ButtonEdgeState {
        self.menu.state()
    }
}
