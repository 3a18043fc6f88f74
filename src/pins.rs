//! GPIO / peripheral pin assignments for the irrigation controller board
//! (classic ESP32, WROOM-32 module).
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Soil moisture probe (analog)
// ---------------------------------------------------------------------------

/// Capacitive/resistive soil probe output.  GPIO 36 (SENSOR_VP) is ADC1
/// channel 0; ADC2 pins are unusable while the WiFi radio is running.
pub const MOISTURE_ADC_GPIO: i32 = 36;
/// ADC1 channel wired to [`MOISTURE_ADC_GPIO`].
pub const MOISTURE_ADC_CHANNEL: u32 = 0;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Water-valve / pump relay module input.
pub const RELAY_GPIO: i32 = 13;
/// Relay module polarity.  Most opto-isolated boards switch on LOW; the
/// reference board drives a transistor stage, so HIGH = energised.
pub const RELAY_ACTIVE_LOW: bool = false;

/// Piezo buzzer for the critical-dryness alarm.  GPIO 34–39 are input-only
/// on the ESP32, so the buzzer sits on GPIO 26.
pub const BUZZER_GPIO: i32 = 26;
pub const BUZZER_ACTIVE_LOW: bool = false;

// ---------------------------------------------------------------------------
// Push-buttons (active-low, pulled up at idle)
// ---------------------------------------------------------------------------

/// Menu toggle button.
pub const MENU_BUTTON_GPIO: i32 = 32;
/// Threshold increase button.
pub const PLUS_BUTTON_GPIO: i32 = 33;
/// Threshold decrease button.  GPIO 35 has no internal pull-up; the board
/// fits an external 10 kΩ resistor to 3V3.
pub const MINUS_BUTTON_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// I²C bus (16×2 LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
pub const I2C_FREQ_HZ: u32 = 100_000;
/// PCF8574 backpack default address.
pub const LCD_I2C_ADDR: u8 = 0x27;
