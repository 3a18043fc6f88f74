//! Peripheral drivers: button tracking, hardware initialisation, the LCD,
//! relay/buzzer outputs, and the task watchdog.

pub mod button;
pub mod hw_init;
pub mod lcd;
pub mod output;
pub mod watchdog;
