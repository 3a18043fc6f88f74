//! LCD display adapter — implements [`DisplayPort`] on the 16×2 LCD.
//!
//! The control loop re-renders every pass, so the adapter caches what each
//! row currently shows and only rewrites a row whose text changed.  Rows
//! are padded with spaces to the full width, overwriting stale characters
//! without a full clear.  Bus errors are logged and absorbed; the failed
//! row is invalidated so the next pass retries it.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};
use log::warn;

use crate::app::ports::DisplayPort;
use crate::drivers::lcd::{LCD_COLS, LCD_ROWS, Lcd};
use crate::error::Error;

type Row = heapless::String<{ LCD_COLS as usize }>;

pub struct LcdDisplay<I, D> {
    lcd: Lcd<I, D>,
    rows: [Option<Row>; LCD_ROWS as usize],
    bus_errors: u32,
}

impl<I: I2c, D: DelayNs> LcdDisplay<I, D> {
    pub fn new(lcd: Lcd<I, D>) -> Self {
        Self {
            lcd,
            rows: [None, None],
            bus_errors: 0,
        }
    }

    /// Run the LCD power-on sequence.
    pub fn init(&mut self) -> Result<(), Error> {
        self.lcd.init().map_err(|e| {
            warn!("LCD init failed: {:?}", e.kind());
            Error::Display("LCD init")
        })?;
        self.rows = [Some(blank()), Some(blank())];
        Ok(())
    }

    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    /// Text the adapter believes row `row` shows (padded).
    pub fn cached_row(&self, row: u8) -> Option<&str> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.as_ref())
            .map(|r| r.as_str())
    }

    fn note_error(&mut self, what: &str, e: &I::Error) {
        self.bus_errors = self.bus_errors.wrapping_add(1);
        warn!("LCD {} failed: {:?}", what, e.kind());
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for LcdDisplay<I, D> {
    fn show_line(&mut self, row: u8, text: &str) {
        let idx = row as usize;
        if idx >= self.rows.len() {
            return;
        }
        let padded = pad(text);
        if self.rows[idx].as_ref() == Some(&padded) {
            return;
        }

        let res = self
            .lcd
            .set_cursor(0, row)
            .and_then(|()| self.lcd.write_str(&padded));
        match res {
            Ok(()) => self.rows[idx] = Some(padded),
            Err(e) => {
                self.rows[idx] = None;
                self.note_error("write", &e);
            }
        }
    }

    fn clear(&mut self) {
        match self.lcd.clear() {
            Ok(()) => self.rows = [Some(blank()), Some(blank())],
            Err(e) => {
                self.rows = [None, None];
                self.note_error("clear", &e);
            }
        }
    }
}

fn blank() -> Row {
    pad("")
}

/// Truncate or space-pad to exactly one LCD row.
fn pad(text: &str) -> Row {
    let mut row = Row::new();
    for c in text.chars().take(LCD_COLS as usize) {
        // Non-ASCII shows as '?' on the LCD anyway; keep one byte per cell.
        let c = if c.is_ascii() { c } else { '?' };
        let _ = row.push(c);
    }
    while row.len() < LCD_COLS as usize {
        let _ = row.push(' ');
    }
    row
}
