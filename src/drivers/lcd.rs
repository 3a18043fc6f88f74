//! HD44780 16×2 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps one expander byte onto the LCD bus:
//!
//! | Bit | Signal |
//! |-----|--------|
//! | P0  | RS     |
//! | P1  | RW     |
//! | P2  | EN     |
//! | P3  | Backlight |
//! | P4–P7 | D4–D7 |
//!
//! so every byte is sent as two 4-bit nibbles, each latched by pulsing EN.
//! Generic over `embedded-hal` 1.0 [`I2c`] and [`DelayNs`] so the same code
//! drives `esp-idf-hal`'s `I2cDriver` on the device and a recording mock on
//! the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

pub const LCD_COLS: u8 = 16;
pub const LCD_ROWS: u8 = 2;

// RW (P1) is tied low: the driver never reads the LCD.
const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

// HD44780 instructions.
const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x04;
const CMD_DISPLAY_CTRL: u8 = 0x08;
const CMD_FUNCTION_SET: u8 = 0x20;
const CMD_SET_DDRAM: u8 = 0x80;

const ENTRY_LEFT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const FUNC_2LINE: u8 = 0x08;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; LCD_ROWS as usize] = [0x00, 0x40];

pub struct Lcd<I, D> {
    i2c: I,
    delay: D,
    addr: u8,
    backlight: u8,
}

impl<I: I2c, D: DelayNs> Lcd<I, D> {
    pub fn new(i2c: I, delay: D, addr: u8) -> Self {
        Self {
            i2c,
            delay,
            addr,
            backlight: BACKLIGHT,
        }
    }

    /// Power-on sequence: force 4-bit mode, 2 lines, display on, cleared.
    pub fn init(&mut self) -> Result<(), I::Error> {
        // >40 ms after Vcc rises.
        self.delay.delay_ms(50);
        self.expander_write(0)?;

        // Three 8-bit "function set" nibbles, then switch to 4-bit.
        for wait_us in [4500, 4500, 150] {
            self.write_nibble(0x30)?;
            self.delay.delay_us(wait_us);
        }
        self.write_nibble(0x20)?;

        self.command(CMD_FUNCTION_SET | FUNC_2LINE)?;
        self.command(CMD_DISPLAY_CTRL | DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE | ENTRY_LEFT)?;
        log::info!("LCD: initialised at 0x{:02X}", self.addr);
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), I::Error> {
        self.command(CMD_CLEAR)?;
        // Clear is the slow instruction (1.52 ms).
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor.  Out-of-range positions are clamped.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), I::Error> {
        let row = row.min(LCD_ROWS - 1) as usize;
        let col = col.min(LCD_COLS - 1);
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row] + col))
    }

    /// Write ASCII text at the cursor.  Non-ASCII bytes show as `?`.
    pub fn write_str(&mut self, text: &str) -> Result<(), I::Error> {
        for b in text.bytes() {
            let b = if b.is_ascii() && !b.is_ascii_control() {
                b
            } else {
                b'?'
            };
            self.send(b, RS)?;
        }
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), I::Error> {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    // ── Internal ──────────────────────────────────────────────

    fn command(&mut self, cmd: u8) -> Result<(), I::Error> {
        self.send(cmd, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), I::Error> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    fn write_nibble(&mut self, data: u8) -> Result<(), I::Error> {
        self.expander_write(data)?;
        self.expander_write(data | EN)?;
        self.delay.delay_us(1);
        self.expander_write(data & !EN)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), I::Error> {
        self.i2c.write(self.addr, &[data | self.backlight])
    }
}
