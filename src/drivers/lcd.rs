//! HD44780 character LCD behind a PCF8574 I2C backpack.
//!
//! The backpack maps its eight port bits onto the LCD like this:
//!
//! ```text
//!   P7 P6 P5 P4 | P3        P2  P1  P0
//!   D7 D6 D5 D4 | backlight E   RW  RS
//! ```
//!
//! so the panel runs in 4-bit mode: every byte goes out as two nibbles,
//! each latched by an E pulse.  RW is tied to write.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::DisplayError;

const RS: u8 = 0x01;
const ENABLE: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    cursor_col: u8,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    /// Run the HD44780 4-bit init sequence and leave the panel cleared.
    pub fn new(i2c: I2C, delay: D, address: u8, cols: u8, rows: u8) -> Result<Self, DisplayError> {
        let mut lcd = Self {
            i2c,
            delay,
            address,
            cols,
            rows: rows.min(ROW_OFFSETS.len() as u8),
            cursor_col: 0,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on wait, then force 8-bit mode three times before dropping to 4-bit.
        self.delay.delay_ms(50);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(4_500);
        self.write_nibble(0x30, 0)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        // Clear is the one slow instruction (1.52 ms).
        self.delay.delay_ms(2);
        self.cursor_col = 0;
        Ok(())
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))?;
        self.cursor_col = col;
        Ok(())
    }

    /// Write text at the cursor.  Characters past the last column are
    /// dropped rather than wrapping into another row's DDRAM.
    pub fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            if self.cursor_col >= self.cols {
                break;
            }
            let byte = if ch.is_ascii() && !ch.is_ascii_control() {
                ch as u8
            } else {
                b'?'
            };
            self.send(byte, RS)?;
            self.cursor_col += 1;
        }
        Ok(())
    }

    /// Hand the bus and delay back.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // ── Internal ──────────────────────────────────────────────

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, 0)
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(value & 0xF0, mode)?;
        self.write_nibble(value << 4, mode)
    }

    fn write_nibble(&mut self, high_nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = (high_nibble & 0xF0) | mode;
        self.expander_write(bits | ENABLE)?;
        self.delay.delay_us(1);
        self.expander_write(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        // Backlight stays lit for the life of the panel.
        self.i2c
            .write(self.address, &[bits | BACKLIGHT])
            .map_err(|_| DisplayError::Bus)
    }
}
