//! HD44780 character LCD behind a PCF8574 I2C expander
//!
//! The controller protocol itself comes from `hd44780-driver`; this module
//! maps a 20x4 panel's (row, column) addressing onto it and exposes it as a
//! [`DisplayBackend`].

use embedded_hal_02::blocking::delay::{DelayMs, DelayUs};
use embedded_hal_02::blocking::i2c::Write;
use hd44780_driver::bus::{DataBus, I2CBus};
use hd44780_driver::{CursorBlink, HD44780};

use crate::backend::{DisplayBackend, DisplayError};

/// Usual address of the yellow PCF8574A backpacks
pub const DEFAULT_ADDRESS: u8 = 0x3F;

const COLS: u8 = 20;
const ROWS: u8 = 4;

/// DDRAM start address of each row on a 20x4 panel
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

impl From<hd44780_driver::error::Error> for DisplayError {
    fn from(_: hd44780_driver::error::Error) -> Self {
        DisplayError::Communication
    }
}

/// 20x4 HD44780 panel
pub struct Hd44780<B: DataBus, D> {
    lcd: HD44780<B>,
    delay: D,
}

impl<I2C: Write, D: DelayUs<u16> + DelayMs<u8>> Hd44780<I2CBus<I2C>, D> {
    /// Initialise the panel on an I2C backpack at `address`
    pub fn new_i2c(i2c: I2C, address: u8, mut delay: D) -> Result<Self, DisplayError> {
        let lcd = HD44780::new_i2c(i2c, address, &mut delay)?;
        Ok(Self::new(lcd, delay))
    }
}

impl<B: DataBus, D: DelayUs<u16> + DelayMs<u8>> Hd44780<B, D> {
    /// Wrap an already initialised driver
    pub fn new(lcd: HD44780<B>, delay: D) -> Self {
        Self { lcd, delay }
    }

    fn move_to(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.lcd
            .set_cursor_pos(ROW_OFFSETS[row as usize] + col, &mut self.delay)?;
        Ok(())
    }
}

impl<B: DataBus, D: DelayUs<u16> + DelayMs<u8>> DisplayBackend for Hd44780<B, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.lcd.clear(&mut self.delay)?;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.move_to(row, col)?;
        // Past the last column the controller wraps onto another row
        let room = (COLS - col) as usize;
        let end = text
            .char_indices()
            .nth(room)
            .map_or(text.len(), |(i, _)| i);
        self.lcd.write_str(&text[..end], &mut self.delay)?;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        self.move_to(row, col)
    }

    fn set_blink(&mut self, on: bool) -> Result<(), DisplayError> {
        let blink = if on { CursorBlink::On } else { CursorBlink::Off };
        self.lcd.set_cursor_blink(blink, &mut self.delay)?;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (COLS, ROWS)
    }
}
