//! Character-display adapter.
//!
//! Implements [`DisplayPort`] on top of the [`Lcd1602`] driver.  Render
//! instructions never fail from the core's point of view: a bus error is
//! logged once per outage and the next render simply tries again.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};

use crate::app::ports::DisplayPort;
use crate::display::RenderCommand;
use crate::drivers::lcd::Lcd1602;
use crate::error::DisplayError;

pub struct LcdDisplay<I2C, D> {
    lcd: Lcd1602<I2C, D>,
    failing: bool,
}

impl<I2C: I2c, D: DelayNs> LcdDisplay<I2C, D> {
    pub fn new(lcd: Lcd1602<I2C, D>) -> Self {
        Self {
            lcd,
            failing: false,
        }
    }

    pub fn into_inner(self) -> Lcd1602<I2C, D> {
        self.lcd
    }

    fn apply(&mut self, cmd: &RenderCommand) -> Result<(), DisplayError> {
        match cmd {
            RenderCommand::Clear => self.lcd.clear(),
            RenderCommand::Print { col, row, text } => {
                self.lcd.set_cursor(*col, *row)?;
                self.lcd.print(text)
            }
        }
    }
}

impl<I2C: I2c, D: DelayNs> DisplayPort for LcdDisplay<I2C, D> {
    fn execute(&mut self, cmd: &RenderCommand) {
        match self.apply(cmd) {
            Ok(()) if self.failing => {
                info!("display: bus recovered");
                self.failing = false;
            }
            Ok(()) => {}
            Err(DisplayError::OutOfBounds) => {
                warn!("display: {:?} outside panel, skipped", cmd);
            }
            Err(e) => {
                if !self.failing {
                    warn!("display: {}", e);
                }
                self.failing = true;
            }
        }
    }
}

/// A display that drops everything, for boards without a panel.
#[derive(Debug, Default)]
pub struct NullDisplay;

impl DisplayPort for NullDisplay {
    fn execute(&mut self, _cmd: &RenderCommand) {}
}
