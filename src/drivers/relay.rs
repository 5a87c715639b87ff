//! Relay output driver.
//!
//! Wraps any `embedded_hal` [`OutputPin`] and hides the board's relay
//! polarity: many opto-isolated relay boards energise on a LOW input.
//! The driver remembers the last level it was told, so callers can
//! query it without reading the pin back.

use embedded_hal::digital::OutputPin;

use crate::error::ActuatorError;

pub struct RelayDriver<P: OutputPin> {
    pin: P,
    active_low: bool,
    on: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive it to the de-energised level.
    pub fn new(pin: P, active_low: bool) -> Result<Self, ActuatorError> {
        let mut relay = Self {
            pin,
            active_low,
            on: false,
        };
        relay.set(false)?;
        Ok(relay)
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let high = on != self.active_low;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Give the pin back, e.g. for a test to inspect.
    pub fn release(self) -> P {
        self.pin
    }
}
