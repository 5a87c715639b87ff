//! One-shot ADC1 channel reader shared by the soil and light sensors.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the channel via the oneshot API (initialised by
//! `hw_init`).  On host/test: `hw_init` serves values injected with
//! [`hw_init::sim_set_adc`](crate::drivers::hw_init::sim_set_adc).

use crate::drivers::hw_init;

pub struct AnalogSensor {
    channel: u32,
}

impl AnalogSensor {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }

    /// Raw 12-bit count.  A failed conversion reads as 0.
    pub fn read_raw(&self) -> u16 {
        hw_init::adc1_read(self.channel)
    }
}
