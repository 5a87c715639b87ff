//! GPIO / peripheral pin assignments for the irrigation controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11/DHT22 single-wire data line (open drain, external 10 kΩ pull-up).
pub const DHT_GPIO: i32 = 4;

/// Resistive soil-moisture sensor, analog output.
/// ADC1 channel 6 (GPIO 34 on ESP32).
pub const SOIL_ADC_GPIO: i32 = 34;
pub const SOIL_ADC_CHANNEL: u32 = 6;

/// LDR light sensor in a voltage divider, analog output.
/// ADC1 channel 7 (GPIO 35 on ESP32).
pub const LIGHT_ADC_GPIO: i32 = 35;
pub const LIGHT_ADC_CHANNEL: u32 = 7;

// ---------------------------------------------------------------------------
// Relays
// ---------------------------------------------------------------------------

/// Relay driving the water pump.
pub const PUMP_RELAY_GPIO: i32 = 26;
/// Relay driving the grow-light LED strip.
pub const LIGHT_RELAY_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// I²C bus (16x2 LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// Bus clock.  The PCF8574 tops out at 100 kHz.
pub const I2C_FREQ_HZ: u32 = 100_000;
