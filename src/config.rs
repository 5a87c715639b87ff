//! System configuration parameters
//!
//! All tunable parameters for the irrigation controller.  Constructed once
//! at startup (defaults or the NVS-stored blob) and never mutated after the
//! [`AppService`](crate::app::service::AppService) takes ownership.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Fixed-capacity device identifier string.
pub type DeviceId = heapless::String<32>;

/// Supported single-wire climate transducers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhtModel {
    Dht11,
    Dht22,
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Soil moisture (%) below which the pump is started.
    pub soil_moisture_threshold_pct: u8,
    /// Light level (0–1023) below which the grow light is switched on.
    pub light_threshold: u16,

    // --- Pump ---
    /// Hard ceiling on a single pump run (milliseconds).
    pub pump_max_duration_ms: u32,
    /// Minimum pause after the pump stops before it may start again.
    pub pump_cooldown_ms: u32,

    // --- Timing ---
    /// Sensor sample interval (milliseconds).
    pub sample_interval_ms: u32,
    /// Display view rotation interval (milliseconds).
    pub display_interval_ms: u32,
    /// Telemetry push interval (milliseconds).
    pub telemetry_interval_ms: u32,

    // --- ADC calibration ---
    /// Full-scale raw ADC value (12-bit on ESP32).
    pub adc_max: u16,
    /// ADC reference voltage (V).
    pub adc_vref: f32,

    // --- Hardware ---
    /// Relay module polarity: `true` = input LOW energises the coil.
    pub relay_active_low: bool,
    /// Climate transducer model.
    pub dht_model: DhtModel,
    /// I2C address of the LCD backpack.
    pub lcd_address: u8,
    pub lcd_cols: u8,
    pub lcd_rows: u8,

    // --- Identity ---
    /// Device identifier used as the remote-store key.
    /// Empty = derive from the factory MAC.
    pub device_id: DeviceId,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut device_id = DeviceId::new();
        let _ = device_id.push_str("device_001");

        Self {
            // Thresholds
            soil_moisture_threshold_pct: 30,
            light_threshold: 200,

            // Pump
            pump_max_duration_ms: 5_000,
            pump_cooldown_ms: 60_000,

            // Timing
            sample_interval_ms: 2_000,    // 0.5 Hz
            display_interval_ms: 3_000,
            telemetry_interval_ms: 5_000,

            // ADC
            adc_max: 4095,
            adc_vref: 3.3,

            // Hardware
            relay_active_low: false,
            dht_model: DhtModel::Dht11,
            lcd_address: 0x27,
            lcd_cols: 16,
            lcd_rows: 2,

            device_id,
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    ///
    /// Out-of-range values are rejected, not clamped: a corrupted blob must
    /// never silently become e.g. a one-hour pump run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soil_moisture_threshold_pct > 100 {
            return Err(ConfigError::ValidationFailed(
                "soil_moisture_threshold_pct must be 0–100",
            ));
        }
        if self.light_threshold > 1023 {
            return Err(ConfigError::ValidationFailed(
                "light_threshold must be 0–1023",
            ));
        }
        if !(500..=600_000).contains(&self.pump_max_duration_ms) {
            return Err(ConfigError::ValidationFailed(
                "pump_max_duration_ms must be 500–600000",
            ));
        }
        if self.pump_cooldown_ms > 86_400_000 {
            return Err(ConfigError::ValidationFailed(
                "pump_cooldown_ms must be at most one day",
            ));
        }
        if !(100..=3_600_000).contains(&self.sample_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be 100–3600000",
            ));
        }
        if !(250..=60_000).contains(&self.display_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "display_interval_ms must be 250–60000",
            ));
        }
        if !(1_000..=3_600_000).contains(&self.telemetry_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "telemetry_interval_ms must be 1000–3600000",
            ));
        }
        if self.adc_max == 0 {
            return Err(ConfigError::ValidationFailed("adc_max must be non-zero"));
        }
        if !(1.0..=5.5).contains(&self.adc_vref) {
            return Err(ConfigError::ValidationFailed("adc_vref must be 1.0–5.5 V"));
        }
        if !(0x03..=0x77).contains(&self.lcd_address) {
            return Err(ConfigError::ValidationFailed(
                "lcd_address must be a 7-bit I2C address",
            ));
        }
        if !(8..=20).contains(&self.lcd_cols) || !(1..=4).contains(&self.lcd_rows) {
            return Err(ConfigError::ValidationFailed(
                "lcd geometry must be 8–20 cols x 1–4 rows",
            ));
        }
        Ok(())
    }
}
