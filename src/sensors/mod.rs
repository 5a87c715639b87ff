//! Sensor subsystem — normalization helpers and the [`SensorSampler`].
//!
//! The sampler pulls raw values through the [`SensorPort`] and produces a
//! [`SensorReading`] that the control loop merges into its cache.  It keeps
//! nothing between calls.

pub mod analog;
pub mod climate;
pub mod light;
pub mod soil;

use log::debug;

use crate::app::ports::SensorPort;
use crate::config::SystemConfig;
use crate::context::SensorReading;

/// Acquires and normalizes one reading per call.
pub struct SensorSampler {
    adc_max: u16,
    adc_vref: f32,
}

impl SensorSampler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            adc_max: config.adc_max,
            adc_vref: config.adc_vref,
        }
    }

    /// Voltage at the pin for a raw count; beyond full scale saturates.
    pub fn volts(&self, raw: u16) -> f32 {
        if self.adc_max == 0 {
            return 0.0;
        }
        f32::from(raw.min(self.adc_max)) / f32::from(self.adc_max) * self.adc_vref
    }

    /// Read every sensor once.
    ///
    /// A failed climate read is not an error: the reading comes back with
    /// `valid == false` and whatever the transducer returned, and the
    /// caller swaps in its last valid temperature/humidity.
    pub fn sample(&self, hw: &mut impl SensorPort, now_ms: u64) -> SensorReading {
        let climate = hw.read_climate();
        let soil_raw = hw.read_soil_raw();
        let light_raw = hw.read_light_raw();

        let reading = SensorReading {
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            soil_moisture_pct: soil::soil_moisture_percent(soil_raw, self.adc_max),
            light_level: light::light_level(light_raw, self.adc_max),
            valid: climate.is_valid(),
            timestamp_ms: now_ms,
        };

        debug!(
            "sample @{}ms: T={:.1}C H={:.1}% soil={}% ({:.2}V) light={} ({:.2}V) valid={}",
            now_ms,
            reading.temperature_c,
            reading.humidity_pct,
            reading.soil_moisture_pct,
            self.volts(soil_raw),
            reading.light_level,
            self.volts(light_raw),
            reading.valid,
        );

        reading
    }
}
