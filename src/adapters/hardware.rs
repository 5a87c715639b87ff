//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the climate transducer, both analog sensors and both relay
//! drivers, exposing them through [`SensorPort`] and [`ActuatorPort`].
//! Generic over the pin and transducer types so the same adapter runs
//! with `esp_idf_svc::hal` pins on target and with fakes on host.

use embedded_hal::digital::OutputPin;
use log::error;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::relay::RelayDriver;
use crate::pins;
use crate::sensors::analog::AnalogSensor;
use crate::sensors::climate::{ClimateSample, ClimateTransducer};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin, C: ClimateTransducer> {
    climate: C,
    soil: AnalogSensor,
    light: AnalogSensor,
    pump: RelayDriver<P>,
    grow_light: RelayDriver<P>,
}

impl<P: OutputPin, C: ClimateTransducer> HardwareAdapter<P, C> {
    pub fn new(climate: C, pump: RelayDriver<P>, grow_light: RelayDriver<P>) -> Self {
        Self {
            climate,
            soil: AnalogSensor::new(pins::SOIL_ADC_CHANNEL),
            light: AnalogSensor::new(pins::LIGHT_ADC_CHANNEL),
            pump,
            grow_light,
        }
    }

    pub fn pump_is_on(&self) -> bool {
        self.pump.is_on()
    }

    pub fn grow_light_is_on(&self) -> bool {
        self.grow_light.is_on()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin, C: ClimateTransducer> SensorPort for HardwareAdapter<P, C> {
    fn read_climate(&mut self) -> ClimateSample {
        self.climate.read()
    }

    fn read_soil_raw(&mut self) -> u16 {
        self.soil.read_raw()
    }

    fn read_light_raw(&mut self) -> u16 {
        self.light.read_raw()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin, C: ClimateTransducer> ActuatorPort for HardwareAdapter<P, C> {
    fn set_pump(&mut self, on: bool) {
        if let Err(e) = self.pump.set(on) {
            error!("PUMP | relay write failed: {}", e);
        }
    }

    fn set_grow_light(&mut self, on: bool) {
        if let Err(e) = self.grow_light.set(on) {
            error!("LIGHT | relay write failed: {}", e);
        }
    }

    fn all_off(&mut self) {
        self.set_pump(false);
        self.set_grow_light(false);
    }
}
