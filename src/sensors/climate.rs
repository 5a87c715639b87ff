//! Air temperature / humidity transducer boundary.
//!
//! The transducer protocol lives in [`crate::drivers::dht`]; this module
//! only defines what the sampler gets back and how validity is judged.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: the DHT driver implements [`ClimateTransducer`].
//! On host/test: [`SimClimate`] reads injected values from atomics.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

/// Raw temperature/humidity pair.  Either field may be NaN when the
/// transducer failed; that is the only failure signal it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateSample {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

impl ClimateSample {
    /// The not-a-number sentinel returned on any read failure.
    pub const FAILED: Self = Self {
        temperature_c: f32::NAN,
        humidity_pct: f32::NAN,
    };

    /// Both values are representable numbers.
    pub fn is_valid(&self) -> bool {
        self.temperature_c.is_finite() && self.humidity_pct.is_finite()
    }
}

/// Anything that can produce a [`ClimateSample`] without blocking for
/// longer than its protocol window.
pub trait ClimateTransducer {
    fn read(&mut self) -> ClimateSample;
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41C8_0000); // 25.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_BITS: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0

/// Inject the next simulated climate values (use NaN to simulate a fault).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUM_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Host stand-in for the DHT driver.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimClimate;

#[cfg(not(target_os = "espidf"))]
impl ClimateTransducer for SimClimate {
    fn read(&mut self) -> ClimateSample {
        ClimateSample {
            temperature_c: f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed)),
            humidity_pct: f32::from_bits(SIM_HUM_BITS.load(Ordering::Relaxed)),
        }
    }
}
