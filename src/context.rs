//! Shared mutable context owned by the control loop.
//!
//! `ControlContext` is the single struct that every component reads from
//! and writes to.  It holds the cached sensor reading, actuator state,
//! display rotation state and the schedule timers.  Components never keep
//! state of their own between calls; whatever must survive a tick lives
//! here.

use crate::display::DisplayState;
use crate::error::TransportError;
use crate::scheduler::ScheduleTimers;

// ---------------------------------------------------------------------------
// Sensor reading (written by the sampler, read by everyone else)
// ---------------------------------------------------------------------------

/// One normalized sample of every sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Air temperature (°C).  NaN until the first valid climate read.
    pub temperature_c: f32,
    /// Relative humidity (%).  NaN until the first valid climate read.
    pub humidity_pct: f32,
    /// Soil moisture, 0–100 %.
    pub soil_moisture_pct: u8,
    /// Ambient light, 0–1023.
    pub light_level: u16,
    /// `false` if the climate transducer failed on this sample.
    pub valid: bool,
    /// Monotonic milliseconds at which the sample was taken.
    pub timestamp_ms: u64,
}

impl Default for SensorReading {
    /// The boot-time cache: nothing measured yet, so nothing to act on.
    fn default() -> Self {
        Self {
            temperature_c: f32::NAN,
            humidity_pct: f32::NAN,
            soil_moisture_pct: 0,
            light_level: 0,
            valid: false,
            timestamp_ms: 0,
        }
    }
}

impl SensorReading {
    /// Merge a fresh sample into the cache.
    ///
    /// A valid sample replaces the cache outright.  An invalid one keeps
    /// its soil/light values and timestamp but carries temperature and
    /// humidity over from `cached`, which always holds the last valid pair.
    #[must_use]
    pub fn merge_into_cache(self, cached: &SensorReading) -> SensorReading {
        if self.valid {
            return self;
        }
        SensorReading {
            temperature_c: cached.temperature_c,
            humidity_pct: cached.humidity_pct,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator state (written by the actuation controller)
// ---------------------------------------------------------------------------

/// Logical state of the two relay outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub pump_on: bool,
    /// When the current pump run started.  `None` whenever `pump_on` is false.
    pub pump_activated_at: Option<u64>,
    /// When the last pump run ended.  Drives the restart cooldown.
    pub pump_stopped_at: Option<u64>,
    /// Grow light relay.
    pub led_on: bool,
}

impl ActuatorState {
    /// All outputs off, no pump history.
    pub fn all_off() -> Self {
        Self::default()
    }

    /// Milliseconds the pump has been running at `now`, or `None` if off.
    pub fn pump_elapsed_ms(&self, now_ms: u64) -> Option<u64> {
        self.pump_activated_at
            .filter(|_| self.pump_on)
            .map(|t| now_ms.saturating_sub(t))
    }
}

// ---------------------------------------------------------------------------
// Uplink health (written by telemetry pushes)
// ---------------------------------------------------------------------------

/// Outcome bookkeeping for the telemetry uplink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UplinkHealth {
    /// Failed pushes since the last accepted one.
    pub consecutive_failures: u32,
    /// Cause of the most recent failure; `None` once a push succeeds.
    pub last_error: Option<TransportError>,
}

// ---------------------------------------------------------------------------
// ControlContext
// ---------------------------------------------------------------------------

/// All mutable loop state, owned by the service and lent to one component
/// at a time.
#[derive(Debug, Clone)]
pub struct ControlContext {
    /// Latest merged reading.  Updated only when sampling fires.
    pub reading: SensorReading,
    /// Commanded relay state.
    pub actuators: ActuatorState,
    /// Display rotation position and cadence.
    pub display: DisplayState,
    /// Sampling and telemetry timers.
    pub timers: ScheduleTimers,
    /// Latched while the climate transducer keeps failing.
    pub sensor_faulted: bool,
    pub uplink: UplinkHealth,
}

impl ControlContext {
    pub fn new(timers: ScheduleTimers) -> Self {
        Self {
            reading: SensorReading::default(),
            actuators: ActuatorState::all_off(),
            display: DisplayState::default(),
            timers,
            sensor_faulted: false,
            uplink: UplinkHealth::default(),
        }
    }
}
