//! Threshold + duration-bounded actuation rules.
//!
//! ## Pump
//!
//! Edge-triggered.  Starts when soil moisture drops below the threshold
//! while the pump is off and the restart cooldown has elapsed.  Once
//! running it is never re-triggered; it stops when the run reaches
//! `pump_max_duration_ms`, whatever the soil reading says.  The ceiling is
//! the only way an automatic run ends.
//!
//! ## Grow light
//!
//! Level-triggered: on whenever the light level is below threshold.
//!
//! ## Invalid readings
//!
//! [`decide`] returns the state untouched.  The pump ceiling must still
//! hold while the transducer is faulted, so the service applies
//! [`enforce_pump_ceiling`] every tick on its own.

use crate::config::SystemConfig;
use crate::context::{ActuatorState, SensorReading};

/// The subset of [`SystemConfig`] the decision rules need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub soil_moisture_pct: u8,
    pub light_level: u16,
    pub pump_max_duration_ms: u32,
    pub pump_cooldown_ms: u32,
}

impl Thresholds {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            soil_moisture_pct: config.soil_moisture_threshold_pct,
            light_level: config.light_threshold,
            pump_max_duration_ms: config.pump_max_duration_ms,
            pump_cooldown_ms: config.pump_cooldown_ms,
        }
    }
}

/// Stop the pump if its current run has reached `max_ms`.
///
/// A running pump without an activation time is treated as expired.
#[must_use]
pub fn enforce_pump_ceiling(state: ActuatorState, max_ms: u32, now_ms: u64) -> ActuatorState {
    if !state.pump_on {
        return state;
    }
    let expired = match state.pump_activated_at {
        Some(started) => now_ms.saturating_sub(started) >= u64::from(max_ms),
        None => true,
    };
    if !expired {
        return state;
    }
    ActuatorState {
        pump_on: false,
        pump_activated_at: None,
        pump_stopped_at: Some(now_ms),
        ..state
    }
}

fn cooldown_elapsed(state: &ActuatorState, cooldown_ms: u32, now_ms: u64) -> bool {
    state
        .pump_stopped_at
        .is_none_or(|stopped| now_ms.saturating_sub(stopped) >= u64::from(cooldown_ms))
}

/// Compute the next actuator state.
#[must_use]
pub fn decide(
    reading: &SensorReading,
    state: ActuatorState,
    thresholds: &Thresholds,
    now_ms: u64,
) -> ActuatorState {
    if !reading.valid {
        return state;
    }

    let mut next = state;

    if next.pump_on {
        next = enforce_pump_ceiling(next, thresholds.pump_max_duration_ms, now_ms);
    } else if reading.soil_moisture_pct < thresholds.soil_moisture_pct
        && cooldown_elapsed(&next, thresholds.pump_cooldown_ms, now_ms)
    {
        next.pump_on = true;
        next.pump_activated_at = Some(now_ms);
    }

    next.led_on = reading.light_level < thresholds.light_level;
    next
}

/// Output transitions between two states; `None` = unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges {
    pub pump: Option<bool>,
    pub led: Option<bool>,
}

impl Edges {
    pub fn is_empty(&self) -> bool {
        self.pump.is_none() && self.led.is_none()
    }
}

pub fn edges(prev: &ActuatorState, next: &ActuatorState) -> Edges {
    Edges {
        pump: (prev.pump_on != next.pump_on).then_some(next.pump_on),
        led: (prev.led_on != next.led_on).then_some(next.led_on),
    }
}
