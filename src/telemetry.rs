//! Telemetry payload and the push bookkeeping around [`TelemetryPort`].
//!
//! [`push`] keeps no state of its own; failure counts live in
//! [`UplinkHealth`] inside the loop context.
//!
//! The payload is the wire shape the remote store expects:
//!
//! ```json
//! {"deviceId":"device_001",
//!  "sensors":{"temperature":24.5,"humidity":61.0,"soilMoisture":20,
//!             "lightLevel":500,"valid":true,"timestamp":12000},
//!  "actuators":{"pump":true,"led":false}}
//! ```
//!
//! Nothing is ever queued.  A push that fails is forgotten; the next
//! interval sends whatever is current then.

use log::{info, warn};
use serde::Serialize;

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, TelemetryPort};
use crate::config::DeviceId;
use crate::context::{ActuatorState, SensorReading, UplinkHealth};
use crate::error::TransportError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorBlock {
    /// Serializes as `null` while no valid climate read exists.
    pub temperature: f32,
    pub humidity: f32,
    pub soil_moisture: u8,
    pub light_level: u16,
    pub valid: bool,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorBlock {
    pub pump: bool,
    pub led: bool,
}

/// One snapshot for the remote store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    pub device_id: DeviceId,
    pub sensors: SensorBlock,
    pub actuators: ActuatorBlock,
}

impl TelemetryPayload {
    pub fn new(device_id: &DeviceId, reading: &SensorReading, actuators: &ActuatorState) -> Self {
        Self {
            device_id: device_id.clone(),
            sensors: SensorBlock {
                temperature: reading.temperature_c,
                humidity: reading.humidity_pct,
                soil_moisture: reading.soil_moisture_pct,
                light_level: reading.light_level,
                valid: reading.valid,
                timestamp: reading.timestamp_ms,
            },
            actuators: ActuatorBlock {
                pump: actuators.pump_on,
                led: actuators.led_on,
            },
        }
    }

    /// Serialize to the JSON body sent to the store.
    pub fn to_json(&self) -> Result<Vec<u8>, TransportError> {
        serde_json::to_vec(self).map_err(|_| TransportError::Encode)
    }
}

/// Push one payload.  Returns `true` if the store accepted it.
///
/// Errors never propagate: they are counted in `health`, logged when the
/// cause changes, reported through the sink, and the caller carries on.
pub fn push(
    port: &mut impl TelemetryPort,
    payload: &TelemetryPayload,
    health: &mut UplinkHealth,
    sink: &mut impl EventSink,
) -> bool {
    match port.push(payload) {
        Ok(()) => {
            if health.consecutive_failures > 0 {
                info!(
                    "telemetry recovered after {} failed push(es)",
                    health.consecutive_failures
                );
            }
            *health = UplinkHealth::default();
            sink.emit(&AppEvent::TelemetrySent {
                timestamp_ms: payload.sensors.timestamp,
            });
            true
        }
        Err(e) => {
            health.consecutive_failures = health.consecutive_failures.saturating_add(1);
            if health.last_error != Some(e) {
                warn!("telemetry push failed: {} (will retry next interval)", e);
            }
            health.last_error = Some(e);
            sink.emit(&AppEvent::TelemetryFailed {
                error: e,
                consecutive: health.consecutive_failures,
            });
            false
        }
    }
}
