//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::TransportError;

/// Why the pump relay changed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpReason {
    /// Soil moisture fell below threshold.
    SoilDry,
    /// The run reached its maximum duration.
    MaxDurationReached,
}

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started; relays are off.
    Started,

    /// The pump relay switched.
    PumpChanged { on: bool, reason: PumpReason },

    /// The grow-light relay switched.
    GrowLightChanged { on: bool, light_level: u16 },

    /// The climate transducer started failing; actuation is frozen.
    SensorFault,

    /// The climate transducer is back.
    SensorRecovered,

    /// A telemetry payload was accepted by the remote store.
    TelemetrySent { timestamp_ms: u64 },

    /// A telemetry push failed; the next interval will try again.
    TelemetryFailed {
        error: TransportError,
        consecutive: u32,
    },
}
