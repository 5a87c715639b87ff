//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing each application event as one
//! tagged line to the logger (UART / USB-CDC in production), e.g.
//! `PUMP | on (soil dry)`.  Tags are fixed so the console can be grepped.

use log::{info, warn};

use crate::app::events::{AppEvent, PumpReason};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | relays off, loop running");
            }
            AppEvent::PumpChanged { on: true, reason } => {
                info!("PUMP | on ({})", reason_str(*reason));
            }
            AppEvent::PumpChanged { on: false, reason } => {
                info!("PUMP | off ({})", reason_str(*reason));
            }
            AppEvent::GrowLightChanged { on, light_level } => {
                info!(
                    "LIGHT | {} (level={})",
                    if *on { "on" } else { "off" },
                    light_level
                );
            }
            AppEvent::SensorFault => {
                warn!("SENSOR | climate read failed, actuation frozen");
            }
            AppEvent::SensorRecovered => {
                info!("SENSOR | climate read recovered");
            }
            AppEvent::TelemetrySent { timestamp_ms } => {
                log::debug!("TELEM | pushed sample @{}ms", timestamp_ms);
            }
            AppEvent::TelemetryFailed { error, consecutive } => {
                // First failure only; the sync layer already logs changes of cause.
                if *consecutive == 1 {
                    warn!("TELEM | push failed: {}", error);
                }
            }
        }
    }
}

fn reason_str(reason: PumpReason) -> &'static str {
    match reason {
        PumpReason::SoilDry => "soil dry",
        PumpReason::MaxDurationReached => "max duration reached",
    }
}
