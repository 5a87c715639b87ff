//! Boot-path pieces: config loading, device identity, overlays and the
//! log sink, wired the way the firmware binary wires them.

use crate::mock_hw::{Bench, MockConfig, MockDisplay};

use irrigation::adapters::device_id;
use irrigation::adapters::log_sink::LogEventSink;
use irrigation::adapters::nvs::NvsAdapter;
use irrigation::app::events::{AppEvent, PumpReason};
use irrigation::app::ports::{ConfigError, ConfigPort, DisplayPort, EventSink};
use irrigation::config::{DeviceId, SystemConfig};
use irrigation::display::overlay;
use irrigation::display::RenderCommand;
use irrigation::error::TransportError;

/// Same fallback the binary applies.
fn load_or_default(port: &impl ConfigPort) -> (SystemConfig, Option<ConfigError>) {
    match port.load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (SystemConfig::default(), Some(e)),
    }
}

#[test]
fn stored_thresholds_drive_the_loop() {
    let nvs = NvsAdapter::new().unwrap();
    let stored = SystemConfig {
        soil_moisture_threshold_pct: 60,
        ..SystemConfig::default()
    };
    nvs.store_config(&stored).unwrap();

    let (config, fault) = load_or_default(&nvs);
    assert!(fault.is_none());

    let mut b = Bench::new(config);
    b.hw.set_soil_pct(50);
    b.run(0, 2_000, 10);
    assert_eq!(b.hw.pump_writes(), vec![true], "50 % is dry under a 60 % threshold");
}

#[test]
fn corrupt_config_falls_back_and_shows_error_overlay() {
    let port = MockConfig(Err(ConfigError::Corrupted));
    let (config, fault) = load_or_default(&port);
    assert_eq!(config, SystemConfig::default());
    assert_eq!(fault, Some(ConfigError::Corrupted));

    let mut display = MockDisplay::default();
    display.execute_all(&overlay::error("Config invalid"));
    assert_eq!(display.screen(), vec!["ERROR:", "Config invalid"]);
}

#[test]
fn blank_device_id_is_derived_from_mac() {
    let (mut config, _) = load_or_default(&MockConfig(Ok(SystemConfig {
        device_id: DeviceId::new(),
        ..SystemConfig::default()
    })));
    config.device_id = device_id::resolve(&config.device_id, &device_id::read_mac());
    assert!(config.device_id.starts_with("IRR-"));
    assert_eq!(config.device_id.len(), 10);
}

#[test]
fn connection_overlays_stack_on_one_screen() {
    let mut display = MockDisplay::default();
    display.execute_all(&overlay::boot_splash());
    assert_eq!(display.screen(), vec!["Smart Irrigation", "Initializing..."]);

    display.execute_all(&overlay::wifi_status(true));
    display.execute_all(&overlay::cloud_status(false));
    assert_eq!(display.screen(), vec!["WiFi:", "Connected", "Cloud:", "..."]);
    assert!(display.commands.contains(&RenderCommand::print(7, 1, "...")));
}

#[test]
fn overlays_do_not_disturb_rotation() {
    let mut b = Bench::new(SystemConfig::default());
    b.display.execute_all(&overlay::wifi_status(false));
    b.tick(2_999);
    assert_eq!(b.display.clears(), 1, "only the overlay's clear so far");
    b.tick(3_000);
    assert_eq!(b.display.clears(), 2);
}

#[test]
fn log_sink_accepts_every_event() {
    let mut sink = LogEventSink::new();
    for event in [
        AppEvent::Started,
        AppEvent::PumpChanged {
            on: true,
            reason: PumpReason::SoilDry,
        },
        AppEvent::PumpChanged {
            on: false,
            reason: PumpReason::MaxDurationReached,
        },
        AppEvent::GrowLightChanged {
            on: true,
            light_level: 12,
        },
        AppEvent::SensorFault,
        AppEvent::SensorRecovered,
        AppEvent::TelemetrySent { timestamp_ms: 5_000 },
        AppEvent::TelemetryFailed {
            error: TransportError::Io,
            consecutive: 1,
        },
    ] {
        sink.emit(&event);
    }
}
