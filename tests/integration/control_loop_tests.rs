//! End-to-end tests of the cooperative loop: sampling, actuation,
//! display rotation and telemetry driven by a fake monotonic clock.

use crate::mock_hw::{ActuatorCall, Bench};

use irrigation::app::events::{AppEvent, PumpReason};
use irrigation::config::SystemConfig;
use irrigation::display::DisplayMode;
use irrigation::error::TransportError;

fn dry_bright_bench() -> Bench {
    let mut b = Bench::new(SystemConfig::default());
    b.hw.set_soil_pct(20);
    b.hw.set_light_level(500);
    b
}

// ── Start-up ─────────────────────────────────────────────────

#[test]
fn start_forces_relays_off_and_announces() {
    let b = Bench::new(SystemConfig::default());
    assert_eq!(b.hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(b.sink.events, vec![AppEvent::Started]);
    assert!(!b.app.reading().valid);
}

// ── Pump ceiling ─────────────────────────────────────────────

#[test]
fn dry_soil_runs_pump_for_exactly_the_ceiling() {
    let mut b = dry_bright_bench();

    b.run(0, 1_990, 10);
    assert!(b.hw.pump_writes().is_empty(), "nothing sampled yet");

    b.tick(2_000);
    assert_eq!(b.hw.pump_writes(), vec![true]);
    assert!(b.app.actuators().pump_on);
    assert!(!b.app.actuators().led_on, "light 500 is above threshold 200");
    assert!(b.hw.light_writes().is_empty(), "LED already off, no write");

    // Soil keeps reading 20 % the whole time.
    b.run(2_010, 6_990, 10);
    assert_eq!(b.hw.pump_writes(), vec![true]);

    b.tick(7_000);
    assert_eq!(b.hw.pump_writes(), vec![true, false]);
    assert!(b.sink.events.contains(&AppEvent::PumpChanged {
        on: false,
        reason: PumpReason::MaxDurationReached
    }));
}

#[test]
fn pump_rearms_only_after_cooldown() {
    let mut b = dry_bright_bench();
    b.run(0, 7_000, 10);
    assert_eq!(b.hw.pump_writes(), vec![true, false]);

    b.run(7_010, 66_990, 10);
    assert_eq!(b.hw.pump_writes(), vec![true, false], "still cooling down");

    b.tick(67_000);
    assert_eq!(b.hw.pump_writes(), vec![true, false, true]);
    assert_eq!(b.app.stats().pump_activations, 2);
}

#[test]
fn ceiling_holds_with_sparse_ticks() {
    let mut b = dry_bright_bench();
    b.tick(2_000);
    // Loop stalls for 40 s: the first tick back must stop the pump.
    b.tick(42_000);
    assert_eq!(b.hw.pump_writes(), vec![true, false]);
    assert!(!b.app.actuators().pump_on);
}

#[test]
fn wet_soil_never_starts_pump() {
    let mut b = Bench::new(SystemConfig::default());
    b.hw.set_soil_pct(30);
    b.run(0, 20_000, 100);
    assert!(b.hw.pump_writes().is_empty(), "30 % is not below a 30 % threshold");
}

// ── Grow light ───────────────────────────────────────────────

#[test]
fn grow_light_tracks_level_with_one_write_per_edge() {
    let mut b = Bench::new(SystemConfig::default());
    b.hw.set_light_level(100);
    b.run(0, 4_000, 10);
    assert_eq!(b.hw.light_writes(), vec![true]);

    b.hw.set_light_level(800);
    b.run(4_010, 6_000, 10);
    assert_eq!(b.hw.light_writes(), vec![true, false]);
    assert!(b.sink.events.contains(&AppEvent::GrowLightChanged {
        on: false,
        light_level: 800
    }));
}

// ── Sensor faults ────────────────────────────────────────────

#[test]
fn invalid_reading_freezes_actuators_but_not_the_ceiling() {
    let mut b = dry_bright_bench();
    b.tick(2_000);
    assert_eq!(b.hw.pump_writes(), vec![true]);

    // Transducer dies; soil now reads wet and light dark.
    b.hw.fail_climate();
    b.hw.set_soil_pct(80);
    b.hw.set_light_level(0);
    b.run(2_010, 6_990, 10);

    let r = b.app.reading();
    assert!(!r.valid);
    assert_eq!(r.temperature_c, 24.5, "last valid temperature is kept");
    assert_eq!(r.humidity_pct, 61.0);
    assert_eq!(r.soil_moisture_pct, 80);
    assert!(b.hw.light_writes().is_empty(), "no decision on invalid data");
    assert_eq!(b.hw.pump_writes(), vec![true]);

    b.tick(7_000);
    assert_eq!(b.hw.pump_writes(), vec![true, false]);
}

#[test]
fn fault_before_first_valid_read_shows_placeholders() {
    let mut b = Bench::new(SystemConfig::default());
    b.hw.fail_climate();
    b.hw.set_soil_pct(0);
    b.run(0, 3_000, 10);

    assert!(b.hw.pump_writes().is_empty());
    assert!(b.app.reading().temperature_c.is_nan());
    assert_eq!(b.display.screen(), vec!["Temp: --.-C", "Hum: --.-%"]);
    assert_eq!(
        b.sink.events.iter().filter(|e| **e == AppEvent::SensorFault).count(),
        1
    );
}

// ── Display rotation ─────────────────────────────────────────

#[test]
fn display_renders_once_per_interval() {
    let mut b = Bench::new(SystemConfig::default());
    b.tick(3_000);
    assert_eq!(b.display.clears(), 1);
    assert_eq!(b.app.display_state().mode, DisplayMode::SoilLight);

    b.tick(3_010);
    assert_eq!(b.display.clears(), 1, "10 ms later: nothing");

    b.tick(6_010);
    assert_eq!(b.display.clears(), 2);
    assert_eq!(b.app.display_state().mode, DisplayMode::ActuatorStatus);
    assert_eq!(b.app.stats().renders, 2);
}

#[test]
fn views_cycle_in_order() {
    let mut b = dry_bright_bench();
    b.tick(2_000); // sample + pump on
    b.tick(3_000);
    assert_eq!(b.display.screen(), vec!["Temp: 24.5C", "Hum: 61.0%"]);
    b.tick(6_000);
    assert_eq!(b.display.screen(), vec!["Soil: 20%", "Light: 500"]);
    b.tick(9_000);
    assert_eq!(b.display.screen(), vec!["Pump: OFF", "LED: OFF"]);
    b.tick(12_000);
    assert_eq!(b.app.display_state().mode, DisplayMode::SoilLight);
}

// ── Ordering inside one tick ─────────────────────────────────

#[test]
fn sample_precedes_actuation_display_and_telemetry() {
    let config = SystemConfig {
        sample_interval_ms: 1_000,
        display_interval_ms: 1_000,
        telemetry_interval_ms: 1_000,
        ..SystemConfig::default()
    };
    let mut b = Bench::new(config);
    b.hw.set_soil_pct(20);

    b.tick(1_000);

    // The display already shows the sample taken in this very tick.
    assert_eq!(b.display.screen(), vec!["Temp: 24.5C", "Hum: 61.0%"]);
    // The payload carries both the fresh sample and the pump it started.
    let p = &b.uplink.delivered[0];
    assert!(p.sensors.valid);
    assert_eq!(p.sensors.timestamp, 1_000);
    assert_eq!(p.sensors.soil_moisture, 20);
    assert!(p.actuators.pump);
}

// ── Telemetry ────────────────────────────────────────────────

#[test]
fn telemetry_failures_never_stall_the_loop_and_nothing_is_queued() {
    let mut b = dry_bright_bench();
    b.uplink.fail_with = Some(TransportError::Timeout);

    b.run(0, 20_000, 10);
    assert_eq!(b.uplink.attempts, 4, "one attempt per interval, no retry storm");
    assert_eq!(b.app.stats().telemetry_failures, 4);
    assert_eq!(b.app.stats().samples, 10);
    assert_eq!(b.hw.pump_writes(), vec![true, false]);

    b.uplink.fail_with = None;
    b.run(20_010, 25_000, 10);
    assert_eq!(b.uplink.delivered.len(), 1, "old samples are not replayed");
    assert_eq!(b.uplink.delivered[0].sensors.timestamp, 24_000);
    assert_eq!(b.app.stats().telemetry_pushes, 1);
}

#[test]
fn idle_ticks_do_no_work() {
    let mut b = Bench::new(SystemConfig::default());
    b.run(0, 1_999, 1);
    let s = b.app.stats();
    assert_eq!(s.ticks, 2_000);
    assert_eq!(s.samples, 0);
    assert_eq!(s.renders, 0);
    assert_eq!(b.hw.sensor_reads, 0);
    assert_eq!(b.uplink.attempts, 0);
    assert_eq!(b.hw.calls, vec![ActuatorCall::AllOff]);
}
