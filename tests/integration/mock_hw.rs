//! Mock adapters for integration tests.
//!
//! Every port call is recorded so tests can assert on the full history
//! without touching real GPIO, ADC, I2C or network.

use irrigation::app::events::AppEvent;
use irrigation::app::ports::{
    ActuatorPort, ConfigError, ConfigPort, DisplayPort, EventSink, SensorPort, TelemetryPort,
};
use irrigation::app::service::AppService;
use irrigation::config::SystemConfig;
use irrigation::display::RenderCommand;
use irrigation::error::TransportError;
use irrigation::sensors::climate::ClimateSample;
use irrigation::telemetry::TelemetryPayload;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Pump(bool),
    GrowLight(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

/// Sensor inputs are plain fields the test sets; actuator calls are
/// appended to `calls`.
pub struct MockHardware {
    pub climate: ClimateSample,
    pub soil_raw: u16,
    pub light_raw: u16,
    pub calls: Vec<ActuatorCall>,
    pub sensor_reads: usize,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            climate: ClimateSample {
                temperature_c: 24.5,
                humidity_pct: 61.0,
            },
            soil_raw: 2048,
            light_raw: 2048,
            calls: Vec::new(),
            sensor_reads: 0,
        }
    }

    /// Raw count that normalizes to `pct` soil moisture (12-bit ADC).
    pub fn set_soil_pct(&mut self, pct: u8) {
        self.soil_raw = 4095 - (u32::from(pct) * 4095 / 100) as u16;
    }

    /// Raw count that normalizes to roughly `level` (12-bit ADC).
    pub fn set_light_level(&mut self, level: u16) {
        self.light_raw = (u32::from(level) * 4095 / 1023) as u16;
    }

    pub fn fail_climate(&mut self) {
        self.climate = ClimateSample::FAILED;
    }

    pub fn pump_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Pump(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub fn light_writes(&self) -> Vec<bool> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::GrowLight(on) => Some(*on),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn read_climate(&mut self) -> ClimateSample {
        self.sensor_reads += 1;
        self.climate
    }

    fn read_soil_raw(&mut self) -> u16 {
        self.soil_raw
    }

    fn read_light_raw(&mut self) -> u16 {
        self.light_raw
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Pump(on));
    }

    fn set_grow_light(&mut self, on: bool) {
        self.calls.push(ActuatorCall::GrowLight(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub commands: Vec<RenderCommand>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn clears(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Clear))
            .count()
    }

    /// Text printed since the most recent clear.
    pub fn screen(&self) -> Vec<String> {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, RenderCommand::Clear))
            .map_or(0, |i| i + 1);
        self.commands[start..]
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Print { text, .. } => Some(text.as_str().to_string()),
                RenderCommand::Clear => None,
            })
            .collect()
    }
}

impl DisplayPort for MockDisplay {
    fn execute(&mut self, cmd: &RenderCommand) {
        self.commands.push(cmd.clone());
    }
}

// ── MockUplink ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUplink {
    pub fail_with: Option<TransportError>,
    pub attempts: usize,
    pub delivered: Vec<TelemetryPayload>,
}

impl TelemetryPort for MockUplink {
    fn push(&mut self, payload: &TelemetryPayload) -> Result<(), TransportError> {
        self.attempts += 1;
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.delivered.push(payload.clone());
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockConfig ────────────────────────────────────────────────

pub struct MockConfig(pub Result<SystemConfig, ConfigError>);

impl ConfigPort for MockConfig {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        self.0.clone()
    }
}

// ── Bench: the service plus every mock, driven by a fake clock ──

pub struct Bench {
    pub app: AppService,
    pub hw: MockHardware,
    pub display: MockDisplay,
    pub uplink: MockUplink,
    pub sink: RecordingSink,
}

#[allow(dead_code)]
impl Bench {
    pub fn new(config: SystemConfig) -> Self {
        let mut bench = Self {
            app: AppService::new(config),
            hw: MockHardware::new(),
            display: MockDisplay::default(),
            uplink: MockUplink::default(),
            sink: RecordingSink::default(),
        };
        bench.app.start(&mut bench.hw, &mut bench.sink);
        bench
    }

    pub fn tick(&mut self, now_ms: u64) {
        self.app.tick(
            now_ms,
            &mut self.hw,
            &mut self.display,
            &mut self.uplink,
            &mut self.sink,
        );
    }

    /// Tick every `step_ms` from `from_ms` through `to_ms` inclusive.
    pub fn run(&mut self, from_ms: u64, to_ms: u64, step_ms: u64) {
        let mut t = from_ms;
        while t <= to_ms {
            self.tick(t);
            t += step_ms;
        }
    }
}
