//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the configuration, the shared [`ControlContext`] and
//! the stateless workers that operate on it.  All I/O flows through port
//! traits injected at call sites, making the whole loop testable with
//! mock adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌──────────────────────────────┐ ──▶ DisplayPort
//!                  │          AppService          │
//! ActuatorPort ◀── │ sample · decide · rotate ·   │ ──▶ TelemetryPort
//!                  │ push          (one tick)     │ ──▶ EventSink
//!                  └──────────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::SystemConfig;
use crate::context::{ActuatorState, ControlContext, SensorReading};
use crate::control::actuation::{self, Thresholds};
use crate::display::{DisplayRotator, DisplayState};
use crate::scheduler::ScheduleTimers;
use crate::sensors::SensorSampler;
use crate::telemetry::{self, TelemetryPayload};

use super::events::{AppEvent, PumpReason};
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort, TelemetryPort};

/// Running counters, for the serial console and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub ticks: u64,
    pub samples: u64,
    /// Samples whose climate read failed.
    pub sensor_faults: u64,
    pub renders: u64,
    pub telemetry_pushes: u64,
    pub telemetry_failures: u64,
    pub pump_activations: u64,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    ctx: ControlContext,
    sampler: SensorSampler,
    rotator: DisplayRotator,
    thresholds: Thresholds,
    stats: LoopStats,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let ctx = ControlContext::new(ScheduleTimers::from_config(&config));
        Self {
            sampler: SensorSampler::new(&config),
            rotator: DisplayRotator::new(config.display_interval_ms),
            thresholds: Thresholds::from_config(&config),
            stats: LoopStats::default(),
            ctx,
            config,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive both relays to the off state and announce startup.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.all_off();
        self.ctx.actuators = ActuatorState::all_off();
        sink.emit(&AppEvent::Started);
        info!(
            "AppService started (soil<{}% light<{} pump max {}ms)",
            self.thresholds.soil_moisture_pct,
            self.thresholds.light_level,
            self.thresholds.pump_max_duration_ms,
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one pass of the cooperative loop at monotonic time `now_ms`.
    ///
    /// Order is fixed: sampling (if due), actuation (always), display
    /// rotation (if due), telemetry (if due).  Nothing in here waits; a
    /// call with nothing due costs a few comparisons.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        display: &mut impl DisplayPort,
        uplink: &mut impl TelemetryPort,
        sink: &mut impl EventSink,
    ) {
        self.stats.ticks += 1;

        // 1. Sampling
        if self.ctx.timers.sampling.fire_if_due(now_ms) {
            self.sample(now_ms, hw, sink);
        }

        // 2. Actuation, every tick so the pump ceiling stays timely
        self.actuate(now_ms, hw, sink);

        // 3. Display rotation
        let (display_state, batch) = self.rotator.tick(
            &self.ctx.reading,
            &self.ctx.actuators,
            self.ctx.display,
            now_ms,
        );
        self.ctx.display = display_state;
        if let Some(batch) = batch {
            display.execute_all(&batch);
            self.stats.renders += 1;
        }

        // 4. Telemetry
        if self.ctx.timers.telemetry.fire_if_due(now_ms) {
            let payload =
                TelemetryPayload::new(&self.config.device_id, &self.ctx.reading, &self.ctx.actuators);
            if telemetry::push(uplink, &payload, &mut self.ctx.uplink, sink) {
                self.stats.telemetry_pushes += 1;
            } else {
                self.stats.telemetry_failures += 1;
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Latest cached reading.
    pub fn reading(&self) -> &SensorReading {
        &self.ctx.reading
    }

    /// Commanded relay state.
    pub fn actuators(&self) -> &ActuatorState {
        &self.ctx.actuators
    }

    pub fn display_state(&self) -> DisplayState {
        self.ctx.display
    }

    pub fn context(&self) -> &ControlContext {
        &self.ctx
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn sample(&mut self, now_ms: u64, hw: &mut impl SensorPort, sink: &mut impl EventSink) {
        let fresh = self.sampler.sample(hw, now_ms);
        self.ctx.reading = fresh.merge_into_cache(&self.ctx.reading);
        self.stats.samples += 1;

        if !fresh.valid {
            self.stats.sensor_faults += 1;
        }
        match (fresh.valid, self.ctx.sensor_faulted) {
            (false, false) => {
                warn!("climate read failed; holding actuators on last valid state");
                self.ctx.sensor_faulted = true;
                sink.emit(&AppEvent::SensorFault);
            }
            (true, true) => {
                info!("climate sensor recovered");
                self.ctx.sensor_faulted = false;
                sink.emit(&AppEvent::SensorRecovered);
            }
            _ => {}
        }
    }

    /// Ceiling, then decision rules, then relay writes on edges only.
    fn actuate(&mut self, now_ms: u64, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let prev = self.ctx.actuators;
        let capped =
            actuation::enforce_pump_ceiling(prev, self.thresholds.pump_max_duration_ms, now_ms);
        let next = actuation::decide(&self.ctx.reading, capped, &self.thresholds, now_ms);
        self.ctx.actuators = next;

        let edges = actuation::edges(&prev, &next);
        if edges.is_empty() {
            return;
        }

        if let Some(on) = edges.pump {
            hw.set_pump(on);
            let reason = if on {
                self.stats.pump_activations += 1;
                PumpReason::SoilDry
            } else {
                if let Some(ran) = prev.pump_elapsed_ms(now_ms) {
                    info!("pump stopped after {} ms", ran);
                }
                PumpReason::MaxDurationReached
            };
            sink.emit(&AppEvent::PumpChanged { on, reason });
        }
        if let Some(on) = edges.led {
            hw.set_grow_light(on);
            sink.emit(&AppEvent::GrowLightChanged {
                on,
                light_level: self.ctx.reading.light_level,
            });
        }
    }
}
