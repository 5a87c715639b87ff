//! Rotating status views.
//!
//! Each time the rotation interval has elapsed since the last switch, the
//! rotator renders the current view and advances one step.  It never
//! catches up on missed intervals: however late the call, one render and
//! one step, and the cadence restarts from `now`.

use super::{DisplayMode, DisplayState, RenderBatch, RenderCommand};
use crate::context::{ActuatorState, SensorReading};

pub struct DisplayRotator {
    interval_ms: u32,
}

impl DisplayRotator {
    pub fn new(interval_ms: u32) -> Self {
        Self { interval_ms }
    }

    /// Advance the rotation if due.
    ///
    /// Returns the new state and, if the interval elapsed, the batch to
    /// render.  When not due, the state comes back unchanged.
    pub fn tick(
        &self,
        reading: &SensorReading,
        actuators: &ActuatorState,
        state: DisplayState,
        now_ms: u64,
    ) -> (DisplayState, Option<RenderBatch>) {
        if now_ms.saturating_sub(state.last_switch_ms) < u64::from(self.interval_ms) {
            return (state, None);
        }

        let batch = render_view(state.mode, reading, actuators);
        let next = DisplayState {
            mode: state.mode.next(),
            last_switch_ms: now_ms,
        };
        (next, Some(batch))
    }
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Render one view on a cleared panel.
pub fn render_view(
    mode: DisplayMode,
    reading: &SensorReading,
    actuators: &ActuatorState,
) -> RenderBatch {
    let mut batch = RenderBatch::new();
    let _ = batch.push(RenderCommand::Clear);

    let (top, bottom) = match mode {
        DisplayMode::Climate => {
            let top = if reading.temperature_c.is_finite() {
                RenderCommand::print_fmt(0, 0, format_args!("Temp: {:.1}C", reading.temperature_c))
            } else {
                RenderCommand::print(0, 0, "Temp: --.-C")
            };
            let bottom = if reading.humidity_pct.is_finite() {
                RenderCommand::print_fmt(0, 1, format_args!("Hum: {:.1}%", reading.humidity_pct))
            } else {
                RenderCommand::print(0, 1, "Hum: --.-%")
            };
            (top, bottom)
        }
        DisplayMode::SoilLight => (
            RenderCommand::print_fmt(0, 0, format_args!("Soil: {}%", reading.soil_moisture_pct)),
            RenderCommand::print_fmt(0, 1, format_args!("Light: {}", reading.light_level)),
        ),
        DisplayMode::ActuatorStatus => (
            RenderCommand::print_fmt(0, 0, format_args!("Pump: {}", on_off(actuators.pump_on))),
            RenderCommand::print_fmt(0, 1, format_args!("LED: {}", on_off(actuators.led_on))),
        ),
    };
    let _ = batch.push(top);
    let _ = batch.push(bottom);
    batch
}
