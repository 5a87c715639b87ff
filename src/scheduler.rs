//! Interval timers for the cooperative control loop.
//!
//! Every periodic activity owns one last-fired timestamp.  An activity
//! fires when `now - last_fired >= interval`, after which `last_fired`
//! becomes `now`.  Pacing comes entirely from comparing against the
//! monotonic clock handed in by the caller; nothing here sleeps.
//!
//! ```text
//!   now ──▶ ┌──────────────────────── AppService::tick ───────────────────────┐
//!           │ 1. sampling due?   ──▶ SensorSampler ──▶ cache                   │
//!           │ 2. every tick      ──▶ ceiling + ActuationController ──▶ relays  │
//!           │ 3. rotation due?   ──▶ DisplayRotator ──▶ DisplayPort            │
//!           │ 4. telemetry due?  ──▶ telemetry::push ──▶ TelemetryPort         │
//!           └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The display cadence is tracked by `DisplayState::last_switch_ms`, since
//! the rotator has to make that check itself.

use crate::config::SystemConfig;

/// One periodic activity's cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_fired_ms: u64,
}

impl IntervalTimer {
    /// A timer whose first fire is one full interval after boot.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_fired_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    pub fn last_fired_ms(&self) -> u64 {
        self.last_fired_ms
    }

    /// Whether the interval has elapsed at `now_ms`.
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_fired_ms) >= u64::from(self.interval_ms)
    }

    /// Fire if due: returns `true` and restarts the interval from `now_ms`.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.last_fired_ms = now_ms;
        true
    }
}

/// Timers for the interval-gated activities of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleTimers {
    pub sampling: IntervalTimer,
    pub telemetry: IntervalTimer,
}

impl ScheduleTimers {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            sampling: IntervalTimer::new(config.sample_interval_ms),
            telemetry: IntervalTimer::new(config.telemetry_interval_ms),
        }
    }
}
