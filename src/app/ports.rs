//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, relays, display, uplink, config store)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and runs unchanged against the mocks in `tests/`.
//!
//! ## Blocking contract
//!
//! Every port method is called from inside `AppService::tick` and must
//! return within a bounded time.  Implementations that talk to a network
//! or a slow bus must time-box themselves.

use crate::config::SystemConfig;
use crate::display::RenderCommand;
use crate::error::TransportError;
use crate::sensors::climate::ClimateSample;
use crate::telemetry::TelemetryPayload;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: raw sensor values, not yet normalized.
pub trait SensorPort {
    /// Temperature/humidity pair; NaN in either field signals failure.
    fn read_climate(&mut self) -> ClimateSample;

    /// Raw soil sensor count in `0..=adc_max`.
    fn read_soil_raw(&mut self) -> u16;

    /// Raw light sensor count in `0..=adc_max`.
    fn read_light_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the two relay outputs.
///
/// Called only on state transitions; implementations need not dedupe.
pub trait ActuatorPort {
    fn set_pump(&mut self, on: bool);

    fn set_grow_light(&mut self, on: bool);

    /// De-energise both relays (the boot state).
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → character display)
// ───────────────────────────────────────────────────────────────

/// Executes render instructions on the character display.
pub trait DisplayPort {
    fn execute(&mut self, cmd: &RenderCommand);

    /// Execute a batch in order.
    fn execute_all(&mut self, cmds: &[RenderCommand]) {
        for cmd in cmds {
            self.execute(cmd);
        }
    }
}

impl<P: DisplayPort + ?Sized> DisplayPort for Box<P> {
    fn execute(&mut self, cmd: &RenderCommand) {
        (**self).execute(cmd);
    }
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote store)
// ───────────────────────────────────────────────────────────────

/// Pushes the latest state to the remote store.
///
/// Must be non-blocking or internally time-bounded.  Must not queue:
/// a failed payload is dropped, the next push carries fresher data.
pub trait TelemetryPort {
    fn push(&mut self, payload: &TelemetryPayload) -> Result<(), TransportError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.  Never goes backwards, unaffected by
/// wall-clock adjustment.
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: persistent config → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the system configuration once at startup.
pub trait ConfigPort {
    /// Load and validate the stored configuration.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for ConfigError {}
