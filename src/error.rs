//! Error types for the irrigation firmware, one enum per subsystem.
//!
//! All variants are `Copy` so they can be passed through events and
//! counters without allocation.
//!
//! None of these ever escape `AppService::tick`: the control loop logs
//! them and carries on.

use core::fmt;

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The transducer did not answer within its protocol window.
    Timeout,
    /// The transducer frame failed its checksum.
    Checksum,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "transducer timeout"),
            Self::Checksum => write!(f, "transducer checksum mismatch"),
        }
    }
}

impl core::error::Error for SensorError {}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl core::error::Error for ActuatorError {}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The I2C backpack NAKed or the bus faulted.
    Bus,
    /// Cursor position outside the panel geometry.
    OutOfBounds,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "I2C bus error"),
            Self::OutOfBounds => write!(f, "cursor out of bounds"),
        }
    }
}

impl core::error::Error for DisplayError {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// Failures of the telemetry uplink.  All of them are transient from the
/// control loop's point of view: the next scheduled push simply tries again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No network link is up.
    NotConnected,
    /// The request did not complete within the uplink's time bound.
    Timeout,
    /// The remote store answered with a non-success HTTP status.
    Rejected(u16),
    /// The payload could not be encoded.
    Encode,
    /// Socket / TLS level failure.
    Io,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Timeout => write!(f, "request timed out"),
            Self::Rejected(status) => write!(f, "rejected with HTTP {status}"),
            Self::Encode => write!(f, "payload encoding failed"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

impl core::error::Error for TransportError {}
