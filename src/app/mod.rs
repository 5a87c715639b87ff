//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the control loop for the irrigation controller:
//! sampling, actuation, display rotation and telemetry, all driven from
//! one non-blocking tick.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
