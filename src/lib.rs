//! Irrigation controller firmware library.
//!
//! Exposes the control loop and its adapters for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; on the host the same modules run against
//! simulation stand-ins.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod context;
pub mod control;
pub mod display;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod scheduler;
pub mod sensors;
pub mod telemetry;
