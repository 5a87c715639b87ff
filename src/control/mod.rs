//! Actuation decision logic.
//!
//! Pure functions from (reading, state, thresholds, now) to the next
//! actuator state.  Hardware writes happen in the service, and only on
//! the edges reported by [`actuation::edges`].

pub mod actuation;
