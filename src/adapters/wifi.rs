//! Wi-Fi station link supervision.
//!
//! The radio is never waited on.  [`LinkSupervisor::poll`] runs once per
//! loop iteration: it mirrors the station state into the
//! [`RemoteStore`] and, while the link is down, kicks off a fresh
//! non-blocking connect at most once per retry interval.  Control keeps
//! running whatever the network does.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: [`ConnectivityPort`] for `EspWifi`,
//!   whose `connect()` only starts the association.
//! - **all other targets**: [`SimWifi`], a link the test flips by hand.

use core::fmt;
use log::{info, warn};

use super::remote_store::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    /// The driver refused to start an association.
    ConnectFailed(i32),
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectFailed(rc) => write!(f, "connect request failed (rc={})", rc),
        }
    }
}

impl core::error::Error for ConnectivityError {}

/// Station-mode link as seen from the loop.  Neither method may block.
pub trait ConnectivityPort {
    fn link_up(&self) -> bool;

    /// Start associating with the configured AP and return immediately.
    fn begin_connect(&mut self) -> Result<(), ConnectivityError>;
}

// ───────────────────────────────────────────────────────────────
// Supervisor
// ───────────────────────────────────────────────────────────────

pub struct LinkSupervisor {
    retry_interval_ms: u32,
    last_attempt_ms: Option<u64>,
    was_up: bool,
    attempts: u32,
}

impl LinkSupervisor {
    pub fn new(retry_interval_ms: u32) -> Self {
        Self {
            retry_interval_ms,
            last_attempt_ms: None,
            was_up: false,
            attempts: 0,
        }
    }

    /// Connect requests issued so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Refresh the store's link flag and retry the association if due.
    ///
    /// Returns whether the link is up.  A store without a host never
    /// goes up, whatever the radio does.
    pub fn poll(
        &mut self,
        now_ms: u64,
        link: &mut impl ConnectivityPort,
        store: &mut RemoteStore,
    ) -> bool {
        let up = link.link_up();
        if up != self.was_up {
            if up {
                info!("WIFI | link up");
            } else {
                warn!("WIFI | link lost, reconnecting every {} ms", self.retry_interval_ms);
            }
            self.was_up = up;
        }
        store.set_link_up(up && store.is_configured());
        if up {
            return true;
        }

        let due = self
            .last_attempt_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= u64::from(self.retry_interval_ms));
        if due {
            self.last_attempt_ms = Some(now_ms);
            self.attempts = self.attempts.saturating_add(1);
            if let Err(e) = link.begin_connect() {
                warn!("WIFI | {}", e);
            }
        }
        false
    }
}

// ── Target ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
impl ConnectivityPort for esp_idf_svc::wifi::EspWifi<'static> {
    fn link_up(&self) -> bool {
        self.is_connected().unwrap_or(false)
    }

    fn begin_connect(&mut self) -> Result<(), ConnectivityError> {
        self.connect()
            .map_err(|e| ConnectivityError::ConnectFailed(e.code()))
    }
}

// ── Host simulation ───────────────────────────────────────────

/// Host stand-in: the link comes up only when the test says so, and only
/// after a connect request.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimWifi {
    ap_reachable: bool,
    associated: bool,
    requests: u32,
}

#[cfg(not(target_os = "espidf"))]
impl SimWifi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the AP into range, or drop it (which also drops the link).
    pub fn sim_set_ap_reachable(&mut self, reachable: bool) {
        self.ap_reachable = reachable;
        if !reachable {
            self.associated = false;
        }
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }
}

#[cfg(not(target_os = "espidf"))]
impl ConnectivityPort for SimWifi {
    fn link_up(&self) -> bool {
        self.associated
    }

    fn begin_connect(&mut self) -> Result<(), ConnectivityError> {
        self.requests += 1;
        self.associated = self.ap_reachable;
        Ok(())
    }
}
