//! Remote-store telemetry adapter.
//!
//! Implements [`TelemetryPort`] by sending each payload as a JSON `PATCH`
//! to `https://<host>/devices/<device id>.json?auth=<secret>`, which
//! merges it into the device's node of the realtime database.
//!
//! - **`target_os = "espidf"`** — `esp_idf_svc::http::client` over TLS
//!   with the built-in certificate bundle.  Every request is bounded by
//!   the configured timeout, so a dead link costs at most one timeout
//!   per telemetry interval.
//! - **`not(target_os = "espidf")`** — records each body and can be told
//!   to fail, for host tests.

use log::debug;

use crate::app::ports::TelemetryPort;
use crate::error::TransportError;
use crate::telemetry::TelemetryPayload;

#[cfg(target_os = "espidf")]
use embedded_svc::http::client::Client as HttpClient;
#[cfg(target_os = "espidf")]
use embedded_svc::http::{Method, Status};
#[cfg(target_os = "espidf")]
use embedded_svc::io::Write;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};

/// Default per-request time bound.
pub const DEFAULT_TIMEOUT_MS: u32 = 3_000;

/// Where and how to reach the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteStoreConfig {
    /// Host name only, e.g. `my-project.firebaseio.com`.
    pub host: String,
    /// Database secret appended as the `auth` query parameter.
    pub auth: String,
    pub timeout_ms: u32,
}

impl RemoteStoreConfig {
    /// Full request URL for `device_id`.
    pub fn url(&self, device_id: &str) -> String {
        format!(
            "https://{}/devices/{}.json?auth={}",
            self.host, device_id, self.auth
        )
    }
}

pub struct RemoteStore {
    config: RemoteStoreConfig,
    link_up: bool,
    #[cfg(target_os = "espidf")]
    client: Option<HttpClient<EspHttpConnection>>,
    #[cfg(not(target_os = "espidf"))]
    sent: Vec<(String, Vec<u8>)>,
    #[cfg(not(target_os = "espidf"))]
    fail_with: Option<TransportError>,
}

impl RemoteStore {
    pub fn new(config: RemoteStoreConfig) -> Self {
        Self {
            config,
            link_up: false,
            #[cfg(target_os = "espidf")]
            client: None,
            #[cfg(not(target_os = "espidf"))]
            sent: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            fail_with: None,
        }
    }

    /// Tell the adapter whether the network link is up.  While it is down
    /// every push fails fast with [`TransportError::NotConnected`].
    pub fn set_link_up(&mut self, up: bool) {
        self.link_up = up;
    }

    pub fn is_link_up(&self) -> bool {
        self.link_up
    }

    /// A store without a host can never be reached.
    pub fn is_configured(&self) -> bool {
        !self.config.host.is_empty()
    }

    pub fn config(&self) -> &RemoteStoreConfig {
        &self.config
    }

    /// Bodies accepted so far, with their URLs.
    #[cfg(not(target_os = "espidf"))]
    pub fn sent(&self) -> &[(String, Vec<u8>)] {
        &self.sent
    }

    /// Make every following push fail with `error` (`None` to heal).
    #[cfg(not(target_os = "espidf"))]
    pub fn sim_fail_with(&mut self, error: Option<TransportError>) {
        self.fail_with = error;
    }

    #[cfg(target_os = "espidf")]
    fn send(&mut self, url: &str, body: &[u8]) -> Result<(), TransportError> {
        if self.client.is_none() {
            let conf = HttpClientConfiguration {
                timeout: Some(core::time::Duration::from_millis(u64::from(
                    self.config.timeout_ms,
                ))),
                crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
                ..Default::default()
            };
            let conn = EspHttpConnection::new(&conf).map_err(|_| TransportError::Io)?;
            self.client = Some(HttpClient::wrap(conn));
        }
        let Some(client) = self.client.as_mut() else {
            return Err(TransportError::Io);
        };

        let len = body.len().to_string();
        let headers = [
            ("content-type", "application/json"),
            ("content-length", len.as_str()),
        ];

        let result = (|| {
            let mut request = client
                .request(Method::Patch, url, &headers)
                .map_err(classify)?;
            request.write_all(body).map_err(classify)?;
            request.flush().map_err(classify)?;
            let response = request.submit().map_err(classify)?;
            let status = response.status();
            if (200..300).contains(&status) {
                Ok(())
            } else {
                Err(TransportError::Rejected(status))
            }
        })();

        // A failed exchange may leave the connection half-open.
        if matches!(result, Err(TransportError::Io | TransportError::Timeout)) {
            self.client = None;
        }
        result
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, url: &str, body: &[u8]) -> Result<(), TransportError> {
        if let Some(e) = self.fail_with {
            return Err(e);
        }
        self.sent.push((url.to_string(), body.to_vec()));
        Ok(())
    }
}

#[cfg(target_os = "espidf")]
fn classify(e: esp_idf_svc::io::EspIOError) -> TransportError {
    use esp_idf_svc::sys::{ESP_ERR_HTTP_EAGAIN, ESP_ERR_TIMEOUT};
    let code = e.0.code();
    if code == ESP_ERR_TIMEOUT as i32 || code == ESP_ERR_HTTP_EAGAIN as i32 {
        TransportError::Timeout
    } else {
        TransportError::Io
    }
}

impl TelemetryPort for RemoteStore {
    fn push(&mut self, payload: &TelemetryPayload) -> Result<(), TransportError> {
        if !self.link_up {
            return Err(TransportError::NotConnected);
        }
        let body = payload.to_json()?;
        let url = self.config.url(payload.device_id.as_str());
        debug!("remote store: PATCH {} bytes", body.len());
        self.send(&url, &body)
    }
}
