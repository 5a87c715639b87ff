//! NVS (Non-Volatile Storage) adapter.
//!
//! Implements [`ConfigPort`]: reads the `postcard`-encoded
//! [`SystemConfig`] blob once at boot.  The firmware never writes it;
//! the blob is flashed alongside the image (or absent, in which case the
//! defaults apply).
//!
//! - **`target_os = "espidf"`** — ESP-IDF NVS, namespace `irrigation`,
//!   key `syscfg`.
//! - **`not(target_os = "espidf")`** — in-memory blob, injected with
//!   [`NvsAdapter::store_blob`].

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use log::{info, warn};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const CONFIG_NAMESPACE: &[u8] = b"irrigation\0";
#[cfg(target_os = "espidf")]
const CONFIG_KEY: &[u8] = b"syscfg\0";

const MAX_BLOB_SIZE: usize = 512;

pub struct NvsAdapter {
    #[cfg(not(target_os = "espidf"))]
    blob: std::cell::RefCell<Option<Vec<u8>>>,
}

impl NvsAdapter {
    /// Initialise NVS flash.
    ///
    /// On a full partition or a version mismatch the partition is erased
    /// and re-initialised, which also drops any stored config.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: called once from the main task before any NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES || ret == ESP_ERR_NVS_NEW_VERSION_FOUND {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            info!("NvsAdapter: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsAdapter: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            blob: std::cell::RefCell::new(None),
        })
    }

    /// Put raw bytes where the config blob lives.
    #[cfg(not(target_os = "espidf"))]
    pub fn store_blob(&self, bytes: &[u8]) {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
    }

    /// Encode `config` and store it as the blob.
    #[cfg(not(target_os = "espidf"))]
    pub fn store_config(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.store_blob(&bytes);
        Ok(())
    }

    /// Raw blob, `Ok(None)` if absent.
    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let blob = self.blob.borrow().clone();
        match blob {
            Some(b) if b.len() > MAX_BLOB_SIZE => Err(ConfigError::Corrupted),
            other => Ok(other),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let mut handle: nvs_handle_t = 0;
        // SAFETY: namespace is NUL-terminated; handle closed below.
        let ret = unsafe {
            nvs_open(
                CONFIG_NAMESPACE.as_ptr() as *const _,
                nvs_open_mode_t_NVS_READONLY,
                &mut handle,
            )
        };
        if ret == ESP_ERR_NVS_NOT_FOUND {
            // Namespace never written.
            return Ok(None);
        }
        if ret != ESP_OK {
            return Err(ConfigError::IoError);
        }

        let result = (|| {
            let mut size: usize = 0;
            // First call: size only.
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    CONFIG_KEY.as_ptr() as *const _,
                    core::ptr::null_mut(),
                    &mut size,
                )
            };
            if ret == ESP_ERR_NVS_NOT_FOUND {
                return Ok(None);
            }
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            if size == 0 || size > MAX_BLOB_SIZE {
                return Err(ConfigError::Corrupted);
            }

            let mut buf = vec![0u8; size];
            let ret = unsafe {
                nvs_get_blob(
                    handle,
                    CONFIG_KEY.as_ptr() as *const _,
                    buf.as_mut_ptr() as *mut _,
                    &mut size,
                )
            };
            if ret != ESP_OK {
                return Err(ConfigError::IoError);
            }
            Ok(Some(buf))
        })();

        unsafe {
            nvs_close(handle);
        }
        result
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let Some(bytes) = self.read_blob()? else {
            info!("NvsAdapter: no stored config, using defaults");
            return Ok(SystemConfig::default());
        };

        let cfg: SystemConfig = postcard::from_bytes(&bytes).map_err(|_| {
            warn!("NvsAdapter: config blob ({} bytes) does not decode", bytes.len());
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        info!("NvsAdapter: loaded config ({} bytes)", bytes.len());
        Ok(cfg)
    }
}
