//! One-shot ADC1 initialisation and raw channel reads.
//!
//! Soil and light sensors share ADC1 in oneshot mode.  The unit is set
//! up once from `main()` before the loop starts; afterwards
//! [`adc1_read`] is the only accessor.  Relays, the DHT line and the LCD
//! bus go through `esp_idf_svc::hal` drivers and need nothing here.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcUnitFailed(i32),
    AdcChannelFailed { channel: u32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcUnitFailed(rc) => write!(f, "ADC1 unit init failed (rc={})", rc),
            Self::AdcChannelFailed { channel, rc } => {
                write!(f, "ADC1 channel {} config failed (rc={})", channel, rc)
            }
        }
    }
}

impl core::error::Error for HwInitError {}

// ── Target ────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: written once by `init_peripherals()` before the loop starts,
/// read-only afterwards from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    let unit_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: single call from main() before any reader exists.
    let ret = unsafe { adc_oneshot_new_unit(&unit_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcUnitFailed(ret));
    }

    // 12 dB attenuation: full 0–3.3 V swing of the sensor dividers.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for channel in [pins::SOIL_ADC_CHANNEL, pins::LIGHT_ADC_CHANNEL] {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcChannelFailed { channel, rc: ret });
        }
    }

    info!(
        "hw_init: ADC1 configured (CH{}=soil GPIO{}, CH{}=light GPIO{})",
        pins::SOIL_ADC_CHANNEL,
        pins::SOIL_ADC_GPIO,
        pins::LIGHT_ADC_CHANNEL,
        pins::LIGHT_ADC_GPIO,
    );
    Ok(())
}

/// Raw count from an ADC1 channel; 0 if the conversion fails.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, main-task access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(not(target_os = "espidf"))]
const SIM_CHANNELS: usize = 10;

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [AtomicU16; SIM_CHANNELS] = [const { AtomicU16::new(0) }; SIM_CHANNELS];

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    SIM_ADC
        .get(channel as usize)
        .map_or(0, |slot| slot.load(Ordering::Relaxed))
}

/// Inject the raw count returned by [`adc1_read`] for `channel`.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}
