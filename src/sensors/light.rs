//! LDR light sensor normalization.
//!
//! The divider output rises with illuminance; the raw count is rescaled
//! (not inverted) onto the 10-bit range the thresholds are expressed in.

/// Upper bound of the normalized light scale.
pub const LIGHT_LEVEL_MAX: u16 = 1023;

/// `round(raw / adc_max * 1023)`, clamped to 0–1023.
pub fn light_level(raw: u16, adc_max: u16) -> u16 {
    if adc_max == 0 {
        return 0;
    }
    let max = u32::from(adc_max);
    let raw = u32::from(raw.min(adc_max));
    let level = (raw * u32::from(LIGHT_LEVEL_MAX) * 2 + max) / (2 * max);
    level.min(u32::from(LIGHT_LEVEL_MAX)) as u16
}
