//! Resistive soil-moisture sensor normalization.
//!
//! The sensor's output rises as the soil dries out, so the raw count is
//! inverted: full scale reads as 0 % and zero reads as 100 %.

/// Convert a raw ADC count into soil moisture percent.
///
/// `round((adc_max - raw) / adc_max * 100)`, clamped to 0–100.  Raw values
/// above `adc_max` saturate to 0 %.  Rounds half up, in integer arithmetic.
pub fn soil_moisture_percent(raw: u16, adc_max: u16) -> u8 {
    if adc_max == 0 {
        return 0;
    }
    let max = u32::from(adc_max);
    let wetness = max - u32::from(raw.min(adc_max));
    let pct = (wetness * 200 + max) / (2 * max);
    pct.min(100) as u8
}
