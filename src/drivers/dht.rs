//! DHT11 / DHT22 single-wire temperature-humidity driver.
//!
//! Bit-banged over one open-drain line with an external pull-up:
//!
//! ```text
//!  host:   ‾‾‾\______ start ______/‾‾‾‾
//!  sensor:                         \_80µs_/‾80µs‾\ 40 × (\_50µs_/‾26µs=0 | 70µs=1‾)
//! ```
//!
//! A frame is 5 bytes: humidity hi/lo, temperature hi/lo, checksum.  The
//! whole exchange takes ~5 ms after the start pulse.  Every failure ends
//! in [`ClimateSample::FAILED`]; the caller never sees a protocol error.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::debug;

use crate::config::DhtModel;
use crate::error::SensorError;
use crate::sensors::climate::{ClimateSample, ClimateTransducer};

/// Longest wait for any single line transition.
const EDGE_TIMEOUT_US: u32 = 100;
/// Sample point after the rising edge of a data bit.
const BIT_SAMPLE_DELAY_US: u32 = 30;

pub struct Dht<P, D> {
    pin: P,
    delay: D,
    model: DhtModel,
}

impl<P, D> Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// `pin` must already be configured open-drain with the line released.
    pub fn new(pin: P, delay: D, model: DhtModel) -> Self {
        Self { pin, delay, model }
    }

    /// One complete transaction: start pulse, handshake, 40 bits.
    pub fn read_frame(&mut self) -> Result<[u8; 5], SensorError> {
        let start_ms = match self.model {
            DhtModel::Dht11 => 18,
            DhtModel::Dht22 => 1,
        };
        self.pin.set_low().map_err(|_| SensorError::Timeout)?;
        self.delay.delay_ms(start_ms);
        self.pin.set_high().map_err(|_| SensorError::Timeout)?;
        self.delay.delay_us(40);

        // Handshake: sensor pulls low, then high, then low for the first bit.
        self.wait_for(false)?;
        self.wait_for(true)?;
        self.wait_for(false)?;

        let mut frame = [0u8; 5];
        for byte in &mut frame {
            for _ in 0..8 {
                self.wait_for(true)?;
                self.delay.delay_us(BIT_SAMPLE_DELAY_US);
                let one = self.pin.is_high().map_err(|_| SensorError::Timeout)?;
                *byte = (*byte << 1) | u8::from(one);
                if one {
                    self.wait_for(false)?;
                }
            }
        }
        Ok(frame)
    }

    fn wait_for(&mut self, high: bool) -> Result<(), SensorError> {
        for _ in 0..EDGE_TIMEOUT_US {
            let level = self.pin.is_high().map_err(|_| SensorError::Timeout)?;
            if level == high {
                return Ok(());
            }
            self.delay.delay_us(1);
        }
        Err(SensorError::Timeout)
    }
}

impl<P, D> ClimateTransducer for Dht<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self) -> ClimateSample {
        match self.read_frame().and_then(|f| decode_frame(self.model, &f)) {
            Ok(sample) => sample,
            Err(e) => {
                debug!("DHT read failed: {}", e);
                ClimateSample::FAILED
            }
        }
    }
}

/// Verify the checksum and convert a raw frame to engineering units.
pub fn decode_frame(model: DhtModel, frame: &[u8; 5]) -> Result<ClimateSample, SensorError> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(SensorError::Checksum);
    }

    let sample = match model {
        DhtModel::Dht11 => {
            let humidity = f32::from(frame[0]) + f32::from(frame[1]) * 0.1;
            let magnitude = f32::from(frame[2]) + f32::from(frame[3] & 0x7F) * 0.1;
            let temperature = if frame[3] & 0x80 != 0 { -magnitude } else { magnitude };
            ClimateSample {
                temperature_c: temperature,
                humidity_pct: humidity,
            }
        }
        DhtModel::Dht22 => {
            let humidity = f32::from(u16::from_be_bytes([frame[0], frame[1]])) / 10.0;
            let magnitude = f32::from(u16::from_be_bytes([frame[2] & 0x7F, frame[3]])) / 10.0;
            let temperature = if frame[2] & 0x80 != 0 { -magnitude } else { magnitude };
            ClimateSample {
                temperature_c: temperature,
                humidity_pct: humidity,
            }
        }
    };
    Ok(sample)
}
