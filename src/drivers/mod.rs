//! Peripheral drivers and hardware initialisation.
//!
//! The relay, LCD and DHT drivers are generic over `embedded-hal` traits
//! and unit-tested against fakes; `hw_init` and `watchdog` wrap raw
//! ESP-IDF calls with host stand-ins.

pub mod dht;
pub mod hw_init;
pub mod lcd;
pub mod relay;
pub mod watchdog;
