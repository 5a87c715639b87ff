//! Device identity derived from the ESP32 factory MAC address.
//!
//! Used when the stored configuration leaves `device_id` empty.  The id
//! has the form `IRR-XXYYZZ` (last 3 MAC bytes, uppercase hex) and is
//! stable across reboots because the MAC is burned into eFuse.

use core::fmt::Write;

use crate::config::DeviceId;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    // SAFETY: writes exactly 6 bytes into `mac`.
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0x24, 0x6F, 0x28, 0x1A, 0x2B, 0x3C]
}

/// `IRR-XXYYZZ` from the last 3 MAC bytes.
pub fn device_id(mac: &MacAddress) -> DeviceId {
    let mut id = DeviceId::new();
    let _ = write!(id, "IRR-{:02X}{:02X}{:02X}", mac[3], mac[4], mac[5]);
    id
}

/// Network hostname, `irrigation-xxyyzz`.
pub fn hostname(mac: &MacAddress) -> heapless::String<24> {
    let mut name = heapless::String::<24>::new();
    let _ = write!(name, "irrigation-{:02x}{:02x}{:02x}", mac[3], mac[4], mac[5]);
    name
}

/// The configured id, or the MAC-derived one when none is configured.
pub fn resolve(configured: &DeviceId, mac: &MacAddress) -> DeviceId {
    if configured.trim().is_empty() {
        device_id(mac)
    } else {
        configured.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: MacAddress = [0x00, 0x11, 0x22, 0xAA, 0xBB, 0xCC];

    #[test]
    fn device_id_format() {
        assert_eq!(device_id(&MAC).as_str(), "IRR-AABBCC");
    }

    #[test]
    fn hostname_format() {
        assert_eq!(hostname(&MAC).as_str(), "irrigation-aabbcc");
    }

    #[test]
    fn configured_id_wins() {
        let configured = DeviceId::try_from("greenhouse_3").unwrap();
        assert_eq!(resolve(&configured, &MAC).as_str(), "greenhouse_3");
    }

    #[test]
    fn blank_id_falls_back_to_mac() {
        assert_eq!(resolve(&DeviceId::new(), &MAC).as_str(), "IRR-AABBCC");
        let blank = DeviceId::try_from("  ").unwrap();
        assert_eq!(resolve(&blank, &MAC).as_str(), "IRR-AABBCC");
    }

    #[test]
    fn sim_mac_deterministic() {
        assert_eq!(read_mac(), read_mac());
    }
}
