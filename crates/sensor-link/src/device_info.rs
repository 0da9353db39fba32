//! Enumerated HID device description.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidDeviceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub manufacturer: Option<String>,
    pub product_name: Option<String>,
    pub path: String,
}

impl HidDeviceInfo {
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            serial_number: None,
            manufacturer: None,
            product_name: None,
            path: path.into(),
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    /// Product string, else manufacturer, else `vvvv:pppp`.
    pub fn display_name(&self) -> String {
        self.product_name
            .clone()
            .or_else(|| self.manufacturer.clone())
            .unwrap_or_else(|| format!("{:04x}:{:04x}", self.vendor_id, self.product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_tracker_ids() {
        let info = HidDeviceInfo::new(0x2833, 0x0001, "/dev/hidraw3");
        assert!(info.matches(0x2833, 0x0001));
        assert!(!info.matches(0x2833, 0x0021));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let info = HidDeviceInfo::new(0x2833, 0x0001, "/dev/hidraw3")
            .with_manufacturer("Oculus VR, Inc.")
            .with_product_name("Tracker DK");
        assert_eq!(info.display_name(), "Tracker DK");

        let info = HidDeviceInfo::new(0x2833, 0x0001, "/dev/hidraw3").with_manufacturer("Oculus VR, Inc.");
        assert_eq!(info.display_name(), "Oculus VR, Inc.");

        let info = HidDeviceInfo::new(0x2833, 0x0001, "/dev/hidraw3");
        assert_eq!(info.display_name(), "2833:0001");
    }

    #[test]
    fn test_builder_fills_descriptors() {
        let info = HidDeviceInfo::new(0x2833, 0x0001, "/dev/hidraw3")
            .with_serial("RIFT0001")
            .with_manufacturer("Oculus VR, Inc.")
            .with_product_name("Tracker DK");
        assert_eq!(info.serial_number.as_deref(), Some("RIFT0001"));
        assert_eq!(info.manufacturer.as_deref(), Some("Oculus VR, Inc."));
        assert_eq!(info.product_name.as_deref(), Some("Tracker DK"));
        assert_eq!(info.path, "/dev/hidraw3");
    }
}
