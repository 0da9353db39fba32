//! Session configuration.

use rift_hid_dk1_protocol::{DK1_PRODUCT_ID, DK1_VENDOR_ID};
use serde::{Deserialize, Serialize};

use crate::error::{SensorLinkError, SensorLinkResult};

/// Raw 21-bit accelerometer and gyroscope counts to SI units.
pub const DEFAULT_RAW_SCALE: f32 = 0.0001;

/// Keep-alive period used while the device has not reported one.
pub const DEFAULT_KEEP_ALIVE_INTERVAL_MS: u16 = 1000;

/// Tunables for a [`DeviceRegistry`](crate::DeviceRegistry). Every field has a
/// default, so partial YAML/JSON documents deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorLinkConfig {
    pub vendor_id: u16,
    pub product_id: u16,
    /// Factor applied to raw sample counts for the exposed readings.
    pub raw_scale: f32,
    /// Keep-alive period when the cached Sensor Config reports 0.
    pub default_keep_alive_interval_ms: u16,
}

impl Default for SensorLinkConfig {
    fn default() -> Self {
        Self {
            vendor_id: DK1_VENDOR_ID,
            product_id: DK1_PRODUCT_ID,
            raw_scale: DEFAULT_RAW_SCALE,
            default_keep_alive_interval_ms: DEFAULT_KEEP_ALIVE_INTERVAL_MS,
        }
    }
}

impl SensorLinkConfig {
    pub fn validate(&self) -> SensorLinkResult<()> {
        if !self.raw_scale.is_finite() || self.raw_scale == 0.0 {
            return Err(SensorLinkError::InvalidConfig(format!(
                "raw_scale must be finite and non-zero, got {}",
                self.raw_scale
            )));
        }
        if self.default_keep_alive_interval_ms == 0 {
            return Err(SensorLinkError::InvalidConfig(
                "default_keep_alive_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_dk1() {
        let config = SensorLinkConfig::default();
        assert_eq!(config.vendor_id, 0x2833);
        assert_eq!(config.product_id, 0x0001);
        assert!((config.raw_scale - 1e-4).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_document() -> Result<(), Box<dyn std::error::Error>> {
        let config: SensorLinkConfig = serde_json::from_str(r#"{ "raw_scale": 0.001 }"#)?;
        assert!((config.raw_scale - 0.001).abs() < f32::EPSILON);
        assert_eq!(config.vendor_id, 0x2833);
        Ok(())
    }

    #[test]
    fn test_blocking_mode_is_not_configurable() {
        let result: Result<SensorLinkConfig, _> = serde_json::from_str(r#"{ "nonblocking": false }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let config = SensorLinkConfig {
            raw_scale: 0.0,
            ..SensorLinkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SensorLinkError::InvalidConfig(_))
        ));

        let config = SensorLinkConfig {
            raw_scale: f32::NAN,
            ..SensorLinkConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
