//! Configuration file loading and command-line overrides.

use std::fs;
use std::path::Path;

use rift_sensor_link::SensorLinkConfig;
use tracing::debug;

use crate::error::CliError;

/// Load a [`SensorLinkConfig`] from YAML or JSON (chosen by extension), or
/// defaults when no path is given, then apply id overrides and validate.
pub fn load(
    path: Option<&Path>,
    vendor_id: Option<u16>,
    product_id: Option<u16>,
) -> Result<SensorLinkConfig, CliError> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            debug!("Loaded configuration from {}", path.display());
            parse(&text, is_json(path))?
        }
        None => SensorLinkConfig::default(),
    };

    if let Some(vendor_id) = vendor_id {
        config.vendor_id = vendor_id;
    }
    if let Some(product_id) = product_id {
        config.product_id = product_id;
    }

    config
        .validate()
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;
    Ok(config)
}

fn parse(text: &str, json: bool) -> Result<SensorLinkConfig, CliError> {
    if json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

pub fn parse_hex_u8(s: &str) -> Result<u8, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u8::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}
