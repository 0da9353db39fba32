//! Tracker discovery and calibration dump

use anyhow::Result;
use rift_sensor_link::DeviceRegistry;
use tracing::info;

use crate::commands::connect;
use crate::output;

/// List attached trackers matching the configured ids
pub fn list(registry: &DeviceRegistry, json: bool) -> Result<()> {
    let devices = registry.enumerate()?;
    let config = registry.config();
    info!("Found {} HID devices", devices.len());
    output::print_device_list(&devices, config.vendor_id, config.product_id, json);
    Ok(())
}

/// Open the tracker and print the constants read at open
pub fn info(registry: &DeviceRegistry, json: bool) -> Result<()> {
    let session = connect(registry)?;
    output::print_info(
        session.state(),
        &registry.constants(),
        session.keep_alive_interval(),
        json,
    );
    Ok(())
}
