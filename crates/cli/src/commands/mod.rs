//! Command implementations for riftctl

pub mod device;
pub mod flags;
pub mod monitor;

use anyhow::{Context, Result};
use rift_sensor_link::mock::{MockBackend, MockDevice};
use rift_sensor_link::protocol::{TrackerMessage, TrackerSample};
use rift_sensor_link::{DeviceRegistry, SensorLinkConfig, SensorSession};

use crate::error::CliError;

/// Build the registry every command works against.
pub fn open_registry(config: SensorLinkConfig, mock: bool) -> Result<DeviceRegistry> {
    if mock {
        return Ok(DeviceRegistry::new(MockBackend::new(demo_tracker()), config));
    }
    DeviceRegistry::with_hidapi(config).context("Failed to initialise the HID subsystem")
}

/// Attach a session, failing with [`CliError::DeviceNotFound`] when the
/// tracker could not be opened.
pub fn connect(registry: &DeviceRegistry) -> Result<SensorSession> {
    let session = registry.session();
    if !session.is_open() {
        let config = registry.config();
        return Err(CliError::DeviceNotFound(format!(
            "{:04x}:{:04x}",
            config.vendor_id, config.product_id
        ))
        .into());
    }
    Ok(session)
}

/// Simulated tracker lying flat and slowly turning about its vertical axis.
fn demo_tracker() -> MockDevice {
    let device = MockDevice::dk1();
    for step in 0..3u16 {
        let yaw_rate = i32::from(step) * 1_000;
        device.queue_tracker(&TrackerMessage {
            num_samples: 1,
            timestamp: step.saturating_mul(2),
            temperature: 2950,
            samples: [
                TrackerSample {
                    accel: [0, 98_100, 0],
                    gyro: [0, yaw_rate, 0],
                },
                TrackerSample::default(),
                TrackerSample::default(),
            ],
            mag: [120, 65_100, 410],
            ..TrackerMessage::default()
        });
    }
    device
}
