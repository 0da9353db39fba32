//! Sensor config flag writes

use anyhow::{Context, Result};
use rift_sensor_link::DeviceRegistry;
use rift_sensor_link::protocol::SensorConfigFlags;

use crate::commands::connect;
use crate::error::CliError;
use crate::output;

/// Write the flag byte and confirm the tracker adopted it
pub fn set(registry: &DeviceRegistry, bits: u8, json: bool) -> Result<()> {
    let mut session = connect(registry)?;
    let flags = SensorConfigFlags::from_bits_retain(bits);

    let adopted = session
        .set_flags(flags)
        .context("Failed to write sensor config")?;
    if !adopted {
        return Err(CliError::FlagsRejected {
            requested: bits,
            actual: session.flags().bits(),
        }
        .into());
    }

    output::print_flags_applied(session.flags(), json);
    Ok(())
}
