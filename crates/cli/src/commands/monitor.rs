//! Live motion polling

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rift_sensor_link::DeviceRegistry;
use tracing::debug;

use crate::commands::connect;
use crate::output;

/// Poll the tracker every `interval_ms`, printing a reading whenever a tracker
/// message arrived. Runs until `duration_secs` elapsed, or forever when none.
pub fn execute(
    registry: &DeviceRegistry,
    duration_secs: Option<u64>,
    interval_ms: u64,
    json: bool,
) -> Result<()> {
    let mut session = connect(registry)?;
    let interval = Duration::from_millis(interval_ms);
    let deadline = duration_secs.and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)));

    if !json {
        match duration_secs {
            Some(secs) => println!("Polling tracker for {secs}s (Press Ctrl+C to stop)"),
            None => println!("Polling tracker (Press Ctrl+C to stop)"),
        }
    }

    loop {
        let stats = session.update().context("Tracker poll failed")?;
        debug!(?stats, "Polled tracker");
        if stats.tracker_messages > 0 {
            output::print_reading(&session, json);
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            break;
        }
        thread::sleep(interval);
    }
    Ok(())
}
