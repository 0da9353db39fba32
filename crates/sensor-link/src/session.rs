//! Per-consumer view of the shared tracker.
//!
//! Each [`SensorSession`] counts as one reference on its
//! [`DeviceRegistry`]. Readings are private to the session and are only
//! recomputed by [`SensorSession::update`]; the calibration constants are
//! shared with every other session of the registry.

use std::time::Instant;

use rift_hid_dk1_protocol::{
    ByteCursor, DistortionType, InputMessage, ProtocolError, SensorConfig, SensorConfigFlags,
    SensorDisplayInfo, SensorRange, TrackerMessage, decode_input_report,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{SensorLinkError, SensorLinkResult};
use crate::registry::{DeviceRegistry, LinkState};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Scale raw integer counts into a float vector.
    pub fn from_raw(raw: [i32; 3], scale: f32) -> Self {
        let [x, y, z] = raw;
        Self::new(x as f32 * scale, y as f32 * scale, z as f32 * scale)
    }
}

/// What one [`SensorSession::update`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStats {
    pub keep_alive_sent: bool,
    /// Input reports drained, whatever their type.
    pub reports_read: usize,
    pub tracker_messages: usize,
    /// Reports skipped for an unknown tag or a bad size.
    pub ignored_reports: usize,
}

pub struct SensorSession {
    registry: DeviceRegistry,
    message: TrackerMessage,
    acceleration: Vector3,
    angular_velocity: Vector3,
}

impl SensorSession {
    /// Attach to `registry`. The first session opens the tracker; if it cannot
    /// be found the session is still returned, stays [`LinkState::Closed`] and
    /// every operation on it is a no-op.
    pub fn new(registry: &DeviceRegistry) -> Self {
        registry.with_device(|device| device.acquire());
        Self {
            registry: registry.clone(),
            message: TrackerMessage::default(),
            acceleration: Vector3::default(),
            angular_velocity: Vector3::default(),
        }
    }

    pub fn state(&self) -> LinkState {
        self.registry.state()
    }

    pub fn is_open(&self) -> bool {
        self.state() != LinkState::Closed
    }

    pub fn update(&mut self) -> SensorLinkResult<UpdateStats> {
        self.update_at(Instant::now())
    }

    /// Send a keep-alive if due at `now`, then drain every pending input
    /// report. A read failure stops the drain and is returned; reports read
    /// before it have already been applied.
    pub fn update_at(&mut self, now: Instant) -> SensorLinkResult<UpdateStats> {
        let mut stats = UpdateStats::default();
        if self.state() == LinkState::Closed {
            return Ok(stats);
        }

        let raw_scale = self.registry.with_device(|device| device.config().raw_scale);
        stats.keep_alive_sent = match self.registry.with_device(|device| device.keep_alive_if_due(now)) {
            Ok(sent) => sent,
            Err(e) => {
                warn!(error = %e, "Keep-alive not sent");
                false
            }
        };

        let mut cursor = ByteCursor::new();
        loop {
            let size = self
                .registry
                .with_device(|device| device.read_input(&mut cursor))?;
            if size == 0 {
                break;
            }
            stats.reports_read += 1;

            match decode_input_report(&mut cursor, size) {
                Ok(InputMessage::Tracker(message)) => {
                    self.apply_tracker(message, raw_scale);
                    stats.tracker_messages += 1;
                }
                Err(ProtocolError::UnknownMessageType(tag)) => {
                    debug!(tag, size, "Ignoring unknown message type");
                    stats.ignored_reports += 1;
                }
                Err(e) => {
                    warn!(error = %e, "Discarding input report");
                    stats.ignored_reports += 1;
                }
            }
        }

        trace!(?stats, "Update done");
        Ok(stats)
    }

    fn apply_tracker(&mut self, message: TrackerMessage, raw_scale: f32) {
        self.message = message;
        if let Some(sample) = message.latest_sample() {
            self.acceleration = Vector3::from_raw(sample.accel, raw_scale);
            self.angular_velocity = Vector3::from_raw(sample.gyro, raw_scale);
        }
    }

    /// Write `flags` to the device and read the config back. Returns whether
    /// the device adopted them. Unchanged flags succeed without any I/O.
    pub fn set_flags(&mut self, flags: SensorConfigFlags) -> SensorLinkResult<bool> {
        if self.state() == LinkState::Closed {
            return Err(SensorLinkError::NotOpen);
        }

        let current = self.sensor_config();
        if current.flags == flags {
            return Ok(true);
        }

        let requested = SensorConfig { flags, ..current };
        let adopted = self
            .registry
            .with_device(|device| device.write_config(&requested))?;

        let accepted = adopted.flags == flags;
        if accepted {
            debug!(flags = flags.bits(), "Sensor flags updated");
        } else {
            warn!(
                requested = flags.bits(),
                actual = adopted.flags.bits(),
                "Tracker did not adopt sensor flags"
            );
        }
        Ok(accepted)
    }

    /// Re-read Sensor Config from the device.
    pub fn refresh_config(&mut self) -> SensorLinkResult<SensorConfig> {
        if self.state() == LinkState::Closed {
            return Err(SensorLinkError::NotOpen);
        }
        self.registry.with_device(|device| device.refresh_config())
    }

    pub fn acceleration(&self) -> Vector3 {
        self.acceleration
    }

    pub fn angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Last tracker message decoded by this session, all samples included.
    pub fn latest_message(&self) -> &TrackerMessage {
        &self.message
    }

    pub fn display_info(&self) -> SensorDisplayInfo {
        self.registry.with_device(|device| device.constants().display_info)
    }

    pub fn sensor_range(&self) -> SensorRange {
        self.registry.with_device(|device| device.constants().range)
    }

    pub fn sensor_config(&self) -> SensorConfig {
        self.registry.with_device(|device| device.constants().config)
    }

    pub fn h_resolution(&self) -> u16 {
        self.display_info().h_resolution
    }

    pub fn v_resolution(&self) -> u16 {
        self.display_info().v_resolution
    }

    pub fn h_screen_size(&self) -> f32 {
        self.display_info().h_screen_size
    }

    pub fn v_screen_size(&self) -> f32 {
        self.display_info().v_screen_size
    }

    pub fn v_center(&self) -> f32 {
        self.display_info().v_center
    }

    /// Eye-to-lens plus lens-to-screen.
    pub fn eye_to_screen_distance(&self) -> f32 {
        self.display_info().eye_to_screen_distance_total()
    }

    pub fn eye_to_lens_distance(&self) -> f32 {
        self.display_info().eye_to_lens_distance()
    }

    pub fn lens_to_screen_distance(&self) -> f32 {
        self.display_info().lens_to_screen_distance()
    }

    pub fn lens_separation(&self) -> f32 {
        self.display_info().lens_separation
    }

    pub fn distortion_type(&self) -> DistortionType {
        self.display_info().distortion_type
    }

    pub fn distortion_k(&self) -> [f32; 6] {
        self.display_info().distortion_k
    }

    pub fn accel_scale(&self) -> u8 {
        self.sensor_range().accel_scale
    }

    pub fn gyro_scale(&self) -> u16 {
        self.sensor_range().gyro_scale
    }

    pub fn mag_scale(&self) -> u16 {
        self.sensor_range().mag_scale
    }

    pub fn flags(&self) -> SensorConfigFlags {
        self.sensor_config().flags
    }

    pub fn packet_interval(&self) -> u8 {
        self.sensor_config().packet_interval
    }

    /// Keep-alive period in milliseconds as cached from the device.
    pub fn keep_alive_interval(&self) -> u16 {
        self.sensor_config().keep_alive_interval
    }
}

impl Drop for SensorSession {
    fn drop(&mut self) {
        self.registry.with_device(|device| device.release());
    }
}

impl std::fmt::Debug for SensorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorSession")
            .field("state", &self.state())
            .field("acceleration", &self.acceleration)
            .field("angular_velocity", &self.angular_velocity)
            .finish_non_exhaustive()
    }
}
