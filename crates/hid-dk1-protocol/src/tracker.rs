//! Tracker Message input report (id 1, 62 bytes): batched motion samples.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{ProtocolResult, check_size};
use crate::types::PacketKind;

/// Sample slots in every tracker message.
pub const MAX_SAMPLES: usize = 3;

/// Bytes taken by one sample slot: 8 for accel, 8 for gyro.
const SAMPLE_SLOT_LEN: usize = 16;

/// One raw accelerometer/gyroscope reading, each axis a sign-extended 21-bit
/// integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerSample {
    pub accel: [i32; 3],
    pub gyro: [i32; 3],
}

/// Motion report pushed by the tracker.
///
/// Layout:
/// - Byte 0: report id `0x01`
/// - Byte 1: number of samples (may exceed 3 when the host fell behind)
/// - Bytes 2-3: timestamp
/// - Bytes 4-5: last command id
/// - Bytes 6-7: temperature
/// - Bytes 8-55: three 16-byte sample slots (packed accel, packed gyro)
/// - Bytes 56-61: magnetometer x/y/z
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerMessage {
    pub num_samples: u8,
    pub timestamp: u16,
    pub last_command_id: u16,
    pub temperature: u16,
    pub samples: [TrackerSample; MAX_SAMPLES],
    pub mag: [u16; 3],
}

impl TrackerMessage {
    pub const KIND: PacketKind = PacketKind::TrackerMessage;

    /// Samples actually present, `num_samples` clamped to the slot count.
    pub fn actual_samples(&self) -> usize {
        usize::from(self.num_samples).min(MAX_SAMPLES)
    }

    /// Decoded samples, oldest first.
    pub fn present_samples(&self) -> &[TrackerSample] {
        self.samples
            .get(..self.actual_samples())
            .unwrap_or(&self.samples)
    }

    /// The most recent sample of the batch, if any.
    pub fn latest_sample(&self) -> Option<&TrackerSample> {
        self.present_samples().last()
    }

    pub fn decode(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<Self> {
        check_size(Self::KIND, size)?;
        cursor.skip_byte();

        let mut message = Self {
            num_samples: cursor.read_u8(),
            timestamp: cursor.read_u16(),
            last_command_id: cursor.read_u16(),
            temperature: cursor.read_u16(),
            ..Self::default()
        };

        let actual = message.actual_samples();
        for sample in message.samples.iter_mut().take(actual) {
            sample.accel = cursor.read_i21();
            sample.gyro = cursor.read_i21();
        }
        cursor.skip((MAX_SAMPLES - actual) * SAMPLE_SLOT_LEN);

        for axis in &mut message.mag {
            *axis = cursor.read_u16();
        }

        Ok(message)
    }

    /// Write the report into a freshly reset cursor and return its length.
    /// Unused sample slots are zero.
    pub fn encode(&self, cursor: &mut ByteCursor) -> usize {
        cursor.reset();
        cursor.write_u8(Self::KIND.report_id());
        cursor.write_u8(self.num_samples);
        cursor.write_u16(self.timestamp);
        cursor.write_u16(self.last_command_id);
        cursor.write_u16(self.temperature);

        let actual = self.actual_samples();
        for sample in self.present_samples() {
            cursor.write_i21(sample.accel);
            cursor.write_i21(sample.gyro);
        }
        cursor.skip((MAX_SAMPLES - actual) * SAMPLE_SLOT_LEN);

        for axis in self.mag {
            cursor.write_u16(axis);
        }
        cursor.position()
    }
}
