//! Sensor Range feature report (id 4, 8 bytes): calibration scales.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{ProtocolResult, check_size};
use crate::types::PacketKind;

/// Accelerometer, gyroscope and magnetometer full-scale ranges.
///
/// Layout:
/// - Byte 0: report id `0x04`
/// - Bytes 1-2: command id
/// - Byte 3: accelerometer scale
/// - Bytes 4-5: gyroscope scale
/// - Bytes 6-7: magnetometer scale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRange {
    pub command_id: u16,
    pub accel_scale: u8,
    pub gyro_scale: u16,
    pub mag_scale: u16,
}

impl SensorRange {
    pub const KIND: PacketKind = PacketKind::SensorRange;

    pub fn decode(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<Self> {
        check_size(Self::KIND, size)?;
        cursor.skip_byte();

        Ok(Self {
            command_id: cursor.read_u16(),
            accel_scale: cursor.read_u8(),
            gyro_scale: cursor.read_u16(),
            mag_scale: cursor.read_u16(),
        })
    }

    /// Write the report into a freshly reset cursor and return its length.
    pub fn encode(&self, cursor: &mut ByteCursor) -> usize {
        cursor.reset();
        cursor.write_u8(Self::KIND.report_id());
        cursor.write_u16(self.command_id);
        cursor.write_u8(self.accel_scale);
        cursor.write_u16(self.gyro_scale);
        cursor.write_u16(self.mag_scale);
        cursor.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;

    #[test]
    fn test_decode_range() -> Result<(), Box<dyn std::error::Error>> {
        let mut cursor =
            ByteCursor::from_bytes(&[0x04, 0x00, 0x00, 0x04, 0xD0, 0x07, 0xE8, 0x03]);
        let range = SensorRange::decode(&mut cursor, 8)?;

        assert_eq!(range.command_id, 0);
        assert_eq!(range.accel_scale, 4);
        assert_eq!(range.gyro_scale, 2000);
        assert_eq!(range.mag_scale, 1000);
        assert_eq!(cursor.position(), 8);
        Ok(())
    }

    #[test]
    fn test_encode_range() {
        let range = SensorRange {
            command_id: 3,
            accel_scale: 2,
            gyro_scale: 250,
            mag_scale: 1300,
        };
        let mut cursor = ByteCursor::new();
        assert_eq!(range.encode(&mut cursor), 8);
        assert_eq!(
            cursor.written(),
            &[0x04, 0x03, 0x00, 0x02, 0xFA, 0x00, 0x14, 0x05]
        );
    }

    #[test]
    fn test_decode_range_wrong_size() {
        let mut cursor = ByteCursor::new();
        let err = SensorRange::decode(&mut cursor, 9);
        assert_eq!(
            err,
            Err(ProtocolError::SizeMismatch {
                kind: PacketKind::SensorRange,
                expected: 8,
                actual: 9,
            })
        );
        assert_eq!(cursor.position(), 0);
    }
}
