//! Sensor Config feature report (id 2, 7 bytes): streaming flags and intervals.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{ProtocolResult, check_size};
use crate::types::{PacketKind, SensorConfigFlags};

/// Tracker streaming configuration. Readable and writable.
///
/// Layout:
/// - Byte 0: report id `0x02`
/// - Bytes 1-2: command id
/// - Byte 3: flags
/// - Byte 4: packet interval
/// - Bytes 5-6: keep-alive interval in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    pub command_id: u16,
    pub flags: SensorConfigFlags,
    pub packet_interval: u8,
    pub keep_alive_interval: u16,
}

impl SensorConfig {
    pub const KIND: PacketKind = PacketKind::SensorConfig;

    /// Offset of the flags byte within the report.
    pub const FLAGS_OFFSET: usize = 3;

    pub fn decode(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<Self> {
        check_size(Self::KIND, size)?;
        cursor.skip_byte();

        Ok(Self {
            command_id: cursor.read_u16(),
            flags: SensorConfigFlags::from_bits_retain(cursor.read_u8()),
            packet_interval: cursor.read_u8(),
            keep_alive_interval: cursor.read_u16(),
        })
    }

    /// Write the report into a freshly reset cursor and return its length, the
    /// size to pass to `send_feature_report`.
    pub fn encode(&self, cursor: &mut ByteCursor) -> usize {
        cursor.reset();
        cursor.write_u8(Self::KIND.report_id());
        cursor.write_u16(self.command_id);
        cursor.write_u8(self.flags.bits());
        cursor.write_u8(self.packet_interval);
        cursor.write_u16(self.keep_alive_interval);
        cursor.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_config() -> Result<(), Box<dyn std::error::Error>> {
        let mut cursor = ByteCursor::from_bytes(&[0x02, 0x01, 0x00, 0x24, 0x00, 0xE8, 0x03]);
        let config = SensorConfig::decode(&mut cursor, 7)?;

        assert_eq!(config.command_id, 1);
        assert_eq!(
            config.flags,
            SensorConfigFlags::USE_CALIBRATION | SensorConfigFlags::COMMAND_KEEP_ALIVE
        );
        assert_eq!(config.packet_interval, 0);
        assert_eq!(config.keep_alive_interval, 1000);
        Ok(())
    }

    #[test]
    fn test_encode_places_flags_at_offset_three() {
        let config = SensorConfig {
            command_id: 0,
            flags: SensorConfigFlags::SENSOR_COORDINATES,
            packet_interval: 0,
            keep_alive_interval: 1000,
        };
        let mut cursor = ByteCursor::new();
        assert_eq!(config.encode(&mut cursor), 7);
        assert_eq!(cursor.written().get(SensorConfig::FLAGS_OFFSET), Some(&0x40));
    }

    #[test]
    fn test_encode_snapshot() {
        let config = SensorConfig {
            command_id: 0x0102,
            flags: SensorConfigFlags::USE_CALIBRATION | SensorConfigFlags::AUTO_CALIBRATION,
            packet_interval: 1,
            keep_alive_interval: 10_000,
        };
        let mut cursor = ByteCursor::new();
        config.encode(&mut cursor);
        insta::assert_snapshot!(format!("{:?}", cursor.written()), @"[2, 2, 1, 12, 1, 16, 39]");
    }
}
