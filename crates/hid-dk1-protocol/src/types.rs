//! DK1 protocol enumerations: packet kinds, distortion type and config flags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::{report_ids, report_sizes};

/// The five report kinds the tracker speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    SensorRange,
    SensorDisplayInfo,
    SensorConfig,
    TrackerMessage,
    KeepAlive,
}

impl PacketKind {
    pub const ALL: [PacketKind; 5] = [
        PacketKind::SensorRange,
        PacketKind::SensorDisplayInfo,
        PacketKind::SensorConfig,
        PacketKind::TrackerMessage,
        PacketKind::KeepAlive,
    ];

    pub fn report_id(self) -> u8 {
        match self {
            Self::SensorRange => report_ids::RANGE,
            Self::SensorDisplayInfo => report_ids::DISPLAY_INFO,
            Self::SensorConfig => report_ids::CONFIG,
            Self::TrackerMessage => report_ids::TRACKER_MESSAGE,
            Self::KeepAlive => report_ids::KEEP_ALIVE,
        }
    }

    /// Fixed wire size, report id included.
    pub fn wire_size(self) -> usize {
        match self {
            Self::SensorRange => report_sizes::RANGE,
            Self::SensorDisplayInfo => report_sizes::DISPLAY_INFO,
            Self::SensorConfig => report_sizes::CONFIG,
            Self::TrackerMessage => report_sizes::TRACKER_MESSAGE,
            Self::KeepAlive => report_sizes::KEEP_ALIVE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SensorRange => "Sensor Range",
            Self::SensorDisplayInfo => "Sensor Display Info",
            Self::SensorConfig => "Sensor Config",
            Self::TrackerMessage => "Tracker Message",
            Self::KeepAlive => "Keep-Alive",
        }
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lens distortion model reported in the display info feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistortionType {
    #[default]
    None,
    ScreenOnly,
    Distortion,
}

impl DistortionType {
    /// Map the raw wire byte. Values outside the known range read as `None`.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::ScreenOnly,
            2 => Self::Distortion,
            _ => Self::None,
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Self::None => 0,
            Self::ScreenOnly => 1,
            Self::Distortion => 2,
        }
    }
}

bitflags::bitflags! {
    /// Sensor config flag byte. Bits the device sets outside the known set are
    /// retained so a write-back never clears them.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SensorConfigFlags: u8 {
        const RAW_MODE = 0x01;
        const CALIBRATION_TEST = 0x02;
        const USE_CALIBRATION = 0x04;
        const AUTO_CALIBRATION = 0x08;
        const MOTION_KEEP_ALIVE = 0x10;
        const COMMAND_KEEP_ALIVE = 0x20;
        const SENSOR_COORDINATES = 0x40;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_kind_table() {
        let table: Vec<(u8, usize)> = PacketKind::ALL
            .iter()
            .map(|k| (k.report_id(), k.wire_size()))
            .collect();
        assert_eq!(table, vec![(4, 8), (9, 56), (2, 7), (1, 62), (8, 5)]);
    }

    #[test]
    fn test_distortion_type_raw() {
        for kind in [
            DistortionType::None,
            DistortionType::ScreenOnly,
            DistortionType::Distortion,
        ] {
            assert_eq!(DistortionType::from_raw(kind.to_raw()), kind);
        }
        assert_eq!(DistortionType::from_raw(0x7F), DistortionType::None);
    }

    #[test]
    fn test_flags_retain_unknown_bits() {
        let flags = SensorConfigFlags::from_bits_retain(0x80 | 0x40);
        assert!(flags.contains(SensorConfigFlags::SENSOR_COORDINATES));
        assert_eq!(flags.bits(), 0xC0);
    }
}
