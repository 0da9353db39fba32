//! Sensor Display Info feature report (id 9, 56 bytes): optical geometry of the
//! headset panel and lenses.

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{ProtocolResult, check_size};
use crate::types::{DistortionType, PacketKind};

/// Number of radial distortion coefficients carried by the report.
pub const DISTORTION_COEFFICIENTS: usize = 6;

/// Device-reported screen and lens geometry. Lengths are in meters.
///
/// Layout:
/// - Byte 0: report id `0x09`
/// - Bytes 1-2: command id
/// - Byte 3: distortion type
/// - Bytes 4-5, 6-7: horizontal and vertical resolution in pixels
/// - Bytes 8-31: six fixed-point values in millionths (screen size h/v,
///   vertical center, lens separation, eye-to-lens, lens-to-screen)
/// - Bytes 32-55: six 4-byte distortion coefficient fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorDisplayInfo {
    pub command_id: u16,
    pub distortion_type: DistortionType,
    /// Resolution of the whole panel; each eye gets half the width.
    pub h_resolution: u16,
    pub v_resolution: u16,
    /// Physical size of the whole panel; each eye gets half the width.
    pub h_screen_size: f32,
    pub v_screen_size: f32,
    /// Offset from the top of the screen to the eye center.
    pub v_center: f32,
    /// Distance between the lens centers, which are the centers of distortion.
    pub lens_separation: f32,
    /// Eye-to-lens and lens-to-screen distances.
    pub eye_to_screen_distance: [f32; 2],
    pub distortion_k: [f32; DISTORTION_COEFFICIENTS],
}

impl SensorDisplayInfo {
    pub const KIND: PacketKind = PacketKind::SensorDisplayInfo;

    /// Decode the report. The distortion coefficients go through
    /// [`ByteCursor::read_f`] and therefore only carry their first raw byte.
    pub fn decode(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<Self> {
        check_size(Self::KIND, size)?;
        cursor.skip_byte();

        let command_id = cursor.read_u16();
        let distortion_type = DistortionType::from_raw(cursor.read_u8());
        let h_resolution = cursor.read_u16();
        let v_resolution = cursor.read_u16();
        let h_screen_size = cursor.read_ff();
        let v_screen_size = cursor.read_ff();
        let v_center = cursor.read_ff();
        let lens_separation = cursor.read_ff();
        let eye_to_screen_distance = [cursor.read_ff(), cursor.read_ff()];

        let mut distortion_k = [0.0; DISTORTION_COEFFICIENTS];
        for k in &mut distortion_k {
            *k = cursor.read_f();
        }

        Ok(Self {
            command_id,
            distortion_type,
            h_resolution,
            v_resolution,
            h_screen_size,
            v_screen_size,
            v_center,
            lens_separation,
            eye_to_screen_distance,
            distortion_k,
        })
    }

    /// Write the report into a freshly reset cursor and return its length.
    ///
    /// Coefficients are written the way [`decode`](Self::decode) reads them,
    /// so only whole numbers in `0..=255` survive.
    pub fn encode(&self, cursor: &mut ByteCursor) -> usize {
        cursor.reset();
        cursor.write_u8(Self::KIND.report_id());
        cursor.write_u16(self.command_id);
        cursor.write_u8(self.distortion_type.to_raw());
        cursor.write_u16(self.h_resolution);
        cursor.write_u16(self.v_resolution);
        for value in [
            self.h_screen_size,
            self.v_screen_size,
            self.v_center,
            self.lens_separation,
            self.eye_to_screen_distance[0],
            self.eye_to_screen_distance[1],
        ] {
            cursor.write_ff(value);
        }
        for k in self.distortion_k {
            cursor.write_f(k);
        }
        cursor.position()
    }

    /// Eye to screen, the sum of eye-to-lens and lens-to-screen.
    pub fn eye_to_screen_distance_total(&self) -> f32 {
        self.eye_to_screen_distance[0] + self.eye_to_screen_distance[1]
    }

    pub fn eye_to_lens_distance(&self) -> f32 {
        self.eye_to_screen_distance[0]
    }

    pub fn lens_to_screen_distance(&self) -> f32 {
        self.eye_to_screen_distance[1]
    }
}
