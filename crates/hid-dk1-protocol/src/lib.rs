//! Oculus Rift DK1 tracker HID protocol: byte cursor, feature report codecs and
//! input report decoding.
//!
//! This crate is intentionally I/O-free and allocation-free. It provides pure
//! functions and types that can be tested and fuzzed without hardware or
//! OS-level HID plumbing; the `rift-sensor-link` crate drives them against a
//! real or mocked HID handle.
//!
//! ## Wire format
//!
//! Every report starts with its report id. Feature reports are exchanged with
//! `get_feature_report`/`send_feature_report`, motion samples arrive as input
//! reports.
//!
//! | Kind            | Report ID | Size | Direction           |
//! |-----------------|-----------|------|---------------------|
//! | Sensor Config   | 2         | 7    | get/set feature     |
//! | Sensor Range    | 4         | 8    | get feature         |
//! | Keep-Alive      | 8         | 5    | set feature         |
//! | Display Info    | 9         | 56   | get feature         |
//! | Tracker Message | 1         | 62   | input report (read) |
//!
//! Accelerometer and gyroscope axes are signed 21-bit values packed three to
//! eight bytes, see [`ByteCursor::read_i21`].

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod cursor;
pub mod display_info;
pub mod error;
pub mod ids;
pub mod keep_alive;
pub mod message;
pub mod range;
pub mod tracker;
pub mod types;

pub use config::SensorConfig;
pub use cursor::ByteCursor;
pub use display_info::SensorDisplayInfo;
pub use error::{ProtocolError, ProtocolResult};
pub use ids::{BUFFER_SIZE, DK1_PRODUCT_ID, DK1_VENDOR_ID, report_ids, report_sizes};
pub use keep_alive::KeepAlive;
pub use message::{InputMessage, MessageTag, decode_input_report};
pub use range::SensorRange;
pub use tracker::{MAX_SAMPLES, TrackerMessage, TrackerSample};
pub use types::{DistortionType, PacketKind, SensorConfigFlags};
