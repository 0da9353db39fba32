//! USB identifiers, report ids and fixed wire sizes for the DK1 tracker.

/// Oculus VR, Inc. USB vendor id.
pub const DK1_VENDOR_ID: u16 = 0x2833;

/// Tracker DK product id.
pub const DK1_PRODUCT_ID: u16 = 0x0001;

/// Size of every transfer buffer. Large enough for the biggest feature report
/// the tracker answers with.
pub const BUFFER_SIZE: usize = 256;

/// Report ids, sent as the first byte of every report.
pub mod report_ids {
    pub const TRACKER_MESSAGE: u8 = 1;
    pub const CONFIG: u8 = 2;
    pub const RANGE: u8 = 4;
    pub const KEEP_ALIVE: u8 = 8;
    pub const DISPLAY_INFO: u8 = 9;
}

/// Fixed wire sizes in bytes, report id included.
pub mod report_sizes {
    pub const TRACKER_MESSAGE: usize = 62;
    pub const CONFIG: usize = 7;
    pub const RANGE: usize = 8;
    pub const KEEP_ALIVE: usize = 5;
    pub const DISPLAY_INFO: usize = 56;
}
