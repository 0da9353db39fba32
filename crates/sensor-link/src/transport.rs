//! HID transport seam.
//!
//! The session only needs a byte-oriented channel to one device. A
//! [`HidBackend`] finds and opens the tracker; the [`HidHandle`] it returns
//! carries feature and input reports. Implementations exist for `hidapi`
//! (feature `hidapi`) and for tests in [`crate::mock`].

use crate::device_info::HidDeviceInfo;
use crate::error::TransportResult;

pub trait HidBackend {
    /// List attached HID devices.
    fn enumerate(&mut self) -> TransportResult<Vec<HidDeviceInfo>>;

    /// Open the first device matching the ids.
    fn open(&mut self, vendor_id: u16, product_id: u16) -> TransportResult<Box<dyn HidHandle>>;
}

pub trait HidHandle {
    fn set_nonblocking(&mut self, nonblocking: bool) -> TransportResult<()>;

    /// Fetch a feature report. `buf[0]` holds the requested report id on entry;
    /// returns the number of bytes written into `buf`, report id included.
    fn get_feature_report(&mut self, buf: &mut [u8]) -> TransportResult<usize>;

    /// Send a feature report whose first byte is the report id. Returns the
    /// number of bytes sent.
    fn send_feature_report(&mut self, data: &[u8]) -> TransportResult<usize>;

    /// Read one input report. In non-blocking mode returns `Ok(0)` when
    /// nothing is pending.
    fn read(&mut self, buf: &mut [u8]) -> TransportResult<usize>;

    /// Release the device. Further calls on the handle fail.
    fn close(&mut self);
}
