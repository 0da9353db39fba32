//! [`HidBackend`] over the `hidapi` crate.

use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::device_info::HidDeviceInfo;
use crate::error::{TransportError, TransportResult};
use crate::transport::{HidBackend, HidHandle};

/// Owns the hidapi context; dropping it is the `hid_exit` counterpart of
/// [`HidApiBackend::new`].
pub struct HidApiBackend {
    api: HidApi,
}

impl HidApiBackend {
    pub fn new() -> TransportResult<Self> {
        let api = HidApi::new().map_err(|e| TransportError::Enumerate(e.to_string()))?;
        Ok(Self { api })
    }
}

impl HidBackend for HidApiBackend {
    fn enumerate(&mut self) -> TransportResult<Vec<HidDeviceInfo>> {
        self.api
            .refresh_devices()
            .map_err(|e| TransportError::Enumerate(e.to_string()))?;

        let devices: Vec<HidDeviceInfo> = self
            .api
            .device_list()
            .map(|dev| {
                let mut info = HidDeviceInfo::new(
                    dev.vendor_id(),
                    dev.product_id(),
                    dev.path().to_string_lossy().into_owned(),
                );
                if let Some(serial) = dev.serial_number() {
                    info = info.with_serial(serial);
                }
                if let Some(manufacturer) = dev.manufacturer_string() {
                    info = info.with_manufacturer(manufacturer);
                }
                if let Some(product) = dev.product_string() {
                    info = info.with_product_name(product);
                }
                info
            })
            .collect();

        debug!("Enumerated {} HID devices", devices.len());
        Ok(devices)
    }

    fn open(&mut self, vendor_id: u16, product_id: u16) -> TransportResult<Box<dyn HidHandle>> {
        let device = self
            .api
            .open(vendor_id, product_id)
            .map_err(|e| TransportError::Open {
                vendor_id,
                product_id,
                message: e.to_string(),
            })?;
        Ok(Box::new(HidApiHandle {
            device: Some(device),
        }))
    }
}

struct HidApiHandle {
    device: Option<HidDevice>,
}

impl HidApiHandle {
    fn device(&self) -> TransportResult<&HidDevice> {
        self.device.as_ref().ok_or(TransportError::Disconnected)
    }
}

impl HidHandle for HidApiHandle {
    fn set_nonblocking(&mut self, nonblocking: bool) -> TransportResult<()> {
        self.device()?
            .set_blocking_mode(!nonblocking)
            .map_err(|e| TransportError::Configure(e.to_string()))
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> TransportResult<usize> {
        let report_id = buf.first().copied().unwrap_or(0);
        self.device()?
            .get_feature_report(buf)
            .map_err(|e| TransportError::FeatureGet {
                report_id,
                message: e.to_string(),
            })
    }

    fn send_feature_report(&mut self, data: &[u8]) -> TransportResult<usize> {
        let report_id = data.first().copied().unwrap_or(0);
        self.device()?
            .send_feature_report(data)
            .map_err(|e| TransportError::FeatureSet {
                report_id,
                message: e.to_string(),
            })?;
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> TransportResult<usize> {
        self.device()?
            .read(buf)
            .map_err(|e| TransportError::Read(e.to_string()))
    }

    fn close(&mut self) {
        // HidDevice closes on drop.
        self.device = None;
    }
}
