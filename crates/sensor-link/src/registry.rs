//! Shared tracker connection.
//!
//! There is one physical tracker no matter how many sessions exist. The
//! registry owns its handle, the reference count and the calibration
//! constants read at open; every [`SensorSession`](crate::SensorSession)
//! created from it shares them. The first session to attach opens the device
//! and the last one to detach closes it.
//!
//! The registry is single-threaded: it is neither `Send` nor `Sync`, and all
//! sessions must live on the thread that created it.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rift_hid_dk1_protocol::{
    ByteCursor, KeepAlive, PacketKind, SensorConfig, SensorDisplayInfo, SensorRange,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::SensorLinkConfig;
use crate::device_info::HidDeviceInfo;
use crate::error::{SensorLinkError, SensorLinkResult};
use crate::session::SensorSession;
use crate::transport::{HidBackend, HidHandle};

/// Connection state shared by all sessions of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkState {
    /// No handle.
    Closed,
    /// Handle acquired, constants not read yet.
    OpenUninitialized,
    /// Constants cached, non-blocking mode set.
    Ready,
}

/// Feature reports read once when the device is opened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConstants {
    pub range: SensorRange,
    pub display_info: SensorDisplayInfo,
    pub config: SensorConfig,
}

#[derive(Clone)]
pub struct DeviceRegistry {
    shared: Rc<RefCell<SharedDevice>>,
}

impl DeviceRegistry {
    pub fn new(backend: impl HidBackend + 'static, config: SensorLinkConfig) -> Self {
        Self {
            shared: Rc::new(RefCell::new(SharedDevice {
                backend: Box::new(backend),
                config,
                handle: None,
                refcount: 0,
                initialized: false,
                constants: DeviceConstants::default(),
                last_keep_alive: None,
            })),
        }
    }

    /// Registry over the system HID stack.
    #[cfg(feature = "hidapi")]
    pub fn with_hidapi(config: SensorLinkConfig) -> SensorLinkResult<Self> {
        config.validate()?;
        let backend = crate::hidapi_backend::HidApiBackend::new()?;
        Ok(Self::new(backend, config))
    }

    /// Attach a new session, opening the tracker if needed.
    pub fn session(&self) -> SensorSession {
        SensorSession::new(self)
    }

    pub fn enumerate(&self) -> SensorLinkResult<Vec<HidDeviceInfo>> {
        let mut shared = self.shared.borrow_mut();
        shared.backend.enumerate().map_err(|e| {
            warn!(error = %e, "Could not enumerate HID devices");
            e.into()
        })
    }

    pub fn refcount(&self) -> usize {
        self.shared.borrow().refcount
    }

    pub fn is_open(&self) -> bool {
        self.shared.borrow().handle.is_some()
    }

    pub fn state(&self) -> LinkState {
        self.shared.borrow().state()
    }

    pub fn constants(&self) -> DeviceConstants {
        self.shared.borrow().constants
    }

    pub fn config(&self) -> SensorLinkConfig {
        self.shared.borrow().config.clone()
    }

    pub(crate) fn with_device<R>(&self, f: impl FnOnce(&mut SharedDevice) -> R) -> R {
        f(&mut self.shared.borrow_mut())
    }
}

pub(crate) struct SharedDevice {
    backend: Box<dyn HidBackend>,
    config: SensorLinkConfig,
    handle: Option<Box<dyn HidHandle>>,
    refcount: usize,
    initialized: bool,
    constants: DeviceConstants,
    last_keep_alive: Option<Instant>,
}

impl SharedDevice {
    pub(crate) fn state(&self) -> LinkState {
        match (&self.handle, self.initialized) {
            (None, _) => LinkState::Closed,
            (Some(_), false) => LinkState::OpenUninitialized,
            (Some(_), true) => LinkState::Ready,
        }
    }

    pub(crate) fn config(&self) -> &SensorLinkConfig {
        &self.config
    }

    pub(crate) fn constants(&self) -> &DeviceConstants {
        &self.constants
    }

    /// Count a new session and make sure the tracker is open.
    pub(crate) fn acquire(&mut self) {
        self.refcount += 1;
        if self.handle.is_none()
            && let Err(e) = self.open()
        {
            debug!(error = %e, "Session attached to a closed tracker");
        }
    }

    /// Uncount a session, closing the tracker after the last one.
    pub(crate) fn release(&mut self) {
        self.refcount = self.refcount.saturating_sub(1);
        if self.refcount == 0 {
            self.close();
        }
    }

    fn open(&mut self) -> SensorLinkResult<()> {
        let (vendor_id, product_id) = (self.config.vendor_id, self.config.product_id);
        let handle = match self.backend.open(vendor_id, product_id) {
            Ok(handle) => handle,
            Err(e) => {
                error!(
                    error = %e,
                    "Could not connect to Oculus VR's Tracker DK {vendor_id:04x}:{product_id:04x}"
                );
                return Err(SensorLinkError::DeviceNotFound {
                    vendor_id,
                    product_id,
                });
            }
        };
        self.handle = Some(handle);
        self.initialized = false;
        info!("Opened tracker {vendor_id:04x}:{product_id:04x}");

        if let Err(e) = handle_mut(&mut self.handle)?.set_nonblocking(true) {
            warn!(error = %e, "Could not set tracker non-blocking mode");
        }

        self.read_features();
        self.initialized = true;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.close();
            info!("Closed tracker");
        }
        self.initialized = false;
        self.last_keep_alive = None;
    }

    /// Refresh the three constant feature reports. Each failure is logged and
    /// leaves the previous value cached.
    fn read_features(&mut self) {
        let mut cursor = ByteCursor::new();

        if let Ok(range) = self.read_feature(PacketKind::SensorRange, &mut cursor, SensorRange::decode) {
            self.constants.range = range;
        }
        if let Ok(display_info) =
            self.read_feature(PacketKind::SensorDisplayInfo, &mut cursor, SensorDisplayInfo::decode)
        {
            self.constants.display_info = display_info;
        }
        if let Ok(config) = self.read_feature(PacketKind::SensorConfig, &mut cursor, SensorConfig::decode) {
            self.constants.config = config;
        }
    }

    /// Request feature report `kind` and decode the answer.
    fn read_feature<T>(
        &mut self,
        kind: PacketKind,
        cursor: &mut ByteCursor,
        decode: impl FnOnce(&mut ByteCursor, usize) -> rift_hid_dk1_protocol::ProtocolResult<T>,
    ) -> SensorLinkResult<T> {
        let handle = handle_mut(&mut self.handle)?;

        cursor.reset();
        cursor.write_u8(kind.report_id());
        cursor.rewind();

        let size = handle.get_feature_report(cursor.as_mut_slice()).map_err(|e| {
            warn!(error = %e, "Could not read {kind} feature");
            SensorLinkError::from(e)
        })?;

        decode(cursor, size).map_err(|e| {
            warn!(error = %e, "Discarding {kind} feature");
            SensorLinkError::from(e)
        })
    }

    /// Send the `len` bytes the cursor was encoded with.
    fn send_feature(&mut self, kind: PacketKind, cursor: &ByteCursor) -> SensorLinkResult<()> {
        let handle = handle_mut(&mut self.handle)?;
        handle
            .send_feature_report(cursor.written())
            .map(|_| ())
            .map_err(|e| {
                warn!(error = %e, "Could not write {kind} feature");
                SensorLinkError::from(e)
            })
    }

    /// Re-read Sensor Config from the device and cache it.
    pub(crate) fn refresh_config(&mut self) -> SensorLinkResult<SensorConfig> {
        let mut cursor = ByteCursor::new();
        let config = self.read_feature(PacketKind::SensorConfig, &mut cursor, SensorConfig::decode)?;
        self.constants.config = config;
        Ok(config)
    }

    /// Write `config` to the device, then read it back.
    pub(crate) fn write_config(&mut self, config: &SensorConfig) -> SensorLinkResult<SensorConfig> {
        let mut cursor = ByteCursor::new();
        config.encode(&mut cursor);
        self.send_feature(PacketKind::SensorConfig, &cursor)?;
        self.refresh_config()
    }

    /// Keep-alive period in effect: the device's, or the configured fallback
    /// while the device reports none.
    pub(crate) fn keep_alive_interval(&self) -> u16 {
        match self.constants.config.keep_alive_interval {
            0 => self.config.default_keep_alive_interval_ms,
            interval => interval,
        }
    }

    /// Send a keep-alive when none was sent yet or the interval has elapsed
    /// at `now`. Returns whether one was sent.
    pub(crate) fn keep_alive_if_due(&mut self, now: Instant) -> SensorLinkResult<bool> {
        let interval = self.keep_alive_interval();
        let due = match self.last_keep_alive {
            None => true,
            Some(last) => {
                now.saturating_duration_since(last) > Duration::from_millis(u64::from(interval))
            }
        };
        if !due {
            return Ok(false);
        }

        let mut cursor = ByteCursor::new();
        KeepAlive::new(interval).encode(&mut cursor);
        self.send_feature(PacketKind::KeepAlive, &cursor)?;
        self.last_keep_alive = Some(now);
        debug!(interval_ms = interval, "Sent keep-alive");
        Ok(true)
    }

    /// One non-blocking read into a freshly reset cursor. `Ok(0)` when
    /// nothing is pending.
    pub(crate) fn read_input(&mut self, cursor: &mut ByteCursor) -> SensorLinkResult<usize> {
        let handle = handle_mut(&mut self.handle)?;
        cursor.reset();
        handle.read(cursor.as_mut_slice()).map_err(|e| {
            warn!(error = %e, "Could not read from tracker");
            SensorLinkError::from(e)
        })
    }
}

fn handle_mut(handle: &mut Option<Box<dyn HidHandle>>) -> SensorLinkResult<&mut dyn HidHandle> {
    match handle {
        Some(handle) => Ok(handle.as_mut()),
        None => Err(SensorLinkError::NotOpen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockDevice, MockTransaction};
    use tracing_test::traced_test;

    #[test]
    fn test_open_reads_constants_in_order() {
        let device = MockDevice::dk1();
        let registry = DeviceRegistry::new(MockBackend::new(device.clone()), SensorLinkConfig::default());
        let session = registry.session();

        assert_eq!(registry.state(), LinkState::Ready);
        assert_eq!(
            device.transactions(),
            vec![
                MockTransaction::SetNonblocking(true),
                MockTransaction::GetFeature { report_id: 4, len: 8 },
                MockTransaction::GetFeature { report_id: 9, len: 56 },
                MockTransaction::GetFeature { report_id: 2, len: 7 },
            ]
        );
        assert_eq!(registry.constants().display_info.h_resolution, 1280);
        assert_eq!(registry.constants().range.gyro_scale, 2000);
        drop(session);
        assert_eq!(registry.state(), LinkState::Closed);
    }

    #[test]
    #[traced_test]
    fn test_failed_feature_keeps_default() {
        let device = MockDevice::dk1();
        device.set_feature_reply(9, vec![9; 55]);
        let registry = DeviceRegistry::new(MockBackend::new(device), SensorLinkConfig::default());
        let _session = registry.session();

        assert_eq!(registry.state(), LinkState::Ready);
        assert_eq!(registry.constants().display_info, SensorDisplayInfo::default());
        assert_eq!(registry.constants().config.keep_alive_interval, 1000);
        assert!(logs_contain("Discarding Sensor Display Info feature"));
    }

    #[test]
    #[traced_test]
    fn test_missing_device_stays_closed() {
        let registry = DeviceRegistry::new(MockBackend::empty(), SensorLinkConfig::default());
        let session = registry.session();
        assert_eq!(registry.state(), LinkState::Closed);
        assert_eq!(registry.refcount(), 1);
        assert!(logs_contain("Could not connect to Oculus VR's Tracker DK"));
        drop(session);
        assert_eq!(registry.refcount(), 0);
    }

    #[test]
    fn test_keep_alive_interval_fallback() {
        let device = MockDevice::dk1();
        device.set_config(&SensorConfig::default());
        let config = SensorLinkConfig {
            default_keep_alive_interval_ms: 250,
            ..SensorLinkConfig::default()
        };
        let registry = DeviceRegistry::new(MockBackend::new(device), config);
        let _session = registry.session();
        assert_eq!(registry.with_device(|d| d.keep_alive_interval()), 250);
    }
}
