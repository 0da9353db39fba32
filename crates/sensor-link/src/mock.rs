//! Scripted in-memory tracker for tests and demos.
//!
//! A [`MockDevice`] is a cheap handle onto shared state: keep one clone to
//! script replies and inspect traffic, and hand a [`MockBackend`] built from
//! another clone to the registry.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use rift_hid_dk1_protocol::{
    ByteCursor, DK1_PRODUCT_ID, DK1_VENDOR_ID, DistortionType, KeepAlive, SensorConfig,
    SensorDisplayInfo, SensorRange, TrackerMessage, report_ids,
};

use crate::device_info::HidDeviceInfo;
use crate::error::{TransportError, TransportResult};
use crate::transport::{HidBackend, HidHandle};

/// One call observed on a mock handle, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockTransaction {
    SetNonblocking(bool),
    GetFeature { report_id: u8, len: usize },
    SendFeature(Vec<u8>),
    Read { len: usize },
    Close,
}

struct MockState {
    info: HidDeviceInfo,
    feature_replies: HashMap<u8, Vec<u8>>,
    queued_feature_replies: HashMap<u8, VecDeque<Vec<u8>>>,
    input_queue: VecDeque<Vec<u8>>,
    transactions: Vec<MockTransaction>,
    echo_config_writes: bool,
    fail_reads: bool,
    fail_feature_gets: bool,
    fail_feature_sets: bool,
    open_count: usize,
    close_count: usize,
}

#[derive(Clone)]
pub struct MockDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockDevice {
    /// A device with no feature replies scripted.
    pub fn new(vendor_id: u16, product_id: u16, path: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                info: HidDeviceInfo::new(vendor_id, product_id, path),
                feature_replies: HashMap::new(),
                queued_feature_replies: HashMap::new(),
                input_queue: VecDeque::new(),
                transactions: Vec::new(),
                echo_config_writes: true,
                fail_reads: false,
                fail_feature_gets: false,
                fail_feature_sets: false,
                open_count: 0,
                close_count: 0,
            })),
        }
    }

    /// A DK1 tracker answering the three constant feature reports with
    /// production-like values and adopting config writes.
    pub fn dk1() -> Self {
        let device = Self::new(DK1_VENDOR_ID, DK1_PRODUCT_ID, "mock://tracker-dk");
        device.set_range(&dk1_range());
        device.set_display_info(&dk1_display_info());
        device.set_config(&dk1_config());
        device
    }

    pub fn info(&self) -> HidDeviceInfo {
        self.state.borrow().info.clone()
    }

    /// Reply returned for every request of `report_id` once the queue for it
    /// is empty.
    pub fn set_feature_reply(&self, report_id: u8, data: Vec<u8>) {
        self.state.borrow_mut().feature_replies.insert(report_id, data);
    }

    /// One-shot reply, served before the persistent one.
    pub fn queue_feature_reply(&self, report_id: u8, data: Vec<u8>) {
        self.state
            .borrow_mut()
            .queued_feature_replies
            .entry(report_id)
            .or_default()
            .push_back(data);
    }

    pub fn set_range(&self, range: &SensorRange) {
        self.set_feature_reply(report_ids::RANGE, encoded(|c| range.encode(c)));
    }

    pub fn set_display_info(&self, info: &SensorDisplayInfo) {
        self.set_feature_reply(report_ids::DISPLAY_INFO, encoded(|c| info.encode(c)));
    }

    pub fn set_config(&self, config: &SensorConfig) {
        self.set_feature_reply(report_ids::CONFIG, encoded(|c| config.encode(c)));
    }

    /// When on (the default), a Sensor Config write becomes the next config
    /// reply. When off, the device ignores config writes.
    pub fn set_echo_config_writes(&self, echo: bool) {
        self.state.borrow_mut().echo_config_writes = echo;
    }

    pub fn queue_input(&self, data: Vec<u8>) {
        self.state.borrow_mut().input_queue.push_back(data);
    }

    pub fn queue_tracker(&self, message: &TrackerMessage) {
        self.queue_input(encoded(|c| message.encode(c)));
    }

    pub fn pending_inputs(&self) -> usize {
        self.state.borrow().input_queue.len()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }

    pub fn fail_feature_gets(&self, fail: bool) {
        self.state.borrow_mut().fail_feature_gets = fail;
    }

    pub fn fail_feature_sets(&self, fail: bool) {
        self.state.borrow_mut().fail_feature_sets = fail;
    }

    pub fn transactions(&self) -> Vec<MockTransaction> {
        self.state.borrow().transactions.clone()
    }

    pub fn clear_transactions(&self) {
        self.state.borrow_mut().transactions.clear();
    }

    /// Payloads of every successful feature write.
    pub fn feature_writes(&self) -> Vec<Vec<u8>> {
        self.state
            .borrow()
            .transactions
            .iter()
            .filter_map(|t| match t {
                MockTransaction::SendFeature(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    /// Every keep-alive written so far, decoded.
    pub fn keep_alives(&self) -> Vec<KeepAlive> {
        self.feature_writes()
            .into_iter()
            .filter(|data| data.first() == Some(&report_ids::KEEP_ALIVE))
            .filter_map(|data| KeepAlive::decode(&mut ByteCursor::from_bytes(&data), data.len()).ok())
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.state.borrow().open_count
    }

    pub fn close_count(&self) -> usize {
        self.state.borrow().close_count
    }
}

/// Backend exposing at most one [`MockDevice`].
pub struct MockBackend {
    device: Option<MockDevice>,
}

impl MockBackend {
    pub fn new(device: MockDevice) -> Self {
        Self {
            device: Some(device),
        }
    }

    /// Nothing attached: every open fails.
    pub fn empty() -> Self {
        Self { device: None }
    }
}

impl HidBackend for MockBackend {
    fn enumerate(&mut self) -> TransportResult<Vec<HidDeviceInfo>> {
        Ok(self.device.iter().map(MockDevice::info).collect())
    }

    fn open(&mut self, vendor_id: u16, product_id: u16) -> TransportResult<Box<dyn HidHandle>> {
        match &self.device {
            Some(device) if device.info().matches(vendor_id, product_id) => {
                device.state.borrow_mut().open_count += 1;
                Ok(Box::new(MockHandle {
                    state: Rc::clone(&device.state),
                    closed: false,
                }))
            }
            _ => Err(TransportError::Open {
                vendor_id,
                product_id,
                message: "no such device".to_string(),
            }),
        }
    }
}

struct MockHandle {
    state: Rc<RefCell<MockState>>,
    closed: bool,
}

impl MockHandle {
    fn ensure_open(&self) -> TransportResult<()> {
        if self.closed {
            Err(TransportError::Disconnected)
        } else {
            Ok(())
        }
    }
}

impl HidHandle for MockHandle {
    fn set_nonblocking(&mut self, nonblocking: bool) -> TransportResult<()> {
        self.ensure_open()?;
        self.state
            .borrow_mut()
            .transactions
            .push(MockTransaction::SetNonblocking(nonblocking));
        Ok(())
    }

    fn get_feature_report(&mut self, buf: &mut [u8]) -> TransportResult<usize> {
        self.ensure_open()?;
        let report_id = buf.first().copied().unwrap_or(0);
        let mut state = self.state.borrow_mut();
        if state.fail_feature_gets {
            return Err(TransportError::FeatureGet {
                report_id,
                message: "injected failure".to_string(),
            });
        }

        let queued = state
            .queued_feature_replies
            .get_mut(&report_id)
            .and_then(VecDeque::pop_front);
        let reply = queued
            .or_else(|| state.feature_replies.get(&report_id).cloned())
            .ok_or_else(|| TransportError::FeatureGet {
                report_id,
                message: "no reply scripted".to_string(),
            })?;

        let len = copy_into(buf, &reply);
        state
            .transactions
            .push(MockTransaction::GetFeature { report_id, len });
        Ok(len)
    }

    fn send_feature_report(&mut self, data: &[u8]) -> TransportResult<usize> {
        self.ensure_open()?;
        let report_id = data.first().copied().unwrap_or(0);
        let mut state = self.state.borrow_mut();
        if state.fail_feature_sets {
            return Err(TransportError::FeatureSet {
                report_id,
                message: "injected failure".to_string(),
            });
        }

        if report_id == report_ids::CONFIG && state.echo_config_writes {
            state.feature_replies.insert(report_id, data.to_vec());
        }
        state
            .transactions
            .push(MockTransaction::SendFeature(data.to_vec()));
        Ok(data.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> TransportResult<usize> {
        self.ensure_open()?;
        let mut state = self.state.borrow_mut();
        if state.fail_reads {
            return Err(TransportError::Read("injected failure".to_string()));
        }

        match state.input_queue.pop_front() {
            Some(report) => {
                let len = copy_into(buf, &report);
                state.transactions.push(MockTransaction::Read { len });
                Ok(len)
            }
            None => Ok(0),
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        let mut state = self.state.borrow_mut();
        state.close_count += 1;
        state.transactions.push(MockTransaction::Close);
    }
}

fn copy_into(buf: &mut [u8], data: &[u8]) -> usize {
    let mut len = 0;
    for (dst, src) in buf.iter_mut().zip(data) {
        *dst = *src;
        len += 1;
    }
    len
}

fn encoded(encode: impl FnOnce(&mut ByteCursor) -> usize) -> Vec<u8> {
    let mut cursor = ByteCursor::new();
    encode(&mut cursor);
    cursor.written().to_vec()
}

pub fn dk1_range() -> SensorRange {
    SensorRange {
        command_id: 0,
        accel_scale: 4,
        gyro_scale: 2000,
        mag_scale: 1300,
    }
}

/// Panel geometry as shipped on the DK1.
pub fn dk1_display_info() -> SensorDisplayInfo {
    SensorDisplayInfo {
        command_id: 0,
        distortion_type: DistortionType::Distortion,
        h_resolution: 1280,
        v_resolution: 800,
        h_screen_size: 0.14976,
        v_screen_size: 0.0936,
        v_center: 0.0468,
        lens_separation: 0.0635,
        eye_to_screen_distance: [0.041, 0.0],
        distortion_k: [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    }
}

pub fn dk1_config() -> SensorConfig {
    SensorConfig {
        command_id: 0,
        flags: Default::default(),
        packet_interval: 0,
        keep_alive_interval: 1000,
    }
}
