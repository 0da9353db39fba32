//! Oculus Rift DK1 tracker session.
//!
//! Sits on top of `rift-hid-dk1-protocol` and owns the device side of the
//! link: finding and opening the tracker, reading its calibration constants
//! once, sending keep-alives so it keeps streaming, and draining motion
//! reports every frame.
//!
//! ```no_run
//! # #[cfg(feature = "hidapi")]
//! # fn demo() -> Result<(), rift_sensor_link::SensorLinkError> {
//! use rift_sensor_link::{DeviceRegistry, SensorLinkConfig};
//!
//! let registry = DeviceRegistry::with_hidapi(SensorLinkConfig::default())?;
//! let mut session = registry.session();
//! session.update()?;
//! println!("{:?}", session.acceleration());
//! # Ok(())
//! # }
//! ```
//!
//! Everything here is single-threaded and poll-driven. There is no
//! background thread; the caller is expected to call
//! [`SensorSession::update`] once per frame.

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod device_info;
pub mod error;
#[cfg(feature = "hidapi")]
pub mod hidapi_backend;
pub mod mock;
pub mod registry;
pub mod session;
pub mod transport;

pub use config::{DEFAULT_KEEP_ALIVE_INTERVAL_MS, DEFAULT_RAW_SCALE, SensorLinkConfig};
pub use device_info::HidDeviceInfo;
pub use error::{SensorLinkError, SensorLinkResult, TransportError, TransportResult};
#[cfg(feature = "hidapi")]
pub use hidapi_backend::HidApiBackend;
pub use registry::{DeviceConstants, DeviceRegistry, LinkState};
pub use session::{SensorSession, UpdateStats, Vector3};
pub use transport::{HidBackend, HidHandle};

pub use rift_hid_dk1_protocol as protocol;
