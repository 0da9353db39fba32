//! Session and transport error types.

use rift_hid_dk1_protocol::ProtocolError;

/// Failures reported by a [`HidBackend`](crate::HidBackend) or
/// [`HidHandle`](crate::HidHandle).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to enumerate HID devices: {0}")]
    Enumerate(String),

    #[error("Failed to open device {vendor_id:#06x}:{product_id:#06x}: {message}")]
    Open {
        vendor_id: u16,
        product_id: u16,
        message: String,
    },

    #[error("Failed to get feature report {report_id:#04x}: {message}")]
    FeatureGet { report_id: u8, message: String },

    #[error("Failed to send feature report {report_id:#04x}: {message}")]
    FeatureSet { report_id: u8, message: String },

    #[error("Failed to read from device: {0}")]
    Read(String),

    #[error("Failed to configure device: {0}")]
    Configure(String),

    #[error("Device disconnected")]
    Disconnected,
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorLinkError {
    #[error("Tracker not found: vendor={vendor_id:#06x}, product={product_id:#06x}")]
    DeviceNotFound { vendor_id: u16, product_id: u16 },

    #[error("Tracker is not open")]
    NotOpen,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SensorLinkResult<T> = Result<T, SensorLinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SensorLinkError::DeviceNotFound {
            vendor_id: 0x2833,
            product_id: 0x0001,
        };
        assert_eq!(
            err.to_string(),
            "Tracker not found: vendor=0x2833, product=0x0001"
        );

        let err: SensorLinkError = TransportError::FeatureGet {
            report_id: 9,
            message: "timeout".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Failed to get feature report 0x09: timeout");
    }
}
