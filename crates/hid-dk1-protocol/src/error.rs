//! Codec failures.

use crate::types::PacketKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("Invalid packet size for {kind}: {actual} (expected {expected})")]
    SizeMismatch {
        kind: PacketKind,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown input report type {0:#04x}")]
    UnknownMessageType(u8),

    #[error("Empty input report")]
    Empty,
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Reject `size` unless it is the fixed wire size of `kind`.
pub(crate) fn check_size(kind: PacketKind, size: usize) -> ProtocolResult<()> {
    let expected = kind.wire_size();
    if size == expected {
        Ok(())
    } else {
        Err(ProtocolError::SizeMismatch {
            kind,
            expected,
            actual: size,
        })
    }
}
