//! Keep-Alive feature report (id 8, 5 bytes).

use serde::{Deserialize, Serialize};

use crate::cursor::ByteCursor;
use crate::error::{ProtocolResult, check_size};
use crate::types::PacketKind;

/// Keeps the tracker streaming input reports for another interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepAlive {
    pub command_id: u16,
    /// Milliseconds the tracker keeps streaming before it needs another one.
    pub keep_alive_interval: u16,
}

impl KeepAlive {
    pub const KIND: PacketKind = PacketKind::KeepAlive;

    pub fn new(keep_alive_interval: u16) -> Self {
        Self {
            command_id: 0,
            keep_alive_interval,
        }
    }

    /// Write the report into a freshly reset cursor and return its length.
    pub fn encode(&self, cursor: &mut ByteCursor) -> usize {
        cursor.reset();
        cursor.write_u8(Self::KIND.report_id());
        cursor.write_u16(self.command_id);
        cursor.write_u16(self.keep_alive_interval);
        cursor.position()
    }

    /// Decode a keep-alive as written by [`encode`](Self::encode). The tracker
    /// never sends one; mocks use this to inspect recorded writes.
    pub fn decode(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<Self> {
        check_size(Self::KIND, size)?;
        cursor.skip_byte();

        Ok(Self {
            command_id: cursor.read_u16(),
            keep_alive_interval: cursor.read_u16(),
        })
    }
}
