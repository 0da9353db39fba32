//! Input report dispatch by message-type tag.

use crate::cursor::ByteCursor;
use crate::error::{ProtocolError, ProtocolResult};
use crate::ids::report_ids;
use crate::tracker::TrackerMessage;

/// Input report types the tracker is known to push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTag {
    Tracker,
}

impl MessageTag {
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            report_ids::TRACKER_MESSAGE => Some(Self::Tracker),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Self::Tracker => report_ids::TRACKER_MESSAGE,
        }
    }
}

/// A decoded input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMessage {
    Tracker(TrackerMessage),
}

/// Decode the `size`-byte input report starting at the cursor position,
/// selecting the decoder by its first byte.
pub fn decode_input_report(cursor: &mut ByteCursor, size: usize) -> ProtocolResult<InputMessage> {
    if size == 0 {
        return Err(ProtocolError::Empty);
    }

    let tag = cursor.peek_u8();
    match MessageTag::from_tag(tag) {
        Some(MessageTag::Tracker) => TrackerMessage::decode(cursor, size).map(InputMessage::Tracker),
        None => Err(ProtocolError::UnknownMessageType(tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PacketKind;

    #[test]
    fn test_dispatch_tracker() -> Result<(), Box<dyn std::error::Error>> {
        let message = TrackerMessage {
            num_samples: 1,
            timestamp: 99,
            ..TrackerMessage::default()
        };
        let mut cursor = ByteCursor::new();
        let len = message.encode(&mut cursor);
        cursor.rewind();

        let InputMessage::Tracker(decoded) = decode_input_report(&mut cursor, len)?;
        assert_eq!(decoded.timestamp, 99);
        Ok(())
    }

    #[test]
    fn test_unknown_tag() {
        let mut cursor = ByteCursor::from_bytes(&[0x0B, 0x00]);
        assert_eq!(
            decode_input_report(&mut cursor, 2),
            Err(ProtocolError::UnknownMessageType(0x0B))
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_tracker_tag_with_wrong_size() {
        let mut cursor = ByteCursor::from_bytes(&[0x01]);
        assert!(matches!(
            decode_input_report(&mut cursor, 61),
            Err(ProtocolError::SizeMismatch {
                kind: PacketKind::TrackerMessage,
                ..
            })
        ));
    }

    #[test]
    fn test_empty_report() {
        let mut cursor = ByteCursor::new();
        assert_eq!(decode_input_report(&mut cursor, 0), Err(ProtocolError::Empty));
    }

    #[test]
    fn test_tag_round_trip() {
        assert_eq!(MessageTag::from_tag(MessageTag::Tracker.tag()), Some(MessageTag::Tracker));
    }
}
