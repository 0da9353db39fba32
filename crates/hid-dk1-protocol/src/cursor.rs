//! Forward-only reader/writer over a fixed transfer buffer.

use crate::ids::BUFFER_SIZE;

/// Mask for one packed 21-bit axis value.
const I21_MASK: u32 = 0x001F_FFFF;

/// Sequential little-endian reader and writer over a [`BUFFER_SIZE`] byte
/// buffer.
///
/// One cursor is reused for every transaction of a call: `reset()` between
/// packets instead of allocating a new one. Access past the end of the buffer
/// never panics; reads yield zero bytes and writes are dropped. Packet decoders
/// validate the reported size before reading, so that only happens on misuse.
#[derive(Clone)]
pub struct ByteCursor {
    buffer: [u8; BUFFER_SIZE],
    position: usize,
}

impl ByteCursor {
    pub fn new() -> Self {
        Self {
            buffer: [0u8; BUFFER_SIZE],
            position: 0,
        }
    }

    /// Copy `data` into a fresh cursor positioned at 0. Anything beyond
    /// [`BUFFER_SIZE`] is ignored.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut cursor = Self::new();
        for (dst, src) in cursor.buffer.iter_mut().zip(data) {
            *dst = *src;
        }
        cursor
    }

    /// Zero the buffer and move back to the start.
    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.position = 0;
    }

    /// Move back to the start, keeping the contents.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Whole buffer, for transports to fill in place.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Bytes between the start of the buffer and the current position.
    pub fn written(&self) -> &[u8] {
        self.buffer.get(..self.position).unwrap_or(&self.buffer)
    }

    pub fn skip(&mut self, count: usize) {
        self.position = self.position.saturating_add(count).min(BUFFER_SIZE);
    }

    pub fn skip_byte(&mut self) {
        self.skip(1);
    }

    pub fn peek_u8(&self) -> u8 {
        self.buffer.get(self.position).copied().unwrap_or(0)
    }

    pub fn read_u8(&mut self) -> u8 {
        let value = self.peek_u8();
        self.skip(1);
        value
    }

    pub fn read_u16(&mut self) -> u16 {
        u16::from_le_bytes([self.read_u8(), self.read_u8()])
    }

    pub fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes([
            self.read_u8(),
            self.read_u8(),
            self.read_u8(),
            self.read_u8(),
        ])
    }

    /// Read a 4-byte float field by widening its first byte only.
    ///
    /// This does not decode IEEE-754 bits: the value is the first raw byte as
    /// a float and the remaining three bytes are skipped. The display info
    /// distortion coefficients are read this way; the result is suspect but
    /// kept bit-for-bit.
    pub fn read_f(&mut self) -> f32 {
        let value = f32::from(self.peek_u8());
        self.skip(4);
        value
    }

    /// Read a little-endian signed 32-bit fixed-point value in millionths.
    pub fn read_ff(&mut self) -> f32 {
        let raw = i32::from_le_bytes(self.read_u32().to_le_bytes());
        raw as f32 / 1_000_000.0
    }

    /// Decode three tightly packed signed 21-bit values from 8 bytes.
    ///
    /// Each value is assembled into the top 21 bits of a 32-bit word and then
    /// shifted down arithmetically by 11 so the sign extends. The lowest bit
    /// of the last byte is unused.
    pub fn read_i21(&mut self) -> [i32; 3] {
        let mut raw = [0u8; 8];
        for byte in &mut raw {
            *byte = self.read_u8();
        }
        let [b0, b1, b2, b3, b4, b5, b6, b7] = raw.map(u32::from);

        let v0 = (b0 << 24) | (b1 << 16) | ((b2 & 0xF8) << 8);
        let v1 = ((b2 & 0x07) << 29) | (b3 << 21) | (b4 << 13) | ((b5 & 0xC0) << 5);
        let v2 = ((b5 & 0x3F) << 26) | (b6 << 18) | (b7 << 10);

        [v0, v1, v2].map(|v| i32::from_ne_bytes(v.to_ne_bytes()) >> 11)
    }

    pub fn write_u8(&mut self, value: u8) {
        if let Some(slot) = self.buffer.get_mut(self.position) {
            *slot = value;
        }
        self.skip(1);
    }

    pub fn write_u16(&mut self, value: u16) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    pub fn write_u32(&mut self, value: u32) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    /// Inverse of [`read_f`](Self::read_f): the integral part, saturated to a
    /// byte, followed by three zero bytes.
    pub fn write_f(&mut self, value: f32) {
        self.write_u8(value.clamp(0.0, 255.0) as u8);
        self.write_u8(0);
        self.write_u16(0);
    }

    /// Inverse of [`read_ff`](Self::read_ff).
    pub fn write_ff(&mut self, value: f32) {
        let raw = (value * 1_000_000.0).round() as i32;
        self.write_u32(u32::from_le_bytes(raw.to_le_bytes()));
    }

    /// Inverse of [`read_i21`](Self::read_i21). Values are truncated to their
    /// low 21 bits.
    pub fn write_i21(&mut self, values: [i32; 3]) {
        let [u0, u1, u2] = values.map(|v| u32::from_ne_bytes(v.to_ne_bytes()) & I21_MASK);

        let packed = [
            u0 >> 13,
            (u0 >> 5) & 0xFF,
            ((u0 & 0x1F) << 3) | (u1 >> 18),
            (u1 >> 10) & 0xFF,
            (u1 >> 2) & 0xFF,
            ((u1 & 0x03) << 6) | (u2 >> 15),
            (u2 >> 7) & 0xFF,
            (u2 & 0x7F) << 1,
        ];
        for byte in packed {
            self.write_u8(byte.to_le_bytes()[0]);
        }
    }
}

impl Default for ByteCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ByteCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteCursor")
            .field("position", &self.position)
            .field("written", &self.written())
            .finish()
    }
}
