//! Primitive encoding/decoding for the TLV binary format.
//!
//! Implements LEB128 varints, fixed-width Int32, and length-prefixed text.

use crate::error::DecodeError;
use crate::limits::{INT32_BYTES, MAX_VARINT_BYTES};

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and a cursor, and provides methods for reading
/// primitives with bounds checking. Errors carry the cursor offset.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let Some(&byte) = self.data.get(self.pos) else {
            return Err(DecodeError::TruncatedInput { offset: self.pos, context });
        };
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::TruncatedInput { offset: self.pos, context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads an unsigned varint (LEB128).
    ///
    /// Non-minimal encodings are accepted. A varint that runs past 10 bytes,
    /// or whose 10th byte carries bits above bit 63, is malformed. Input
    /// that ends before a terminating byte is truncated.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let start = self.pos;
        let mut result: u64 = 0;
        let mut shift = 0;

        for _ in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let value = (byte & 0x7F) as u64;

            // The 10th byte may only contribute bit 63
            if shift == 63 && value > 1 {
                return Err(DecodeError::MalformedVarint { offset: start });
            }

            result |= value << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }
            shift += 7;
        }

        // Ten continuation bytes: only an 11th byte makes it too long
        if self.is_empty() {
            return Err(DecodeError::TruncatedInput { offset: self.pos, context });
        }
        Err(DecodeError::MalformedVarint { offset: start })
    }

    /// Reads a varint used as a length or count, checked against the
    /// remaining input so it can never exceed addressable memory.
    ///
    /// `min_item_size` is the smallest number of bytes one counted item can
    /// occupy; a declared count that cannot fit is reported as truncation.
    pub fn read_length(
        &mut self,
        min_item_size: usize,
        context: &'static str,
    ) -> Result<usize, DecodeError> {
        let len = self.read_varint(context)?;
        let remaining = self.remaining_len() as u64;
        match len.checked_mul(min_item_size as u64) {
            Some(needed) if needed <= remaining => Ok(len as usize),
            _ => Err(DecodeError::TruncatedInput { offset: self.pos, context }),
        }
    }

    /// Reads a little-endian two's-complement i32.
    #[inline]
    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        let bytes = self.read_bytes(INT32_BYTES, context)?;
        let mut buf = [0u8; INT32_BYTES];
        buf.copy_from_slice(bytes);
        Ok(i32::from_le_bytes(buf))
    }

    /// Reads a length-prefixed UTF-8 string, borrowing from the input.
    #[inline]
    pub fn read_str(&mut self, context: &'static str) -> Result<&'a str, DecodeError> {
        let len = self.read_length(1, context)?;
        let start = self.pos;
        let bytes = self.read_bytes(len, context)?;
        std::str::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8 {
            offset: start + e.valid_up_to(),
        })
    }

    /// Reads a length-prefixed UTF-8 string.
    #[inline]
    pub fn read_string(&mut self, context: &'static str) -> Result<String, DecodeError> {
        // Validate UTF-8 on borrowed slice, then allocate once
        self.read_str(context).map(str::to_string)
    }
}

/// Decodes a varint from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied.
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut reader = Reader::new(bytes);
    let value = reader.read_varint("varint")?;
    Ok((value, reader.position()))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Reserves room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.buf.reserve(additional);
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes an unsigned varint (LEB128).
    #[inline]
    pub fn write_varint(&mut self, mut value: u64) {
        // Stack buffer batches the writes into one extend
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        while value >= 0x80 {
            buf[len] = (value as u8) | 0x80;
            value >>= 7;
            len += 1;
        }
        buf[len] = value as u8;
        len += 1;
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes a little-endian two's-complement i32.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) {
        self.write_varint(s.len() as u64);
        self.buf.extend_from_slice(s.as_bytes());
    }
}

/// Encodes `n` as a standalone LEB128 byte sequence (1 to 10 bytes).
pub fn encode_varint(n: u64) -> Vec<u8> {
    let mut writer = Writer::with_capacity(varint_len(n));
    writer.write_varint(n);
    writer.into_bytes()
}

/// Returns the number of bytes `n` occupies as a varint.
#[inline]
pub fn varint_len(n: u64) -> usize {
    let bits = 64 - n.leading_zeros() as usize;
    bits.div_ceil(7).max(1)
}
