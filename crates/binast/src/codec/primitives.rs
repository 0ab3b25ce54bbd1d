//! Primitive encoding/decoding for the container format.
//!
//! Implements the 7-bit varint, booleans, doubles and raw byte runs.
//!
//! The varint is not LEB128: each byte carries its payload in the upper seven
//! bits and a continuation flag in the least-significant bit, groups ordered
//! least-significant first.

use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
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

    /// Moves the cursor back to a position previously returned by
    /// [`Reader::position`].
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.data.len());
        self.pos = pos.min(self.data.len());
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
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads bytes up to and including `terminator`, reading at most `max_len`.
    pub fn read_until(
        &mut self,
        terminator: u8,
        max_len: usize,
        context: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        loop {
            if self.pos - start >= max_len {
                return Err(DecodeError::LengthExceedsLimit {
                    field: context,
                    len: self.pos - start + 1,
                    max: max_len,
                });
            }
            if self.read_byte(context)? == terminator {
                return Ok(&self.data[start..self.pos]);
            }
        }
    }

    /// Splits off the next `len` bytes as an independent reader.
    pub fn read_sub_reader(
        &mut self,
        len: usize,
        context: &'static str,
    ) -> Result<Reader<'a>, DecodeError> {
        Ok(Reader::new(self.read_bytes(len, context)?))
    }

    /// Reads an unsigned varint.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let mut result: u64 = 0;
        let mut shift = 0;

        for _ in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            result |= u64::from(byte >> 1) << shift;

            if byte & 0x01 == 0 {
                return u32::try_from(result).map_err(|_| DecodeError::VarintOverflow);
            }
            shift += 7;
        }

        Err(DecodeError::VarintOverflow)
    }

    /// Reads a varint used as a count or length, bounded by `max`.
    pub fn read_len(&mut self, max: usize, field: &'static str) -> Result<usize, DecodeError> {
        let len = self.read_varint(field)? as usize;
        if len > max {
            return Err(DecodeError::LengthExceedsLimit { field, len, max });
        }
        Ok(len)
    }

    /// Reads a boolean byte.
    ///
    /// Byte 2 is the nullable-boolean encoding, which is rejected.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        match self.read_byte(context)? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            0x02 => Err(DecodeError::NullableBoolUnsupported),
            value => Err(DecodeError::InvalidBool { value }),
        }
    }

    /// Reads a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        let bytes = self.read_bytes(8, context)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }
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

    /// Writes an unsigned varint using the minimal number of groups.
    ///
    /// Fails for values that do not fit in 32 bits.
    #[inline]
    pub fn write_varint(&mut self, value: u64) -> Result<(), EncodeError> {
        if value > u64::from(u32::MAX) {
            return Err(EncodeError::VarintOverflow { value });
        }
        let mut value = value;
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let mut len = 0;
        loop {
            let group = (value & 0x7F) as u8;
            value >>= 7;
            let more = u8::from(value != 0);
            buf[len] = (group << 1) | more;
            len += 1;
            if value == 0 {
                break;
            }
        }
        self.buf.extend_from_slice(&buf[..len]);
        Ok(())
    }

    /// Writes a count or length as a varint.
    pub fn write_len(&mut self, len: usize) -> Result<(), EncodeError> {
        self.write_varint(len as u64)
    }

    /// Writes a boolean byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Writes a little-endian f64.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }
}
