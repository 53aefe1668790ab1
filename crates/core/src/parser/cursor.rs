//! Bounded big-endian reads over an in-memory byte buffer.
//!
//! The cursor is the only way the decoder advances through a DVI stream;
//! every read checks the remaining length first, so a truncated file
//! surfaces as an `OutOfBounds` error at the exact offset of the short
//! read rather than a panic.

use crate::error::{DviError, Result};
use byteorder::{BigEndian, ByteOrder};

/// A read position over a borrowed byte buffer.
///
/// Invariant: `pos <= buf.len()` at all times. The cursor is owned by a
/// single decode session and only read operations advance it.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True when every byte of the buffer has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos == self.buf.len()
    }

    /// Take the next `n` bytes, advancing the cursor.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(DviError::OutOfBounds {
                offset: self.pos,
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian unsigned integer of `width` bytes (1 to 4).
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        debug_assert!((1..=4).contains(&width));
        Ok(BigEndian::read_uint(self.take(width)?, width))
    }

    /// Read a big-endian two's-complement integer of `width` bytes (1 to 4),
    /// sign-extended.
    pub fn read_int(&mut self, width: usize) -> Result<i64> {
        debug_assert!((1..=4).contains(&width));
        Ok(BigEndian::read_int(self.take(width)?, width))
    }

    /// Read a 16-bit big-endian unsigned integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(self.read_uint(2)? as u16)
    }

    /// Read a 32-bit big-endian unsigned integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(self.read_uint(4)? as u32)
    }

    /// Read a 32-bit big-endian signed integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_int(4)? as i32)
    }

    /// Read the next `n` bytes as a slice.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Consume the rest of the buffer without decoding, returning the
    /// number of bytes skipped. Used for post-postamble fill bytes.
    pub fn skip_to_end(&mut self) -> usize {
        let skipped = self.remaining();
        self.pos = self.buf.len();
        skipped
    }
}
