/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::binary::{bits_to_bytes, bytes_to_bits};
use crate::tables::BITS_PER_BYTE;
#[cfg(feature = "mem_dbg")]
use mem_dbg::{MemDbg, MemSize};

/// The byte buffer staging data between a bit cursor and a byte stream.
///
/// The buffer has a fixed capacity (which can only [grow](Cache::grow)),
/// holds `len` valid bytes, and a cursor `(byte_index, bit_index)` denoting
/// the next bit to consume or produce. The invariants are
/// `byte_index <= capacity`, `bit_index < 8`, `byte_index <= len` for
/// readers, and every byte after both `len` and the cursor is zero.
///
/// [`recycle`](Cache::recycle) discards the bytes before the cursor by moving
/// the remaining ones to the start of the buffer; the bit index within the
/// current byte is preserved, so no bit is lost or duplicated.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "mem_dbg", derive(MemDbg, MemSize))]
pub struct Cache {
    data: Vec<u8>,
    len: usize,
    byte_index: usize,
    bit_index: usize,
}

impl Cache {
    /// Create a zeroed cache of `capacity` bytes (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.max(1)],
            len: 0,
            byte_index: 0,
            bit_index: 0,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of valid bytes.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index
    }

    #[inline(always)]
    #[must_use]
    pub fn bit_index(&self) -> usize {
        self.bit_index
    }

    /// Position of the cursor in bits from the start of the buffer.
    #[inline(always)]
    #[must_use]
    pub fn bit_offset(&self) -> usize {
        bytes_to_bits(self.byte_index) + self.bit_index
    }

    /// Number of valid bits after the cursor.
    #[inline(always)]
    #[must_use]
    pub fn bits_available(&self) -> usize {
        bytes_to_bits(self.len).saturating_sub(self.bit_offset())
    }

    /// The valid bytes.
    #[inline(always)]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// The whole buffer, including the bytes after `len`.
    #[inline(always)]
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The bytes after `len`, available to be filled.
    #[inline(always)]
    pub fn spare_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.len..]
    }

    /// Mark `n` more bytes after `len` as valid.
    #[inline(always)]
    pub fn commit(&mut self, n: usize) {
        debug_assert!(self.len + n <= self.data.len());
        self.len += n;
    }

    /// Mark the bytes up to the cursor, including a partial byte, as valid.
    #[inline(always)]
    pub fn commit_to_cursor(&mut self) {
        self.len = bits_to_bytes(self.bit_offset());
    }

    /// Move the cursor forward by `bits` bits.
    #[inline(always)]
    pub fn advance(&mut self, bits: usize) {
        self.set_cursor(self.bit_offset() + bits);
    }

    /// Move the cursor to bit `bit_offset` of the buffer.
    #[inline(always)]
    pub fn set_cursor(&mut self, bit_offset: usize) {
        debug_assert!(bit_offset <= bytes_to_bits(self.data.len()));
        self.byte_index = bit_offset / BITS_PER_BYTE;
        self.bit_index = bit_offset % BITS_PER_BYTE;
    }

    /// Reallocate the buffer so that it holds at least `capacity` bytes,
    /// keeping its content.
    pub fn grow(&mut self, capacity: usize) {
        if capacity > self.data.len() {
            self.data.resize(capacity, 0);
        }
    }

    /// Move the bytes in `byte_index..len` to the start of the buffer and
    /// zero the rest, returning the number of bytes discarded.
    ///
    /// The cursor becomes `(0, bit_index)`.
    pub fn recycle(&mut self) -> usize {
        let start = self.byte_index.min(self.len);
        if start == 0 {
            return 0;
        }
        self.data.copy_within(start..self.len, 0);
        let old_len = self.len;
        self.len -= start;
        self.data[self.len..old_len].fill(0);
        self.byte_index -= start;
        start
    }

    /// Discard all content and move the cursor to the start.
    pub fn clear(&mut self) {
        let end = self.len.max(bits_to_bytes(self.bit_offset()));
        self.data[..end].fill(0);
        self.len = 0;
        self.byte_index = 0;
        self.bit_index = 0;
    }
}
