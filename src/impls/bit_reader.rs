/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Cache, ReaderConfig, backend, backend_mut, take_backend};
use crate::binary::{
    bits_to_bytes, bytes_to_bits, check_bit_range, check_count, copy_bits, read_bits,
};
use crate::error::{Error, Result};
use crate::machine::BitOrder;
use crate::tables::BITS_PER_BYTE;
use crate::traits::*;

/// A cached bit reader over a [`ByteRead`].
///
/// Bytes are pulled from the source into a [`Cache`] on demand, and fields of
/// up to 64 bits are served from the cache in the [bit order](BitOrder) of
/// the reader. When a request does not fit in the space left after the
/// cursor, the consumed bytes are [recycled](Cache::recycle) and the cache is
/// topped up; if a single request needs more bytes than the cache holds, the
/// cache grows.
///
/// The fixed-width accessors take a `reverse` flag that reads a single field
/// with the opposite bit numbering. On whole aligned bytes this reverses the
/// byte order of the field. Inside a byte the two numberings address
/// different physical bits, so all fields sharing a byte must use the same
/// numbering.
///
/// The reader owns its source when built on `S`, and borrows it when built on
/// `&mut S`. If the configuration has `leave_open == false`, the source is
/// [closed](ByteRead::close) when the reader is dropped.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
/// let data = [0b1011_0001_u8, 0x23, 0x45];
/// let config = ReaderConfig::default().with_bit_order(BitOrder::MostSignificant);
/// let mut reader = BitReader::with_config(MemByteReader::new(&data), config);
/// assert!(reader.read_bit().unwrap());
/// assert_eq!(reader.read_bits(3).unwrap(), 0b011);
/// reader.byte_align();
/// assert_eq!(reader.read_u16(false).unwrap(), 0x2345);
/// ```
#[derive(Debug)]
pub struct BitReader<S: ByteRead> {
    /// Always `Some` until [`into_inner`](BitReader::into_inner).
    source: Option<S>,
    cache: Cache,
    bit_order: BitOrder,
    leave_open: bool,
    /// Bytes moved from the source into the cache, counted from the start
    /// of reading or from the last seek target.
    fetched: u64,
}

macro_rules! impl_fixed_reads {
    ($($peek:ident, $read:ident, $bits:literal, $ty:ty);* $(;)?) => {$(
        #[doc = concat!("Peeks at the next ", stringify!($bits), " bits without advancing.")]
        #[inline]
        pub fn $peek(&mut self, reverse: bool) -> Result<$ty> {
            Ok(self.peek_bits_with($bits, reverse)? as $ty)
        }

        #[doc = concat!("Reads the next ", stringify!($bits), " bits.")]
        #[inline]
        pub fn $read(&mut self, reverse: bool) -> Result<$ty> {
            Ok(self.read_bits_with($bits, reverse)? as $ty)
        }
    )*};
}

impl<S: ByteRead> BitReader<S> {
    /// Create a new [`BitReader`] with the default configuration.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, ReaderConfig::default())
    }

    #[must_use]
    pub fn with_config(source: S, config: ReaderConfig) -> Self {
        Self {
            source: Some(source),
            cache: Cache::new(config.cache_size),
            bit_order: config.bit_order.resolve(),
            leave_open: config.leave_open,
            fetched: 0,
        }
    }

    /// Return a reference to the source.
    pub fn get_ref(&self) -> &S {
        backend(&self.source)
    }

    /// Return the source, discarding the cache. The source is not closed.
    pub fn into_inner(mut self) -> S {
        // The empty slot makes drop skip closing.
        take_backend(&mut self.source)
    }

    /// The cache backing this reader.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Number of bits that can be read without accessing the source.
    #[inline(always)]
    #[must_use]
    pub fn bits_available(&self) -> usize {
        self.cache.bits_available()
    }

    /// Number of bits read since construction (or since the position set by
    /// the last seek).
    #[inline]
    #[must_use]
    pub fn position_bits(&self) -> u64 {
        self.fetched * BITS_PER_BYTE as u64 - self.cache.bits_available() as u64
    }

    #[inline(always)]
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.bit_index() == 0
    }

    /// Skip the rest of the current byte, if any.
    #[inline]
    pub fn byte_align(&mut self) {
        let bit_index = self.cache.bit_index();
        if bit_index != 0 {
            self.cache.advance(BITS_PER_BYTE - bit_index);
        }
    }

    /// Recycle the cache and fill it with as many bytes as the source
    /// supplies with one read per free region, returning the number of bits
    /// available.
    ///
    /// A short read ends the fill, so sources that deliver data as it
    /// arrives are not waited on.
    pub fn fill(&mut self) -> Result<usize> {
        self.cache.recycle();
        loop {
            let spare = self.cache.spare_mut();
            let wanted = spare.len();
            if wanted == 0 {
                break;
            }
            let read = backend_mut(&mut self.source)
                .read_bytes(spare)
                .map_err(Error::from_source)?;
            self.cache.commit(read);
            self.fetched += read as u64;
            if read < wanted {
                break;
            }
        }
        Ok(self.cache.bits_available())
    }

    /// Make sure that at least `bit_count` bits are in the cache.
    ///
    /// If the bytes needed do not fit after the cursor, the consumed bytes
    /// are recycled first, and the cache grows if it is still too small.
    fn fetch_bits(&mut self, bit_count: usize) -> Result<()> {
        if self.cache.bits_available() >= bit_count {
            return Ok(());
        }
        let needed = bits_to_bytes(self.cache.bit_index() + bit_count);
        if self.cache.byte_index() + needed > self.cache.capacity() {
            self.cache.recycle();
            self.cache.grow(needed);
        }
        while self.cache.len() < self.cache.byte_index() + needed {
            let read = backend_mut(&mut self.source)
                .read_bytes(self.cache.spare_mut())
                .map_err(Error::from_source)?;
            if read == 0 {
                return Err(Error::EndOfData {
                    bit_pos: self.position_bits(),
                    requested: bit_count,
                    available: self.cache.bits_available(),
                });
            }
            self.cache.commit(read);
            self.fetched += read as u64;
        }
        Ok(())
    }

    /// Peek at the next `n` bits (at most 64), using the opposite bit
    /// numbering if `reverse` is true.
    #[inline]
    pub fn peek_bits_with(&mut self, n: usize, reverse: bool) -> Result<u64> {
        check_count(n)?;
        if n == 0 {
            return Ok(0);
        }
        self.fetch_bits(n)?;
        read_bits(
            self.bit_order.reversed_if(reverse),
            self.cache.as_slice(),
            self.cache.bit_offset(),
            n,
        )
    }

    /// Read the next `n` bits (at most 64), using the opposite bit numbering
    /// if `reverse` is true.
    #[inline]
    pub fn read_bits_with(&mut self, n: usize, reverse: bool) -> Result<u64> {
        let value = self.peek_bits_with(n, reverse)?;
        self.cache.advance(n);
        Ok(value)
    }

    #[inline]
    pub fn peek_bit_with(&mut self, reverse: bool) -> Result<bool> {
        Ok(self.peek_bits_with(1, reverse)? != 0)
    }

    #[inline]
    pub fn read_bit_with(&mut self, reverse: bool) -> Result<bool> {
        Ok(self.read_bits_with(1, reverse)? != 0)
    }

    impl_fixed_reads! {
        peek_u8, read_u8, 8, u8;
        peek_u16, read_u16, 16, u16;
        peek_u24, read_u24, 24, u32;
        peek_u32, read_u32, 32, u32;
        peek_u64, read_u64, 64, u64;
    }

    /// Read `bit_count` bits into `dest` starting at bit `dest_bit_offset`,
    /// with positions in `dest` numbered in the bit order of the reader.
    ///
    /// There is no limit on `bit_count`: the cache grows to hold the whole
    /// field. If the source ends first, neither the position nor `dest`
    /// change.
    pub fn copy_bits_out(
        &mut self,
        bit_count: usize,
        dest: &mut [u8],
        dest_bit_offset: usize,
    ) -> Result<()> {
        check_bit_range(dest.len(), dest_bit_offset, bit_count)?;
        if bit_count == 0 {
            return Ok(());
        }
        self.fetch_bits(bit_count)?;
        copy_bits(
            self.bit_order,
            self.cache.as_slice(),
            self.cache.bit_offset(),
            dest,
            dest_bit_offset,
            bit_count,
        )?;
        self.cache.advance(bit_count);
        Ok(())
    }
}

impl<S: ByteRead> BitRead for BitReader<S> {
    type Error = Error;

    #[inline(always)]
    fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    #[inline]
    fn read_bits(&mut self, n: usize) -> Result<u64> {
        self.read_bits_with(n, false)
    }

    #[inline]
    fn peek_bits(&mut self, n: usize) -> Result<u64> {
        self.peek_bits_with(n, false)
    }

    /// Skip `n` bits. The cache grows to hold them, so that a skip past the
    /// end of the source leaves the position unchanged.
    fn skip_bits(&mut self, n: usize) -> Result<()> {
        self.fetch_bits(n)?;
        self.cache.advance(n);
        Ok(())
    }
}

impl<S: ByteRead + ByteSeek> BitReader<S> {
    /// Number of bits between the current position and the end of the
    /// source.
    pub fn remaining_bits(&mut self) -> Result<u64> {
        Ok(self.len_bits()?.saturating_sub(self.bit_pos()?))
    }

    fn len_bits(&mut self) -> Result<u64> {
        let len = backend_mut(&mut self.source)
            .byte_len()
            .map_err(Error::from_source)?;
        Ok(len * BITS_PER_BYTE as u64)
    }

    /// Move the position by `delta` bits, forward or backward.
    ///
    /// Moves that stay inside the cache do not touch the source. Moves before
    /// the start or past the end of the source fail without changing the
    /// position.
    pub fn seek_bits(&mut self, delta: i64) -> Result<()> {
        let cursor = self.cache.bit_offset() as i64;
        if let Some(target) = cursor.checked_add(delta) {
            if target >= 0 && target as usize <= bytes_to_bits(self.cache.len()) {
                self.cache.set_cursor(target as usize);
                return Ok(());
            }
        }
        let bit_pos = self.bit_pos()?;
        match (bit_pos as i64).checked_add(delta) {
            Some(target) if target >= 0 => self.set_bit_pos(target as u64),
            _ => Err(Error::InvalidSeek { bit_pos, delta }),
        }
    }
}

impl<S: ByteRead + ByteSeek> BitSeek for BitReader<S> {
    type Error = Error;

    fn bit_pos(&mut self) -> Result<u64> {
        let byte_pos = backend_mut(&mut self.source)
            .byte_pos()
            .map_err(Error::from_source)?;
        let unread = (self.cache.len() - self.cache.byte_index()) as u64;
        Ok((byte_pos - unread) * BITS_PER_BYTE as u64 + self.cache.bit_index() as u64)
    }

    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<()> {
        let len = self.len_bits()?;
        if bit_pos > len {
            return Err(Error::SeekPastEnd { bit_pos, len });
        }
        let byte_pos = bit_pos / BITS_PER_BYTE as u64;
        backend_mut(&mut self.source)
            .set_byte_pos(byte_pos)
            .map_err(Error::from_source)?;
        self.cache.clear();
        self.fetched = byte_pos;
        let bit_index = (bit_pos % BITS_PER_BYTE as u64) as usize;
        if bit_index != 0 {
            self.fetch_bits(bit_index)?;
            self.cache.advance(bit_index);
        }
        Ok(())
    }
}

impl<S: ByteRead> Drop for BitReader<S> {
    fn drop(&mut self) {
        if let (false, Some(source)) = (self.leave_open, self.source.as_mut()) {
            // The error cannot be reported.
            let _ = source.close();
        }
    }
}
