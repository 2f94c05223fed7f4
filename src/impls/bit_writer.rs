/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{Cache, WriterConfig, backend, backend_mut, take_backend};
use crate::binary::{
    bits_to_bytes, bytes_to_bits, check_bit_range, check_count, copy_bits, write_bits,
};
use crate::error::{Error, Result};
use crate::machine::BitOrder;
use crate::tables::BITS_PER_BYTE;
use crate::traits::*;

/// A cached bit writer over a [`ByteWrite`].
///
/// Bits accumulate in a [`Cache`] whose bytes after the cursor are always
/// zero, so padding (from [`byte_align`](BitWriter::byte_align) or from a
/// [`flush`](BitWrite::flush)) is made of zeros. When a write does not fit in
/// the cache, the complete bytes are sent to the sink and the partial byte is
/// recycled to the start of the cache.
///
/// As for [`BitReader`](super::BitReader), the `reverse` flag of the
/// fixed-width writers selects the opposite bit numbering for one field, and
/// all fields sharing a byte must use the same numbering.
///
/// [`flush`](BitWrite::flush) sends everything, including the last partial
/// byte, and the next write starts on a fresh byte. The writer flushes when
/// dropped, ignoring errors: call [`flush`](BitWrite::flush) or
/// [`into_inner`](BitWriter::into_inner) to see them.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
/// let mut data = Vec::new();
/// let config = WriterConfig::default().with_bit_order(BitOrder::MostSignificant);
/// let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), config);
/// writer.write_bit(true).unwrap();
/// writer.write_bits(0b011, 3).unwrap();
/// writer.byte_align();
/// writer.write_u16(0x2345, false).unwrap();
/// writer.flush().unwrap();
/// drop(writer);
/// assert_eq!(data, [0b1011_0000, 0x23, 0x45]);
/// ```
#[derive(Debug)]
pub struct BitWriter<S: ByteWrite> {
    /// Always `Some` until [`into_inner`](BitWriter::into_inner).
    sink: Option<S>,
    cache: Cache,
    bit_order: BitOrder,
    leave_open: bool,
    /// Bytes sent to the sink.
    written: u64,
}

macro_rules! impl_fixed_writes {
    ($($write:ident, $bits:literal, $ty:ty);* $(;)?) => {$(
        #[doc = concat!("Writes the lowest ", stringify!($bits), " bits of `value`.")]
        #[inline]
        pub fn $write(&mut self, value: $ty, reverse: bool) -> Result<usize> {
            self.write_bits_with(value as u64, $bits, reverse)
        }
    )*};
}

impl<S: ByteWrite> BitWriter<S> {
    /// Create a new [`BitWriter`] with the default configuration.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, WriterConfig::default())
    }

    #[must_use]
    pub fn with_config(sink: S, config: WriterConfig) -> Self {
        Self {
            sink: Some(sink),
            cache: Cache::new(config.cache_size),
            bit_order: config.bit_order.resolve(),
            leave_open: config.leave_open,
            written: 0,
        }
    }

    /// Return a reference to the sink.
    pub fn get_ref(&self) -> &S {
        backend(&self.sink)
    }

    /// Flush and return the sink. The sink is not closed.
    pub fn into_inner(mut self) -> Result<S> {
        BitWrite::flush(&mut self)?;
        // The empty slot makes drop skip flushing and closing.
        Ok(take_backend(&mut self.sink))
    }

    /// Number of bits in the cache not yet sent to the sink.
    #[inline(always)]
    #[must_use]
    pub fn bits_pending(&self) -> usize {
        self.cache.bit_offset()
    }

    /// Number of bits written since construction, including padding.
    #[inline]
    #[must_use]
    pub fn position_bits(&self) -> u64 {
        self.written * BITS_PER_BYTE as u64 + self.cache.bit_offset() as u64
    }

    #[inline(always)]
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        self.cache.bit_index() == 0
    }

    /// Move to the next byte boundary, if not already on one. The skipped
    /// bits are zero.
    #[inline]
    pub fn byte_align(&mut self) {
        let bit_index = self.cache.bit_index();
        if bit_index != 0 {
            self.cache.advance(BITS_PER_BYTE - bit_index);
        }
    }

    /// Send the complete bytes of the cache to the sink and move the partial
    /// byte, if any, to the start of the cache.
    fn flush_full_bytes(&mut self) -> Result<()> {
        let full = self.cache.byte_index();
        if full == 0 {
            return Ok(());
        }
        self.cache.commit_to_cursor();
        backend_mut(&mut self.sink)
            .write_bytes(&self.cache.as_slice()[..full])
            .map_err(Error::from_sink)?;
        self.written += full as u64;
        self.cache.recycle();
        Ok(())
    }

    /// Make room for `bit_count` bits after the cursor.
    fn reserve_bits(&mut self, bit_count: usize) -> Result<()> {
        if self.cache.bit_offset() + bit_count > bytes_to_bits(self.cache.capacity()) {
            self.flush_full_bytes()?;
            self.cache
                .grow(bits_to_bytes(self.cache.bit_offset() + bit_count));
        }
        Ok(())
    }

    /// Write the lowest `n` bits (at most 64) of `value`, using the opposite
    /// bit numbering if `reverse` is true.
    pub fn write_bits_with(&mut self, value: u64, n: usize, reverse: bool) -> Result<usize> {
        check_count(n)?;
        if n == 0 {
            return Ok(0);
        }
        self.reserve_bits(n)?;
        let offset = self.cache.bit_offset();
        write_bits(
            self.bit_order.reversed_if(reverse),
            self.cache.buffer_mut(),
            offset,
            value,
            n,
        )?;
        self.cache.advance(n);
        Ok(n)
    }

    #[inline]
    pub fn write_bit_with(&mut self, bit: bool, reverse: bool) -> Result<usize> {
        self.write_bits_with(bit as u64, 1, reverse)
    }

    impl_fixed_writes! {
        write_u8, 8, u8;
        write_u16, 16, u16;
        write_u24, 24, u32;
        write_u32, 32, u32;
        write_u64, 64, u64;
    }

    /// Write `bit_count` bits of `buffer` starting at bit `bit_offset`, with
    /// positions in `buffer` numbered in the bit order of the writer.
    ///
    /// There is no limit on `bit_count`.
    pub fn copy_bits_in(&mut self, buffer: &[u8], bit_offset: usize, bit_count: usize) -> Result<()> {
        check_bit_range(buffer.len(), bit_offset, bit_count)?;
        let mut done = 0;
        while done < bit_count {
            let room = bytes_to_bits(self.cache.capacity()) - self.cache.bit_offset();
            if room == 0 {
                self.flush_full_bytes()?;
                continue;
            }
            let step = (bit_count - done).min(room);
            let offset = self.cache.bit_offset();
            copy_bits(
                self.bit_order,
                buffer,
                bit_offset + done,
                self.cache.buffer_mut(),
                offset,
                step,
            )?;
            self.cache.advance(step);
            done += step;
        }
        Ok(())
    }
}

impl<S: ByteWrite> BitWrite for BitWriter<S> {
    type Error = Error;

    #[inline(always)]
    fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    #[inline]
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize> {
        self.write_bits_with(value, n, false)
    }

    /// Send the cache to the sink, padding the last byte with zeros, and
    /// flush the sink.
    ///
    /// If the sink rejects the bytes, the cache is left untouched.
    fn flush(&mut self) -> Result<usize> {
        let bits = self.cache.bit_offset();
        if bits != 0 {
            self.cache.commit_to_cursor();
            backend_mut(&mut self.sink)
                .write_bytes(self.cache.as_slice())
                .map_err(Error::from_sink)?;
            self.written += self.cache.len() as u64;
            self.cache.clear();
        }
        ByteWrite::flush(backend_mut(&mut self.sink)).map_err(Error::from_sink)?;
        Ok(bits)
    }
}

impl<S: ByteWrite> Drop for BitWriter<S> {
    fn drop(&mut self) {
        if self.sink.is_none() {
            return;
        }
        // During drop we ignore errors.
        let _ = BitWrite::flush(self);
        if let (false, Some(sink)) = (self.leave_open, self.sink.as_mut()) {
            let _ = sink.close();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::impls::{BitReader, MemByteReader, MemByteWriter, MemByteWriterVec, ReaderConfig};
    use core::cell::Cell;

    fn msb() -> WriterConfig {
        WriterConfig::default().with_bit_order(BitOrder::MostSignificant)
    }

    #[test]
    fn test_padding_and_flush() -> Result<()> {
        let mut data = Vec::new();
        let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), msb());
        writer.write_bits(0b111, 3)?;
        assert_eq!(writer.bits_pending(), 3);
        assert_eq!(writer.flush()?, 3);
        assert_eq!(writer.bits_pending(), 0);
        writer.write_bits(0xf, 4)?;
        writer.write_bit(true)?;
        writer.byte_align();
        assert!(writer.is_aligned());
        writer.write_bits(0b1, 2)?;
        writer.byte_align();
        writer.write_u8(0x5a, false)?;
        assert_eq!(writer.position_bits(), 32);
        drop(writer);
        assert_eq!(data, [0xe0, 0xf8, 0x40, 0x5a]);
        Ok(())
    }

    #[test]
    fn test_lsb() -> Result<()> {
        let mut data = Vec::new();
        let config = WriterConfig::default().with_bit_order(BitOrder::LeastSignificant);
        let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), config);
        writer.write_bits(0b011, 3)?;
        writer.write_bits(0b1_0101, 5)?;
        writer.write_u16(0x1234, false)?;
        drop(writer);
        assert_eq!(data, [0b1010_1011, 0x34, 0x12]);
        Ok(())
    }

    #[test]
    fn test_reverse_swaps_bytes() -> Result<()> {
        let mut data = Vec::new();
        let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), msb());
        writer.write_u32(0x1234_5678, true)?;
        writer.write_u8(0x9a, true)?;
        drop(writer);
        assert_eq!(data, [0x78, 0x56, 0x34, 0x12, 0x9a]);

        let config = ReaderConfig::default().with_bit_order(BitOrder::MostSignificant);
        let mut reader = BitReader::with_config(MemByteReader::new(&data), config);
        assert_eq!(reader.peek_u32(false)?, 0x1234_5678_u32.swap_bytes());
        assert_eq!(reader.read_u32(true)?, 0x1234_5678);
        Ok(())
    }

    #[test]
    fn test_overflow_flushes_full_bytes() -> Result<()> {
        let mut small = Vec::new();
        let mut large = Vec::new();
        for (data, cache_size) in [(&mut small, 2), (&mut large, 64)] {
            let mut writer = BitWriter::with_config(
                MemByteWriterVec::new(data),
                msb().with_cache_size(cache_size),
            );
            for i in 0..40_u64 {
                writer.write_bits(i * 0x9e37_79b9, (i % 23 + 1) as usize)?;
            }
            writer.write_u64(u64::MAX, false)?;
            writer.flush()?;
        }
        assert_eq!(small, large);
        Ok(())
    }

    #[test]
    fn test_sink_fault() -> Result<()> {
        let mut buffer = [0_u8; 2];
        let mut writer = BitWriter::with_config(MemByteWriter::new(&mut buffer), msb());
        writer.write_bits(0xabcd, 16)?;
        writer.write_bits(0x1, 4)?;
        let err = writer.flush().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Sink);
        // Nothing was lost from the cache.
        assert_eq!(writer.bits_pending(), 20);
        Ok(())
    }

    #[test]
    fn test_bit_count_out_of_range() {
        let mut data = Vec::new();
        let mut writer = BitWriter::new(MemByteWriterVec::new(&mut data));
        assert_eq!(writer.write_bits(0, 65).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(writer.write_bits(0, 0).unwrap(), 0);
        assert_eq!(writer.bits_pending(), 0);
    }

    #[test]
    fn test_copy_bits_in() -> Result<()> {
        let source: Vec<u8> = (1..=50).collect();
        let mut data = Vec::new();
        let mut writer = BitWriter::with_config(
            MemByteWriterVec::new(&mut data),
            msb().with_cache_size(3),
        );
        writer.write_bits(0, 4)?;
        writer.copy_bits_in(&source, 4, 45 * 8)?;
        writer.write_bits(0, 4)?;
        drop(writer);
        assert_eq!(data.len(), 46);
        assert_eq!(data[0], source[0] & 0x0f);
        assert_eq!(&data[1..45], &source[1..45]);
        assert_eq!(data[45], source[45] & 0xf0);
        assert_eq!(
            BitWriter::new(MemByteWriterVec::new(Vec::new()))
                .copy_bits_in(&source, 0, 50 * 8 + 1)
                .unwrap_err()
                .kind(),
            ErrorKind::Range
        );
        Ok(())
    }

    #[test]
    fn test_into_inner() -> Result<()> {
        let writer = {
            let mut writer = BitWriter::with_config(MemByteWriterVec::new(Vec::new()), msb());
            writer.write_bits(0b101, 3)?;
            writer
        };
        assert_eq!(writer.into_inner()?.into_inner(), vec![0b1010_0000]);
        Ok(())
    }

    struct Tracked<'a> {
        closed: &'a Cell<bool>,
        flushed: &'a Cell<usize>,
    }

    impl ByteWrite for Tracked<'_> {
        type Error = core::convert::Infallible;

        fn write_bytes(&mut self, _buf: &[u8]) -> core::result::Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> core::result::Result<(), Self::Error> {
            self.flushed.set(self.flushed.get() + 1);
            Ok(())
        }

        fn close(&mut self) -> core::result::Result<(), Self::Error> {
            self.closed.set(true);
            Ok(())
        }
    }

    #[test]
    fn test_leave_open() {
        let closed = Cell::new(false);
        let flushed = Cell::new(0);
        drop(BitWriter::new(Tracked {
            closed: &closed,
            flushed: &flushed,
        }));
        assert!(!closed.get());
        assert_eq!(flushed.get(), 1);

        drop(BitWriter::with_config(
            Tracked {
                closed: &closed,
                flushed: &flushed,
            },
            WriterConfig::default().with_leave_open(false),
        ));
        assert!(closed.get());
    }
}
