/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;
use core::fmt::{Display, Formatter};

use crate::binary::reverse_low_bits;
use crate::machine::BitOrder;

/// The error returned by the bit copy methods [`BitRead::copy_to`] and
/// [`BitWrite::copy_from`].
///
/// It can be a read or a write error, depending on which stream (source or
/// destination) generated the error.
#[derive(Debug)]
pub enum CopyError<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> {
    ReadError(RE),
    WriteError(WE),
}

impl<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> Display
    for CopyError<RE, WE>
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CopyError::ReadError(e) => write!(f, "Read error while copying: {}", e),
            CopyError::WriteError(e) => write!(f, "Write error while copying: {}", e),
        }
    }
}

impl<RE: Error + Send + Sync + 'static, WE: Error + Send + Sync + 'static> Error
    for CopyError<RE, WE>
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CopyError::ReadError(e) => Some(e),
            CopyError::WriteError(e) => Some(e),
        }
    }
}

/// Re-encodes `n` bits read in `from` order so that writing them in `to`
/// order reproduces the same bit sequence.
#[inline(always)]
fn transcode(value: u64, n: usize, from: BitOrder, to: BitOrder) -> u64 {
    if from.resolve() == to.resolve() {
        value
    } else {
        reverse_low_bits(value, n)
    }
}

/// Sequential, streaming bit-by-bit reads.
///
/// Fields are read in the [bit order](BitRead::bit_order) of the stream: with
/// [`BitOrder::MostSignificant`] the first bit read is the most significant
/// bit of the returned value, with [`BitOrder::LeastSignificant`] it is the
/// least significant one.
pub trait BitRead {
    type Error: Error + Send + Sync + 'static;

    /// The bit order of the stream.
    fn bit_order(&self) -> BitOrder;

    /// Read `n` bits and return them in the lowest bits.
    ///
    /// `n` must be at most 64; reading zero bits returns zero and does not
    /// move the stream.
    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error>;

    /// Peeks at `n` bits without advancing the stream position.
    /// `n` must be at most 64.
    fn peek_bits(&mut self, n: usize) -> Result<u64, Self::Error>;

    /// Skip `n` bits from the stream.
    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error>;

    /// Read a single bit.
    #[inline]
    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Peek at the next bit.
    #[inline]
    fn peek_bit(&mut self) -> Result<bool, Self::Error> {
        Ok(self.peek_bits(1)? != 0)
    }

    /// Copy `n` bits from this stream to `bit_write`, 64 bits at a time.
    ///
    /// The bit sequence is preserved even if the two streams have different
    /// bit orders.
    fn copy_to<W: BitWrite>(
        &mut self,
        bit_write: &mut W,
        mut n: u64,
    ) -> Result<(), CopyError<Self::Error, W::Error>> {
        while n > 0 {
            let to_read = core::cmp::min(n, 64) as usize;
            let read = self.read_bits(to_read).map_err(CopyError::ReadError)?;
            let value = transcode(read, to_read, self.bit_order(), bit_write.bit_order());
            bit_write
                .write_bits(value, to_read)
                .map_err(CopyError::WriteError)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}

/// Sequential, streaming bit-by-bit writes.
///
/// This is the mirror of [`BitRead`]: a value written with
/// [`write_bits`](BitWrite::write_bits) is read back unchanged by
/// [`read_bits`](BitRead::read_bits) on a stream with the same bit order.
pub trait BitWrite {
    type Error: Error + Send + Sync + 'static;

    /// The bit order of the stream.
    fn bit_order(&self) -> BitOrder;

    /// Write the lowest `n` bits of `value` to the stream and return the
    /// number of bits written, that is, `n`.
    ///
    /// `n` must be at most 64; the bits of `value` above `n` are ignored.
    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error>;

    /// Write a single bit.
    #[inline]
    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        self.write_bits(bit as u64, 1)
    }

    /// Flush the buffer, padding the last byte with zeros.
    ///
    /// Returns the number of bits written from the buffer (not including
    /// padding).
    fn flush(&mut self) -> Result<usize, Self::Error>;

    /// Copy `n` bits from `bit_read` to this stream, 64 bits at a time.
    fn copy_from<R: BitRead>(
        &mut self,
        bit_read: &mut R,
        mut n: u64,
    ) -> Result<(), CopyError<R::Error, Self::Error>> {
        while n > 0 {
            let to_read = core::cmp::min(n, 64) as usize;
            let read = bit_read.read_bits(to_read).map_err(CopyError::ReadError)?;
            let value = transcode(read, to_read, bit_read.bit_order(), self.bit_order());
            self.write_bits(value, to_read)
                .map_err(CopyError::WriteError)?;
            n -= to_read as u64;
        }
        Ok(())
    }
}

/// Seekability for [`BitRead`] and [`BitWrite`] streams.
pub trait BitSeek {
    type Error: Error + Send + Sync + 'static;

    /// Get the current position in bits from the start of the stream.
    fn bit_pos(&mut self) -> Result<u64, Self::Error>;

    /// Set the current position in bits from the start of the stream to `bit_pos`.
    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), Self::Error>;
}
