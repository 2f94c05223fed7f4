/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use core::error::Error;

/// Sequential, streaming byte reads.
pub trait ByteRead {
    type Error: Error + Send + Sync + 'static;

    /// Read up to `buf.len()` bytes into `buf` and advance the current
    /// position, returning the number of bytes read.
    ///
    /// Zero means that the source is exhausted (or that `buf` is empty).
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Release the source. Called by readers that own their source when they
    /// are dropped. The default implementation does nothing.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Sequential, streaming byte writes.
pub trait ByteWrite {
    type Error: Error + Send + Sync + 'static;

    /// Write all of `buf` and advance the current position.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Flush the sink.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Release the sink. The default implementation flushes it.
    fn close(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }
}

/// Seekability for [`ByteRead`] and [`ByteWrite`] streams.
pub trait ByteSeek {
    type Error: Error + Send + Sync + 'static;

    /// Get the current position in bytes from the start of the stream.
    fn byte_pos(&mut self) -> Result<u64, Self::Error>;

    /// Set the current position in bytes from the start of the stream.
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), Self::Error>;

    /// Get the length in bytes of the stream.
    fn byte_len(&mut self) -> Result<u64, Self::Error>;
}

impl<S: ByteRead + ?Sized> ByteRead for &mut S {
    type Error = S::Error;

    #[inline(always)]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_bytes(buf)
    }

    // A borrowed source is never closed by its borrower.
}

impl<S: ByteWrite + ?Sized> ByteWrite for &mut S {
    type Error = S::Error;

    #[inline(always)]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(buf)
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

impl<S: ByteSeek + ?Sized> ByteSeek for &mut S {
    type Error = S::Error;

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64, Self::Error> {
        (**self).byte_pos()
    }

    #[inline(always)]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), Self::Error> {
        (**self).set_byte_pos(byte_pos)
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64, Self::Error> {
        (**self).byte_len()
    }
}

/// Error of the in-memory backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ByteError {
    #[error("position {pos} is beyond the end of the buffer ({len} bytes)")]
    OutOfBounds { pos: u64, len: u64 },
    #[error("cannot write {requested} bytes at position {pos}: the buffer holds {len} bytes")]
    Full { pos: u64, requested: usize, len: u64 },
}
