/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// An implementation of [`ByteWrite`] and [`ByteSeek`] for a mutable slice
/// of memory.
///
/// Writing past the end of the slice fails with [`ByteError::Full`] and
/// writes nothing.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
///
/// let mut bytes = [0_u8; 3];
/// let mut writer = MemByteWriter::new(&mut bytes);
/// assert!(writer.write_bytes(&[1, 2]).is_ok());
/// assert!(writer.write_bytes(&[3, 4]).is_err());
/// assert_eq!(writer.byte_pos().unwrap(), 2);
/// assert!(writer.write_bytes(&[3]).is_ok());
/// assert_eq!(bytes, [1, 2, 3]);
/// ```
#[derive(Debug, PartialEq)]
pub struct MemByteWriter<B: AsMut<[u8]>> {
    data: B,
    byte_index: usize,
}

impl<B: AsMut<[u8]>> MemByteWriter<B> {
    /// Create a new [`MemByteWriter`] from a slice of data
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<[u8]>> ByteWrite for MemByteWriter<B> {
    type Error = ByteError;

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), ByteError> {
        let data = self.data.as_mut();
        let end = self.byte_index + buf.len();
        if end > data.len() {
            return Err(ByteError::Full {
                pos: self.byte_index as u64,
                requested: buf.len(),
                len: data.len() as u64,
            });
        }
        data[self.byte_index..end].copy_from_slice(buf);
        self.byte_index = end;
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<(), ByteError> {
        Ok(())
    }
}

impl<B: AsMut<[u8]>> ByteSeek for MemByteWriter<B> {
    type Error = ByteError;

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64, ByteError> {
        Ok(self.byte_index as u64)
    }

    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), ByteError> {
        let len = self.data.as_mut().len() as u64;
        if byte_pos > len {
            return Err(ByteError::OutOfBounds { pos: byte_pos, len });
        }
        self.byte_index = byte_pos as usize;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64, ByteError> {
        Ok(self.data.as_mut().len() as u64)
    }
}

/// An implementation of [`ByteWrite`] and [`ByteSeek`] for a [`Vec<u8>`].
/// The core difference with [`MemByteWriter`] is that the vector is
/// extended when a write goes past its end.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
///
/// let mut writer = MemByteWriterVec::new(Vec::new());
/// assert!(writer.write_bytes(&[1, 2, 3]).is_ok());
/// assert!(writer.set_byte_pos(1).is_ok());
/// assert!(writer.write_bytes(&[7, 8, 9]).is_ok());
/// assert_eq!(writer.into_inner(), vec![1, 7, 8, 9]);
/// ```
#[derive(Debug, PartialEq)]
pub struct MemByteWriterVec<B: AsMut<Vec<u8>>> {
    data: B,
    byte_index: usize,
}

impl<B: AsMut<Vec<u8>>> MemByteWriterVec<B> {
    /// Create a new [`MemByteWriterVec`] writing from the start of `data`.
    #[must_use]
    pub fn new(data: B) -> Self {
        Self {
            data,
            byte_index: 0,
        }
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsMut<Vec<u8>>> ByteWrite for MemByteWriterVec<B> {
    type Error = core::convert::Infallible;

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        let data = self.data.as_mut();
        let end = self.byte_index + buf.len();
        if end > data.len() {
            data.resize(end, 0);
        }
        data[self.byte_index..end].copy_from_slice(buf);
        self.byte_index = end;
        Ok(())
    }

    #[inline(always)]
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<B: AsMut<Vec<u8>>> ByteSeek for MemByteWriterVec<B> {
    type Error = ByteError;

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64, ByteError> {
        Ok(self.byte_index as u64)
    }

    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), ByteError> {
        let len = self.data.as_mut().len() as u64;
        if byte_pos > len {
            return Err(ByteError::OutOfBounds { pos: byte_pos, len });
        }
        self.byte_index = byte_pos as usize;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64, ByteError> {
        Ok(self.data.as_mut().len() as u64)
    }
}
