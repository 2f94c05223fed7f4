/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;

/// An implementation of [`ByteRead`] and [`ByteSeek`] for a slice.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
///
/// let data = [0x80_u8, 0x00, 0x12, 0x34];
/// let mut reader = MemByteReader::new(&data);
///
/// let mut buf = [0; 3];
/// assert_eq!(reader.read_bytes(&mut buf).unwrap(), 3);
/// assert_eq!(buf, [0x80, 0x00, 0x12]);
/// assert_eq!(reader.byte_pos().unwrap(), 3);
/// assert_eq!(reader.read_bytes(&mut buf).unwrap(), 1);
/// // the source is exhausted
/// assert_eq!(reader.read_bytes(&mut buf).unwrap(), 0);
///
/// // you can change position
/// assert!(reader.set_byte_pos(1).is_ok());
/// assert!(reader.set_byte_pos(5).is_err());
/// assert_eq!(reader.byte_pos().unwrap(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MemByteReader<B: AsRef<[u8]>> {
    data: B,
    byte_index: usize,
}

impl<B: AsRef<[u8]>> MemByteReader<B> {
    /// Create a new [`MemByteReader`] from a slice of data
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

impl<B: AsRef<[u8]>> ByteRead for MemByteReader<B> {
    type Error = core::convert::Infallible;

    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let data = self.data.as_ref();
        let rest = &data[self.byte_index.min(data.len())..];
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.byte_index += n;
        Ok(n)
    }
}

impl<B: AsRef<[u8]>> ByteSeek for MemByteReader<B> {
    type Error = ByteError;

    #[inline(always)]
    fn byte_pos(&mut self) -> Result<u64, ByteError> {
        Ok(self.byte_index as u64)
    }

    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), ByteError> {
        let len = self.data.as_ref().len() as u64;
        if byte_pos > len {
            return Err(ByteError::OutOfBounds { pos: byte_pos, len });
        }
        self.byte_index = byte_pos as usize;
        Ok(())
    }

    #[inline(always)]
    fn byte_len(&mut self) -> Result<u64, ByteError> {
        Ok(self.data.as_ref().len() as u64)
    }
}
