/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::*;
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

/// An adapter from [`Read`], [`Write`], and [`Seek`], to [`ByteRead`],
/// [`ByteWrite`], and [`ByteSeek`], respectively.
///
/// Instances of this struct turn every standard (possibly seekable) source or
/// destination of bytes (such as [`std::fs::File`], [`std::io::Cursor`],
/// sockets, etc.) into a source or sink for bit streams.
///
/// [`close`](ByteRead::close) drops the adapted object (closing files and
/// sockets); any later operation fails with [`ErrorKind::NotConnected`].
#[derive(Debug)]
pub struct ByteAdapter<B> {
    backend: Option<B>,
}

impl<B> ByteAdapter<B> {
    /// Create a new ByteAdapter
    pub fn new(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Return the adapted object, or `None` if it has been closed.
    pub fn into_inner(self) -> Option<B> {
        self.backend
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    fn backend(&mut self) -> std::io::Result<&mut B> {
        self.backend
            .as_mut()
            .ok_or_else(|| std::io::Error::new(ErrorKind::NotConnected, "the backend has been closed"))
    }
}

impl<B: Read> ByteRead for ByteAdapter<B> {
    type Error = std::io::Error;

    #[inline]
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let backend = self.backend()?;
        loop {
            match backend.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.backend = None;
        Ok(())
    }
}

impl<B: Write> ByteWrite for ByteAdapter<B> {
    type Error = std::io::Error;

    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.backend()?.write_all(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.backend()?.flush()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if let Some(mut backend) = self.backend.take() {
            backend.flush()?;
        }
        Ok(())
    }
}

impl<B: Seek> ByteSeek for ByteAdapter<B> {
    type Error = std::io::Error;

    #[inline]
    fn byte_pos(&mut self) -> Result<u64, Self::Error> {
        self.backend()?.stream_position()
    }

    #[inline]
    fn set_byte_pos(&mut self, byte_pos: u64) -> Result<(), Self::Error> {
        self.backend()?.seek(SeekFrom::Start(byte_pos))?;
        Ok(())
    }

    fn byte_len(&mut self) -> Result<u64, Self::Error> {
        let backend = self.backend()?;
        let pos = backend.stream_position()?;
        let len = backend.seek(SeekFrom::End(0))?;
        if pos != len {
            backend.seek(SeekFrom::Start(pos))?;
        }
        Ok(len)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_byte_adapter() -> Result<(), std::io::Error> {
        let mut adapter = ByteAdapter::new(Cursor::new(Vec::new()));
        adapter.write_bytes(&[1, 2, 3, 4, 5])?;
        assert_eq!(adapter.byte_len()?, 5);
        adapter.set_byte_pos(1)?;
        let mut buf = [0; 2];
        assert_eq!(adapter.read_bytes(&mut buf)?, 2);
        assert_eq!(buf, [2, 3]);
        assert_eq!(adapter.byte_pos()?, 3);
        assert_eq!(adapter.byte_len()?, 5);
        assert_eq!(adapter.byte_pos()?, 3);

        ByteRead::close(&mut adapter)?;
        assert!(adapter.is_closed());
        let err = adapter.read_bytes(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotConnected);
        Ok(())
    }

    #[test]
    fn test_file() -> Result<(), std::io::Error> {
        let path = std::env::temp_dir().join("media_bitstream_test_byte_adapter");
        {
            let mut writer = ByteAdapter::new(std::fs::File::create(&path)?);
            writer.write_bytes(&[0xca, 0xfe])?;
            ByteWrite::close(&mut writer)?;
        }
        let mut reader = ByteAdapter::new(std::fs::File::open(&path)?);
        let mut buf = [0; 4];
        assert_eq!(reader.read_bytes(&mut buf)?, 2);
        assert_eq!(&buf[..2], &[0xca, 0xfe]);
        std::fs::remove_file(&path)?;
        Ok(())
    }
}
