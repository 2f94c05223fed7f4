/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The error type shared by the stateless bit arithmetic and by the
//! streaming readers and writers.

use thiserror::Error;

/// Boxed error coming from a source or a sink.
pub type BoxedError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Coarse classification of an [`Error`].
///
/// Range faults are programming errors and must not be retried; end of data
/// is the normal way a finite source signals exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The bit or byte order of the machine could not be determined.
    Configuration,
    /// An index, count, or offset outside the domain of the operation.
    Range,
    /// The source has no more bytes to satisfy a read.
    EndOfData,
    /// The underlying source failed.
    Source,
    /// The underlying sink rejected a write or a flush.
    Sink,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to determine the {what} order of this machine")]
    Configuration { what: &'static str },

    #[error("bit index {index} is out of range (must be smaller than {limit})")]
    BitIndex { index: usize, limit: usize },

    #[error("bit count {count} is out of range (must be at most {max})")]
    BitCount { count: usize, max: usize },

    #[error("byte count {count} is out of range (must be at most {max})")]
    ByteCount { count: usize, max: usize },

    #[error(
        "{bit_count} bits at bit offset {bit_offset} exceed the {available} bits of the buffer"
    )]
    OutOfBounds {
        bit_offset: usize,
        bit_count: usize,
        available: usize,
    },

    #[error("seeking by {delta} bits from bit position {bit_pos} moves before the start of the stream")]
    InvalidSeek { bit_pos: u64, delta: i64 },

    #[error("bit position {bit_pos} is past the end of the stream ({len} bits)")]
    SeekPastEnd { bit_pos: u64, len: u64 },

    #[error(
        "unexpected end of data at bit position {bit_pos}: {requested} bits requested, {available} available"
    )]
    EndOfData {
        bit_pos: u64,
        requested: usize,
        available: usize,
    },

    #[error("source error: {0}")]
    Source(#[source] BoxedError),

    #[error("sink error: {0}")]
    Sink(#[source] BoxedError),
}

impl Error {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::BitIndex { .. }
            | Error::BitCount { .. }
            | Error::ByteCount { .. }
            | Error::OutOfBounds { .. }
            | Error::InvalidSeek { .. }
            | Error::SeekPastEnd { .. } => ErrorKind::Range,
            Error::EndOfData { .. } => ErrorKind::EndOfData,
            Error::Source(_) => ErrorKind::Source,
            Error::Sink(_) => ErrorKind::Sink,
        }
    }

    pub(crate) fn from_source<E: core::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Error::Source(Box::new(e))
    }

    pub(crate) fn from_sink<E: core::error::Error + Send + Sync + 'static>(e: E) -> Self {
        Error::Sink(Box::new(e))
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::BitCount { count: 65, max: 64 }.kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Error::EndOfData {
                bit_pos: 8,
                requested: 16,
                available: 0
            }
            .kind(),
            ErrorKind::EndOfData
        );
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err = Error::from_sink(io);
        assert_eq!(err.kind(), ErrorKind::Sink);
        assert_eq!(err.to_string(), "sink error: closed");
    }

    #[test]
    fn test_context_in_message() {
        let err = Error::OutOfBounds {
            bit_offset: 13,
            bit_count: 7,
            available: 16,
        };
        assert_eq!(
            err.to_string(),
            "7 bits at bit offset 13 exceed the 16 bits of the buffer"
        );
    }
}
