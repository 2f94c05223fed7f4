/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::machine::BitOrder;

/// Default size in bytes of the cache of a [`BitReader`](super::BitReader)
/// or [`BitWriter`](super::BitWriter).
pub const DEFAULT_CACHE_SIZE: usize = 32;

/// Construction parameters of bit readers and writers.
///
/// # Example
/// ```
/// use media_bitstream::prelude::*;
/// let config = StreamConfig::default()
///     .with_cache_size(4)
///     .with_bit_order(BitOrder::MostSignificant);
/// assert_eq!(config.cache_size, 4);
/// assert!(config.leave_open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Initial size of the cache in bytes. The cache grows on demand when a
    /// single operation needs more; zero is treated as one.
    pub cache_size: usize,
    /// Bit order of the stream. [`BitOrder::Unknown`] selects the system
    /// order.
    pub bit_order: BitOrder,
    /// If false, the source or sink is closed when the stream is dropped.
    pub leave_open: bool,
}

/// Configuration of a [`BitReader`](super::BitReader).
pub type ReaderConfig = StreamConfig;

/// Configuration of a [`BitWriter`](super::BitWriter).
pub type WriterConfig = StreamConfig;

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
            bit_order: BitOrder::Unknown.resolve(),
            leave_open: true,
        }
    }
}

impl StreamConfig {
    #[must_use]
    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }

    #[must_use]
    pub fn with_bit_order(mut self, bit_order: BitOrder) -> Self {
        self.bit_order = bit_order;
        self
    }

    #[must_use]
    pub fn with_leave_open(mut self, leave_open: bool) -> Self {
        self.leave_open = leave_open;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::machine::system_bit_order;

    #[test]
    fn test_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.cache_size, 32);
        assert_eq!(config.bit_order, system_bit_order());
        assert!(config.leave_open);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let config = StreamConfig::default()
            .with_bit_order(BitOrder::MostSignificant)
            .with_leave_open(false);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"cache_size":32,"bit_order":"MostSignificant","leave_open":false}"#
        );
        let back: StreamConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        let partial: StreamConfig = serde_json::from_str(r#"{"cache_size":4}"#).unwrap();
        assert_eq!(partial, StreamConfig::default().with_cache_size(4));
    }
}
