/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::tables::{BITS_PER_BYTE, LOG2_TABLE, POPCOUNT_TABLE};
use num_traits::ToBytes;

/// Number of bytes in a machine word (`usize`).
pub const MACHINE_WORD_BYTES: usize = core::mem::size_of::<usize>();

/// Number of bytes needed to hold `bits` bits.
#[inline(always)]
#[must_use]
pub const fn bits_to_bytes(bits: usize) -> usize {
    bits.div_ceil(BITS_PER_BYTE)
}

#[inline(always)]
#[must_use]
pub const fn bytes_to_bits(bytes: usize) -> usize {
    bytes * BITS_PER_BYTE
}

/// Number of machine words needed to hold `bytes` bytes.
#[inline(always)]
#[must_use]
pub const fn bytes_to_machine_words(bytes: usize) -> usize {
    bytes.div_ceil(MACHINE_WORD_BYTES)
}

#[inline(always)]
#[must_use]
pub const fn machine_words_to_bytes(words: usize) -> usize {
    words * MACHINE_WORD_BYTES
}

/// Mask with the lowest `n` bits set, for `n` in `0..=64`.
#[inline(always)]
#[must_use]
pub const fn low_mask(n: usize) -> u64 {
    if n >= 64 { u64::MAX } else { (1 << n) - 1 }
}

/// Number of ones in `value`, computed one byte at a time with
/// [`POPCOUNT_TABLE`].
#[must_use]
pub fn popcount<T: ToBytes>(value: T) -> u32 {
    value
        .to_ne_bytes()
        .as_ref()
        .iter()
        .map(|&b| POPCOUNT_TABLE[b as usize] as u32)
        .sum()
}

/// ⌊log₂ `value`⌋ computed with [`LOG2_TABLE`], or `None` if `value` is zero.
#[must_use]
pub fn log2<T: ToBytes>(value: T) -> Option<u32> {
    let bytes = value.to_le_bytes();
    let bytes = bytes.as_ref();
    bytes
        .iter()
        .rposition(|&b| b != 0)
        .map(|i| (i * BITS_PER_BYTE) as u32 + LOG2_TABLE[bytes[i] as usize] as u32)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(bits_to_bytes(0), 0);
        assert_eq!(bits_to_bytes(1), 1);
        assert_eq!(bits_to_bytes(8), 1);
        assert_eq!(bits_to_bytes(9), 2);
        assert_eq!(bits_to_bytes(64), 8);
        assert_eq!(bytes_to_bits(3), 24);
        assert_eq!(bytes_to_machine_words(0), 0);
        assert_eq!(bytes_to_machine_words(1), 1);
        assert_eq!(bytes_to_machine_words(MACHINE_WORD_BYTES + 1), 2);
        assert_eq!(machine_words_to_bytes(2), 2 * MACHINE_WORD_BYTES);
    }

    #[test]
    fn test_masks() {
        assert_eq!(low_mask(0), 0);
        assert_eq!(low_mask(1), 1);
        assert_eq!(low_mask(7), 0x7f);
        assert_eq!(low_mask(63), u64::MAX >> 1);
        assert_eq!(low_mask(64), u64::MAX);
    }

    #[test]
    fn test_counts() {
        assert_eq!(popcount(0_u64), 0);
        assert_eq!(popcount(u64::MAX), 64);
        assert_eq!(popcount(0x8001_u16), 2);
        assert_eq!(popcount(-1_i32), 32);
        for v in [1_u64, 2, 3, 255, 256, 0x1234_5678, u64::MAX] {
            assert_eq!(popcount(v), v.count_ones());
            assert_eq!(log2(v), Some(v.ilog2()));
        }
        assert_eq!(log2(0_u32), None);
        assert_eq!(log2(0x80_0000_u32), Some(23));
    }
}
