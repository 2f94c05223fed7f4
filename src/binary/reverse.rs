/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::tables::REVERSE_TABLE;

pub use crate::tables::reverse_byte;

macro_rules! impl_reverse {
    ($($name:ident, $ty:ty);* $(;)?) => {$(
        #[doc = concat!("Returns a `", stringify!($ty), "` with its bits in opposite order.")]
        ///
        /// Adjacent bits, pairs, and nibbles are exchanged with masked shifts,
        /// then the bytes are swapped. Zero and all ones are returned as is.
        #[inline]
        #[must_use]
        pub fn $name(value: $ty) -> $ty {
            if value == 0 || value == <$ty>::MAX {
                return value;
            }
            // 0x55.., 0x33.., and 0x0f..
            const M1: $ty = <$ty>::MAX / 3;
            const M2: $ty = <$ty>::MAX / 5;
            const M4: $ty = <$ty>::MAX / 17;
            let v = ((value >> 1) & M1) | ((value & M1) << 1);
            let v = ((v >> 2) & M2) | ((v & M2) << 2);
            let v = ((v >> 4) & M4) | ((v & M4) << 4);
            v.swap_bytes()
        }
    )*};
}

impl_reverse! {
    reverse_u16, u16;
    reverse_u32, u32;
    reverse_u64, u64;
}

/// Reverses the lowest `bit_count` bits of `value` (at most 64), clearing
/// the others.
#[inline]
#[must_use]
pub fn reverse_low_bits(value: u64, bit_count: usize) -> u64 {
    if bit_count == 0 {
        return 0;
    }
    reverse_u64(value) >> (64 - bit_count.min(64))
}

/// Reverses the order of the bytes of `data` in place.
#[inline]
pub fn reverse_bytes(data: &mut [u8]) {
    data.reverse();
}

/// Reverses the whole bit sequence of `data` in place: the byte order is
/// reversed and so is the bit order of each byte.
pub fn reverse_bits_in_place(data: &mut [u8]) {
    data.reverse();
    for b in data.iter_mut() {
        *b = REVERSE_TABLE[*b as usize];
    }
}
