/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-width integers stored in byte buffers.
//!
//! The `reverse` flag of the helpers is relative to the byte order of the
//! host: `false` reads or writes in [`system_byte_order`], `true` in the
//! opposite order. Reading network (big-endian) fields on a little-endian
//! host therefore uses `reverse == true`.

use super::bits::check_bit_range;
use super::units::bytes_to_bits;
use crate::error::{Error, Result};
use crate::machine::{ByteOrder, system_byte_order};

/// Largest integer handled by [`read_integer`] and [`write_integer`], in bytes.
pub const MAX_INTEGER_BYTES: usize = 8;

#[inline]
fn check_size(buffer_len: usize, offset: usize, size: usize) -> Result<()> {
    if size > MAX_INTEGER_BYTES {
        return Err(Error::ByteCount {
            count: size,
            max: MAX_INTEGER_BYTES,
        });
    }
    check_bit_range(
        buffer_len,
        offset.saturating_mul(8),
        bytes_to_bits(size),
    )
}

/// The concrete order selected by `reverse` on this host.
#[inline]
#[must_use]
pub fn effective_byte_order(reverse: bool) -> ByteOrder {
    if (system_byte_order() == ByteOrder::Big) != reverse {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    }
}

/// Composes `size` bytes (at most 8) at `offset` into an unsigned integer
/// laid out in `order`.
///
/// Middle-endian orders work on 16-bit halves, so `size` must be even for
/// them.
pub fn read_uint_in(source: &[u8], offset: usize, size: usize, order: ByteOrder) -> Result<u64> {
    check_size(source.len(), offset, size)?;
    let bytes = &source[offset..offset + size];
    match order {
        ByteOrder::Big => Ok(bytes.iter().fold(0, |acc, &b| (acc << 8) | b as u64)),
        ByteOrder::Little => Ok(bytes.iter().rev().fold(0, |acc, &b| (acc << 8) | b as u64)),
        ByteOrder::MiddleBig | ByteOrder::MiddleLittle if size % 2 != 0 => {
            Err(Error::ByteCount {
                count: size,
                max: size - 1,
            })
        }
        // Halves low to high, bytes within a half big-endian
        ByteOrder::MiddleBig => Ok(bytes
            .chunks_exact(2)
            .rev()
            .fold(0, |acc, h| (acc << 16) | (h[0] as u64) << 8 | h[1] as u64)),
        // Halves high to low, bytes within a half little-endian
        ByteOrder::MiddleLittle => Ok(bytes
            .chunks_exact(2)
            .fold(0, |acc, h| (acc << 16) | (h[1] as u64) << 8 | h[0] as u64)),
        ByteOrder::Unknown => Err(Error::Configuration { what: "byte" }),
    }
}

/// Stores the lowest `size` bytes (at most 8) of `value` at `offset` laid out
/// in `order`. Inverse of [`read_uint_in`].
pub fn write_uint_in(
    dest: &mut [u8],
    offset: usize,
    size: usize,
    value: u64,
    order: ByteOrder,
) -> Result<()> {
    check_size(dest.len(), offset, size)?;
    let bytes = &mut dest[offset..offset + size];
    match order {
        ByteOrder::Big => {
            for (i, b) in bytes.iter_mut().rev().enumerate() {
                *b = (value >> (8 * i)) as u8;
            }
        }
        ByteOrder::Little => {
            for (i, b) in bytes.iter_mut().enumerate() {
                *b = (value >> (8 * i)) as u8;
            }
        }
        ByteOrder::MiddleBig | ByteOrder::MiddleLittle if size % 2 != 0 => {
            return Err(Error::ByteCount {
                count: size,
                max: size - 1,
            });
        }
        ByteOrder::MiddleBig => {
            for (i, h) in bytes.chunks_exact_mut(2).enumerate() {
                let half = (value >> (16 * i)) as u16;
                h.copy_from_slice(&half.to_be_bytes());
            }
        }
        ByteOrder::MiddleLittle => {
            for (i, h) in bytes.chunks_exact_mut(2).rev().enumerate() {
                let half = (value >> (16 * i)) as u16;
                h.copy_from_slice(&half.to_le_bytes());
            }
        }
        ByteOrder::Unknown => return Err(Error::Configuration { what: "byte" }),
    }
    Ok(())
}

/// Decodes an integer of `size` bytes (0 to 8) at `offset`, in the host byte
/// order or, if `reverse` is true, in the opposite one.
///
/// Returns zero when `size` is zero. The bytes are combined as unsigned
/// values; use the `read_i*` wrappers for sign extension.
#[inline]
pub fn read_integer(source: &[u8], offset: usize, size: usize, reverse: bool) -> Result<u64> {
    if size == 0 {
        return Ok(0);
    }
    read_uint_in(source, offset, size, effective_byte_order(reverse))
}

/// Generalized form of [`read_integer`]: the bytes, taken from the least
/// significant one in the order selected by `reverse`, are combined as
/// `value |= byte * sign; sign <<= shift`.
///
/// With `sign == 1` and `shift == 8` this is [`read_integer`]. A smaller
/// `shift` packs bytes holding fewer significant bits (e.g., 4 for one
/// nibble per byte), and a negative `sign` negates every contribution. The
/// arithmetic wraps, and `sign` becomes zero once it is shifted by 64 bits or
/// more.
pub fn read_integer_with(
    source: &[u8],
    offset: usize,
    size: usize,
    reverse: bool,
    sign: i64,
    shift: u32,
) -> Result<i64> {
    if size == 0 {
        return Ok(0);
    }
    check_size(source.len(), offset, size)?;
    let bytes = &source[offset..offset + size];
    let combine = |(value, sign): (i64, i64), &byte: &u8| {
        (
            value | (byte as i64).wrapping_mul(sign),
            sign.checked_shl(shift).unwrap_or(0),
        )
    };
    let (value, _) = match effective_byte_order(reverse) {
        ByteOrder::Big => bytes.iter().rev().fold((0, sign), combine),
        _ => bytes.iter().fold((0, sign), combine),
    };
    Ok(value)
}

/// Encodes the lowest `size` bytes of `value` at `offset`, with the byte
/// order selection of [`read_integer`].
#[inline]
pub fn write_integer(
    dest: &mut [u8],
    offset: usize,
    size: usize,
    value: u64,
    reverse: bool,
) -> Result<()> {
    if size == 0 {
        return Ok(());
    }
    write_uint_in(dest, offset, size, value, effective_byte_order(reverse))
}

/// Sign-extends the lowest `bits` bits of `value`.
#[inline(always)]
fn sign_extend(value: u64, bits: u32) -> i64 {
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

macro_rules! impl_fixed_width {
    ($($size:literal => $read:ident, $read_adv:ident, $read_signed:ident, $read_signed_adv:ident,
        $write:ident, $write_adv:ident, $ty:ty, $sty:ty);* $(;)?) => {$(
        #[doc = concat!("Reads a ", stringify!($size), "-byte unsigned integer at `offset`; see [`read_integer`].")]
        #[inline]
        pub fn $read(source: &[u8], offset: usize, reverse: bool) -> Result<$ty> {
            Ok(read_integer(source, offset, $size, reverse)? as $ty)
        }

        #[doc = concat!("Like [`", stringify!($read), "`], advancing `offset` past the integer.")]
        #[inline]
        pub fn $read_adv(source: &[u8], offset: &mut usize, reverse: bool) -> Result<$ty> {
            let value = $read(source, *offset, reverse)?;
            *offset += $size;
            Ok(value)
        }

        #[doc = concat!("Reads a ", stringify!($size), "-byte two's complement integer at `offset`.")]
        #[inline]
        pub fn $read_signed(source: &[u8], offset: usize, reverse: bool) -> Result<$sty> {
            let value = read_integer(source, offset, $size, reverse)?;
            Ok(sign_extend(value, $size * 8) as $sty)
        }

        #[inline]
        pub fn $read_signed_adv(source: &[u8], offset: &mut usize, reverse: bool) -> Result<$sty> {
            let value = $read_signed(source, *offset, reverse)?;
            *offset += $size;
            Ok(value)
        }

        #[doc = concat!("Writes the lowest ", stringify!($size), " bytes of `value` at `offset`; see [`write_integer`].")]
        #[inline]
        pub fn $write(dest: &mut [u8], offset: usize, value: $ty, reverse: bool) -> Result<()> {
            write_integer(dest, offset, $size, value as u64, reverse)
        }

        #[inline]
        pub fn $write_adv(dest: &mut [u8], offset: &mut usize, value: $ty, reverse: bool) -> Result<()> {
            $write(dest, *offset, value, reverse)?;
            *offset += $size;
            Ok(())
        }
    )*};
}

impl_fixed_width! {
    1 => read_u8, read_u8_adv, read_i8, read_i8_adv, write_u8, write_u8_adv, u8, i8;
    2 => read_u16, read_u16_adv, read_i16, read_i16_adv, write_u16, write_u16_adv, u16, i16;
    3 => read_u24, read_u24_adv, read_i24, read_i24_adv, write_u24, write_u24_adv, u32, i32;
    4 => read_u32, read_u32_adv, read_i32, read_i32_adv, write_u32, write_u32_adv, u32, i32;
    8 => read_u64, read_u64_adv, read_i64, read_i64_adv, write_u64, write_u64_adv, u64, i64;
}
