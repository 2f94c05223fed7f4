/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::units::{bytes_to_bits, low_mask};
use crate::error::{Error, Result};
use crate::machine::BitOrder;
use crate::tables::BITS_PER_BYTE;

/// Largest field that fits in the `u64` returned by the bit readers.
pub const MAX_BITS: usize = 64;

#[inline(always)]
fn check_index(index: usize) -> Result<u8> {
    if index >= BITS_PER_BYTE {
        return Err(Error::BitIndex {
            index,
            limit: BITS_PER_BYTE,
        });
    }
    Ok(1 << index)
}

#[inline(always)]
pub(crate) fn check_count(bit_count: usize) -> Result<()> {
    if bit_count > MAX_BITS {
        return Err(Error::BitCount {
            count: bit_count,
            max: MAX_BITS,
        });
    }
    Ok(())
}

/// Checks that `bit_count` bits starting at `bit_offset` lie inside a buffer
/// of `len` bytes.
#[inline]
pub fn check_bit_range(len: usize, bit_offset: usize, bit_count: usize) -> Result<()> {
    let available = bytes_to_bits(len);
    match bit_offset.checked_add(bit_count) {
        Some(end) if end <= available => Ok(()),
        _ => Err(Error::OutOfBounds {
            bit_offset,
            bit_count,
            available,
        }),
    }
}

/// Mask of the lowest `n` bits of a byte, `n` in `1..=8`.
#[inline(always)]
fn byte_mask(n: usize) -> u8 {
    u8::MAX >> (BITS_PER_BYTE - n)
}

/// Returns bit `index` of `byte`, where bit 0 is the least significant one.
///
/// The valid indices are `0..=7`.
#[inline]
pub fn get_bit(byte: u8, index: usize) -> Result<bool> {
    Ok(byte & check_index(index)? != 0)
}

#[inline]
pub fn set_bit(byte: &mut u8, index: usize) -> Result<()> {
    *byte |= check_index(index)?;
    Ok(())
}

#[inline]
pub fn clear_bit(byte: &mut u8, index: usize) -> Result<()> {
    *byte &= !check_index(index)?;
    Ok(())
}

#[inline]
pub fn toggle_bit(byte: &mut u8, index: usize) -> Result<()> {
    *byte ^= check_index(index)?;
    Ok(())
}

/// Sets bit `index` of `byte` to `value` and returns its previous value.
#[inline]
pub fn exchange_bit(byte: &mut u8, index: usize, value: bool) -> Result<bool> {
    let mask = check_index(index)?;
    let old = *byte & mask != 0;
    if value {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
    Ok(old)
}

/// Reads `bit_count` bits (at most 64) starting at bit `bit_offset` of
/// `buffer`, numbering bits from the most significant one of each byte.
///
/// The first bit read becomes the most significant bit of the result. Reading
/// zero bits returns zero.
///
/// # Example
/// ```
/// use media_bitstream::binary::read_bits_msb;
/// let data = [0b1011_0011, 0b1100_0000];
/// assert_eq!(read_bits_msb(&data, 0, 3).unwrap(), 0b101);
/// assert_eq!(read_bits_msb(&data, 6, 4).unwrap(), 0b1111);
/// ```
pub fn read_bits_msb(buffer: &[u8], bit_offset: usize, bit_count: usize) -> Result<u64> {
    check_count(bit_count)?;
    if bit_count == 0 {
        return Ok(0);
    }
    check_bit_range(buffer.len(), bit_offset, bit_count)?;

    let mut byte_index = bit_offset / BITS_PER_BYTE;
    let mut bit_index = bit_offset % BITS_PER_BYTE;
    let mut remaining = bit_count;
    let mut result = 0_u64;
    while remaining > 0 {
        let avail = BITS_PER_BYTE - bit_index;
        let take = avail.min(remaining);
        let chunk = (buffer[byte_index] >> (avail - take)) & byte_mask(take);
        result = (result << take) | chunk as u64;
        remaining -= take;
        bit_index = 0;
        byte_index += 1;
    }
    Ok(result)
}

/// Reads `bit_count` bits (at most 64) starting at bit `bit_offset` of
/// `buffer`, numbering bits from the least significant one of each byte.
///
/// The first bit read becomes the least significant bit of the result.
///
/// # Example
/// ```
/// use media_bitstream::binary::read_bits_lsb;
/// let data = [0b1011_0011, 0b0000_0011];
/// assert_eq!(read_bits_lsb(&data, 0, 3).unwrap(), 0b011);
/// assert_eq!(read_bits_lsb(&data, 6, 4).unwrap(), 0b1110);
/// ```
pub fn read_bits_lsb(buffer: &[u8], bit_offset: usize, bit_count: usize) -> Result<u64> {
    check_count(bit_count)?;
    if bit_count == 0 {
        return Ok(0);
    }
    check_bit_range(buffer.len(), bit_offset, bit_count)?;

    let mut byte_index = bit_offset / BITS_PER_BYTE;
    let mut bit_index = bit_offset % BITS_PER_BYTE;
    let mut produced = 0;
    let mut result = 0_u64;
    while produced < bit_count {
        let take = (BITS_PER_BYTE - bit_index).min(bit_count - produced);
        let chunk = (buffer[byte_index] >> bit_index) & byte_mask(take);
        result |= (chunk as u64) << produced;
        produced += take;
        bit_index = 0;
        byte_index += 1;
    }
    Ok(result)
}

/// Writes the lowest `bit_count` bits (at most 64) of `value` starting at bit
/// `bit_offset` of `buffer`, with the numbering of [`read_bits_msb`].
///
/// Bits of `buffer` outside the field are left untouched; bits of `value`
/// above `bit_count` are ignored.
pub fn write_bits_msb(
    buffer: &mut [u8],
    bit_offset: usize,
    value: u64,
    bit_count: usize,
) -> Result<()> {
    check_count(bit_count)?;
    if bit_count == 0 {
        return Ok(());
    }
    check_bit_range(buffer.len(), bit_offset, bit_count)?;

    let value = value & low_mask(bit_count);
    let mut byte_index = bit_offset / BITS_PER_BYTE;
    let mut bit_index = bit_offset % BITS_PER_BYTE;
    let mut remaining = bit_count;
    while remaining > 0 {
        let avail = BITS_PER_BYTE - bit_index;
        let take = avail.min(remaining);
        remaining -= take;
        let shift = avail - take;
        let mask = byte_mask(take) << shift;
        let chunk = ((value >> remaining) as u8) & byte_mask(take);
        buffer[byte_index] = (buffer[byte_index] & !mask) | (chunk << shift);
        bit_index = 0;
        byte_index += 1;
    }
    Ok(())
}

/// Writes the lowest `bit_count` bits (at most 64) of `value` starting at bit
/// `bit_offset` of `buffer`, with the numbering of [`read_bits_lsb`].
pub fn write_bits_lsb(
    buffer: &mut [u8],
    bit_offset: usize,
    value: u64,
    bit_count: usize,
) -> Result<()> {
    check_count(bit_count)?;
    if bit_count == 0 {
        return Ok(());
    }
    check_bit_range(buffer.len(), bit_offset, bit_count)?;

    let mut byte_index = bit_offset / BITS_PER_BYTE;
    let mut bit_index = bit_offset % BITS_PER_BYTE;
    let mut written = 0;
    while written < bit_count {
        let take = (BITS_PER_BYTE - bit_index).min(bit_count - written);
        let mask = byte_mask(take) << bit_index;
        let chunk = ((value >> written) as u8) & byte_mask(take);
        buffer[byte_index] = (buffer[byte_index] & !mask) | (chunk << bit_index);
        written += take;
        bit_index = 0;
        byte_index += 1;
    }
    Ok(())
}

/// Reads a field with the numbering selected by `order`.
///
/// [`BitOrder::Unknown`] is resolved to the system order.
#[inline]
pub fn read_bits(order: BitOrder, buffer: &[u8], bit_offset: usize, bit_count: usize) -> Result<u64> {
    match order.resolve() {
        BitOrder::MostSignificant => read_bits_msb(buffer, bit_offset, bit_count),
        _ => read_bits_lsb(buffer, bit_offset, bit_count),
    }
}

/// Writes a field with the numbering selected by `order`.
#[inline]
pub fn write_bits(
    order: BitOrder,
    buffer: &mut [u8],
    bit_offset: usize,
    value: u64,
    bit_count: usize,
) -> Result<()> {
    match order.resolve() {
        BitOrder::MostSignificant => write_bits_msb(buffer, bit_offset, value, bit_count),
        _ => write_bits_lsb(buffer, bit_offset, value, bit_count),
    }
}

/// Copies `bit_count` bits from bit `src_offset` of `src` to bit `dst_offset`
/// of `dst`, where bit positions are numbered according to `order`.
///
/// There is no limit on `bit_count`. When both offsets are byte aligned
/// whole bytes are copied directly.
pub fn copy_bits(
    order: BitOrder,
    src: &[u8],
    src_offset: usize,
    dst: &mut [u8],
    dst_offset: usize,
    bit_count: usize,
) -> Result<()> {
    check_bit_range(src.len(), src_offset, bit_count)?;
    check_bit_range(dst.len(), dst_offset, bit_count)?;

    let mut done = 0;
    if src_offset % BITS_PER_BYTE == 0 && dst_offset % BITS_PER_BYTE == 0 {
        let bytes = bit_count / BITS_PER_BYTE;
        let src_start = src_offset / BITS_PER_BYTE;
        let dst_start = dst_offset / BITS_PER_BYTE;
        dst[dst_start..dst_start + bytes].copy_from_slice(&src[src_start..src_start + bytes]);
        done = bytes_to_bits(bytes);
    }

    while done < bit_count {
        let n = MAX_BITS.min(bit_count - done);
        let value = read_bits(order, src, src_offset + done, n)?;
        write_bits(order, dst, dst_offset + done, value, n)?;
        done += n;
    }
    Ok(())
}
