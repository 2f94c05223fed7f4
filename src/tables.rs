/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Byte lookup tables.
//!
//! The tables are built at compile time by `const fn` recurrences: the
//! entry for `v` is derived from the entry for `v >> 1` and the lowest bit
//! of `v`. They are immutable statics, so they can be read from any thread
//! without synchronization.

/// Number of bits in a byte.
pub const BITS_PER_BYTE: usize = 8;

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut v = 1;
    while v < 256 {
        table[v] = (table[v >> 1] >> 1) | (((v & 1) as u8) << 7);
        v += 1;
    }
    table
}

const fn build_popcount_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut v = 1;
    while v < 256 {
        table[v] = table[v >> 1] + (v & 1) as u8;
        v += 1;
    }
    table
}

const fn build_log2_table() -> [u8; 256] {
    let mut table = [0_u8; 256];
    let mut v = 2;
    while v < 256 {
        table[v] = table[v >> 1] + 1;
        v += 1;
    }
    table
}

/// `REVERSE_TABLE[v]` is `v` with its bits in opposite order.
pub static REVERSE_TABLE: [u8; 256] = build_reverse_table();

/// `POPCOUNT_TABLE[v]` is the number of ones in the binary representation of `v`.
pub static POPCOUNT_TABLE: [u8; 256] = build_popcount_table();

/// `LOG2_TABLE[v]` is the position of the highest one of `v`, that is,
/// ⌊log₂ v⌋. The entry for zero is zero.
pub static LOG2_TABLE: [u8; 256] = build_log2_table();

/// Returns `value` with its bits reversed.
#[inline(always)]
#[must_use]
pub fn reverse_byte(value: u8) -> u8 {
    REVERSE_TABLE[value as usize]
}

#[inline(always)]
#[must_use]
pub fn popcount_byte(value: u8) -> u32 {
    POPCOUNT_TABLE[value as usize] as u32
}

#[inline(always)]
#[must_use]
pub fn log2_byte(value: u8) -> u32 {
    LOG2_TABLE[value as usize] as u32
}
