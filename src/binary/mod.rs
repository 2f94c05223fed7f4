/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Stateless bit arithmetic on caller-owned buffers.

All functions in this module work on an explicit byte slice and a bit (or
byte) offset into it. They never allocate, and they fail with a
[range error](crate::ErrorKind::Range) instead of clamping when an index or a
count is outside of their domain.

Bit fields can be read and written in two conventions:

- [`read_bits_msb`]/[`write_bits_msb`] number the bits of each byte starting
  from the most significant one, and the first bit of the field is the most
  significant bit of the value (the usual network/H.264 layout);
- [`read_bits_lsb`]/[`write_bits_lsb`] number the bits of each byte starting
  from the least significant one, and the first bit of the field is the least
  significant bit of the value (the usual DEFLATE layout).

[`read_bits`] and [`write_bits`] dispatch on a [`BitOrder`](crate::machine::BitOrder).

*/

mod bits;
pub use bits::*;

mod integer;
pub use integer::*;

mod reverse;
pub use reverse::*;

mod units;
pub use units::*;
