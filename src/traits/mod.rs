/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Traits for reading and writing bits and bytes.

The traits [`ByteRead`], [`ByteWrite`], and [`ByteSeek`] describe the
sequential sources and sinks a bit stream is built on. The traits [`BitRead`],
[`BitWrite`], and [`BitSeek`] describe the bit streams themselves.

*/

mod bit_stream;
pub use bit_stream::*;

mod byte_stream;
pub use byte_stream::*;
