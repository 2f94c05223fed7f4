/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Implementations of bit readers and writers, and of the byte streams they
work on.

If you need to read or write bits from a file or any backend implementing
[`std::io::Read`] or [`std::io::Write`] you just need to wrap it in a
[`ByteAdapter`].

If instead you want to read or write directly from memory, you can use
[`MemByteReader`], [`MemByteWriter`] (fixed size), or [`MemByteWriterVec`]
(growing).

Once you have a source or a sink, [`BitReader`] and [`BitWriter`] read and
write bits through a [`Cache`] of configurable size (see [`StreamConfig`]).
The bit order of a stream is selected at construction; it defaults to the
bit order of the machine.

*/

mod cache;
pub use cache::*;

mod config;
pub use config::*;

mod mem_byte_reader;
pub use mem_byte_reader::*;

mod mem_byte_writer;
pub use mem_byte_writer::*;

#[cfg(feature = "std")]
mod byte_adapter;
#[cfg(feature = "std")]
pub use byte_adapter::*;

mod bit_reader;
pub use bit_reader::*;

mod bit_writer;
pub use bit_writer::*;

// A reader or writer keeps its backend in an `Option` so that `into_inner`
// can move it out without running the closing logic of `Drop`. The slot is
// only empty once `into_inner` has consumed the reader or writer.

#[inline(always)]
fn backend<S>(slot: &Option<S>) -> &S {
    match slot {
        Some(backend) => backend,
        None => unreachable!("the backend has been moved out"),
    }
}

#[inline(always)]
fn backend_mut<S>(slot: &mut Option<S>) -> &mut S {
    match slot {
        Some(backend) => backend,
        None => unreachable!("the backend has been moved out"),
    }
}

#[inline(always)]
fn take_backend<S>(slot: &mut Option<S>) -> S {
    match slot.take() {
        Some(backend) => backend,
        None => unreachable!("the backend has been moved out"),
    }
}
