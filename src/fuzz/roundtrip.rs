/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::prelude::*;
use arbitrary::Arbitrary;

#[derive(Arbitrary, Debug)]
pub struct FuzzCase {
    msb: bool,
    cache_size: u8,
    commands: Vec<RandomCommand>,
}

#[derive(Arbitrary, Debug)]
pub enum RandomCommand {
    Bits(u64, u8),
    Bit(bool),
    U8(u8, bool),
    U16(u16, bool),
    U24(u32, bool),
    U32(u32, bool),
    U64(u64, bool),
    ByteAlign,
    Flush,
    CopyIn(Vec<u8>, u8),
}

/// What the reader must find, in writing order.
#[derive(Debug)]
enum Expected {
    Bits(u64, usize, bool),
    Align,
    Copy(Vec<u8>, usize),
}

pub fn harness(data: FuzzCase) {
    let bit_order = if data.msb {
        BitOrder::MostSignificant
    } else {
        BitOrder::LeastSignificant
    };
    let config = StreamConfig::default()
        .with_bit_order(bit_order)
        .with_cache_size(data.cache_size as usize);

    let mut buffer = vec![];
    let mut expected = vec![];
    let mut bits_written = 0;
    {
        let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut buffer), config);
        for command in data.commands {
            // Switching numbering is only consistent for whole aligned bytes.
            let aligned = writer.is_aligned();
            let (value, n, reverse) = match command {
                RandomCommand::Bits(value, n) => {
                    let n = n as usize % 65;
                    (value & low_mask(n), n, false)
                }
                RandomCommand::Bit(bit) => (bit as u64, 1, false),
                RandomCommand::U8(value, reverse) => (value as u64, 8, reverse && aligned),
                RandomCommand::U16(value, reverse) => (value as u64, 16, reverse && aligned),
                RandomCommand::U24(value, reverse) => {
                    ((value & 0xff_ffff) as u64, 24, reverse && aligned)
                }
                RandomCommand::U32(value, reverse) => (value as u64, 32, reverse && aligned),
                RandomCommand::U64(value, reverse) => (value, 64, reverse && aligned),
                RandomCommand::ByteAlign => {
                    writer.byte_align();
                    expected.push(Expected::Align);
                    continue;
                }
                RandomCommand::Flush => {
                    writer.flush().unwrap();
                    expected.push(Expected::Align);
                    continue;
                }
                RandomCommand::CopyIn(bytes, skip) => {
                    let skip = if bytes.is_empty() {
                        0
                    } else {
                        skip as usize % 8
                    };
                    let count = bytes.len() * 8 - skip;
                    writer.copy_bits_in(&bytes, skip, count).unwrap();
                    bits_written += count;
                    let mut masked = vec![0; bytes.len()];
                    copy_bits(bit_order, &bytes, skip, &mut masked, skip, count).unwrap();
                    expected.push(Expected::Copy(masked, skip));
                    continue;
                }
            };
            assert_eq!(writer.write_bits_with(value, n, reverse).unwrap(), n);
            bits_written += n;
            expected.push(Expected::Bits(value, n, reverse));
        }
        assert!(writer.position_bits() >= bits_written as u64);
    }

    let mut reader = BitReader::with_config(MemByteReader::new(&buffer), config);
    for item in expected {
        match item {
            Expected::Bits(value, n, reverse) => {
                assert_eq!(reader.read_bits_with(n, reverse).unwrap(), value);
            }
            Expected::Align => reader.byte_align(),
            Expected::Copy(masked, skip) => {
                let mut dest = vec![0; masked.len()];
                reader
                    .copy_bits_out(masked.len() * 8 - skip, &mut dest, skip)
                    .unwrap();
                assert_eq!(dest, masked);
            }
        }
    }
    // Only padding is left.
    while reader.bits_available() > 0 {
        assert!(!reader.read_bit().unwrap());
    }
    assert!(reader.read_bit().is_err());
}
