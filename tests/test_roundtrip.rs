/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use media_bitstream::impls::{
    BitReader, BitWriter, ByteAdapter, MemByteReader, MemByteWriterVec, StreamConfig,
};
use media_bitstream::machine::BitOrder;
use media_bitstream::traits::{BitRead, BitWrite};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const WIDTHS: [usize; 5] = [1, 7, 16, 9, 31];

fn config(bit_order: BitOrder) -> StreamConfig {
    StreamConfig::default().with_bit_order(bit_order)
}

#[test]
fn test_mixed_widths() -> TestResult {
    for bit_order in [BitOrder::MostSignificant, BitOrder::LeastSignificant] {
        for cache_size in [1, 3, 32] {
            let config = config(bit_order).with_cache_size(cache_size);
            let mut r = SmallRng::seed_from_u64(0);
            let values: Vec<u64> = (0..1000)
                .map(|i| r.random::<u64>() & ((1 << WIDTHS[i % WIDTHS.len()]) - 1))
                .collect();

            let mut data = Vec::new();
            let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), config);
            for (i, &value) in values.iter().enumerate() {
                writer.write_bits(value, WIDTHS[i % WIDTHS.len()])?;
            }
            writer.flush()?;
            drop(writer);

            let total: usize = (0..values.len()).map(|i| WIDTHS[i % WIDTHS.len()]).sum();
            assert_eq!(data.len(), total.div_ceil(8));

            let mut reader = BitReader::with_config(MemByteReader::new(&data), config);
            for (i, &value) in values.iter().enumerate() {
                assert_eq!(reader.read_bits(WIDTHS[i % WIDTHS.len()])?, value);
            }
            assert_eq!(reader.position_bits(), total as u64);
        }
    }
    Ok(())
}

#[test]
fn test_all_widths() -> TestResult {
    for bit_order in [BitOrder::MostSignificant, BitOrder::LeastSignificant] {
        let mut r = SmallRng::seed_from_u64(1);
        let fields: Vec<(u64, usize)> = (0..2000)
            .map(|_| {
                let n = r.random_range(0..=64);
                let value = if n == 64 {
                    r.random()
                } else {
                    r.random::<u64>() & ((1 << n) - 1)
                };
                (value, n)
            })
            .collect();

        let mut data = Vec::new();
        let mut writer =
            BitWriter::with_config(MemByteWriterVec::new(&mut data), config(bit_order));
        for &(value, n) in &fields {
            assert_eq!(writer.write_bits(value, n)?, n);
        }
        drop(writer);

        let mut reader = BitReader::with_config(MemByteReader::new(&data), config(bit_order));
        for &(value, n) in &fields {
            assert_eq!(reader.peek_bits(n)?, value);
            assert_eq!(reader.read_bits(n)?, value);
        }
    }
    Ok(())
}

#[test]
fn test_fixed_widths() -> TestResult {
    for bit_order in [BitOrder::MostSignificant, BitOrder::LeastSignificant] {
        for reverse in [false, true] {
            let mut data = Vec::new();
            let mut writer =
                BitWriter::with_config(MemByteWriterVec::new(&mut data), config(bit_order));
            writer.write_u8(0xa5, reverse)?;
            writer.write_u16(0xbeef, reverse)?;
            writer.write_u24(0x12_3456, reverse)?;
            writer.write_u32(0xdead_beef, reverse)?;
            writer.write_u64(0x0123_4567_89ab_cdef, reverse)?;
            writer.write_bit_with(true, reverse)?;
            drop(writer);
            assert_eq!(data.len(), 19);

            let mut reader =
                BitReader::with_config(MemByteReader::new(&data), config(bit_order));
            assert_eq!(reader.read_u8(reverse)?, 0xa5);
            assert_eq!(reader.read_u16(reverse)?, 0xbeef);
            assert_eq!(reader.read_u24(reverse)?, 0x12_3456);
            assert_eq!(reader.read_u32(reverse)?, 0xdead_beef);
            assert_eq!(reader.peek_u64(reverse)?, 0x0123_4567_89ab_cdef);
            assert_eq!(reader.read_u64(!reverse)?, 0xefcd_ab89_6745_2301);
            assert!(reader.read_bit_with(reverse)?);
        }
    }
    Ok(())
}

#[test]
fn test_network_order() -> TestResult {
    // An RTP-like header: version 2, no padding, no extension, 0 CSRCs,
    // marker set, payload type 96, then sequence number and timestamp.
    let header = [0x80_u8, 0xe0, 0x12, 0x34, 0x00, 0x01, 0xe2, 0x40];
    let mut reader = BitReader::with_config(
        MemByteReader::new(&header),
        config(BitOrder::MostSignificant),
    );
    assert_eq!(reader.read_bits(2)?, 2);
    assert!(!reader.read_bit()?);
    assert!(!reader.read_bit()?);
    assert_eq!(reader.read_bits(4)?, 0);
    assert!(reader.read_bit()?);
    assert_eq!(reader.read_bits(7)?, 96);
    assert!(reader.is_aligned());
    assert_eq!(reader.read_u16(false)?, 0x1234);
    assert_eq!(reader.read_u32(false)?, 123_456);
    Ok(())
}

#[test]
fn test_std_io() -> TestResult {
    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = BitWriter::with_config(
            ByteAdapter::new(&mut cursor),
            config(BitOrder::LeastSignificant).with_cache_size(2),
        );
        for i in 0..100_u64 {
            writer.write_bits(i, 7)?;
        }
        writer.flush()?;
    }
    assert_eq!(cursor.get_ref().len(), 88);
    cursor.set_position(0);

    let mut reader = BitReader::with_config(
        ByteAdapter::new(cursor),
        config(BitOrder::LeastSignificant).with_cache_size(5),
    );
    for i in 0..100_u64 {
        assert_eq!(reader.read_bits(7)?, i);
    }
    Ok(())
}
