/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use media_bitstream::binary::copy_bits;
use media_bitstream::impls::{BitReader, BitWriter, MemByteReader, MemByteWriterVec, StreamConfig};
use media_bitstream::machine::BitOrder;
use media_bitstream::traits::{BitRead, BitWrite};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const ORDERS: [BitOrder; 2] = [BitOrder::MostSignificant, BitOrder::LeastSignificant];

fn config(bit_order: BitOrder) -> StreamConfig {
    StreamConfig::default()
        .with_bit_order(bit_order)
        .with_cache_size(8)
}

/// Writes `len` random bits one at a time.
fn random_bits(bit_order: BitOrder, len: u64) -> Result<Vec<u8>, media_bitstream::Error> {
    let mut data = Vec::new();
    let mut writer = BitWriter::with_config(MemByteWriterVec::new(&mut data), config(bit_order));
    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..len {
        writer.write_bit(r.random())?;
    }
    writer.flush()?;
    drop(writer);
    Ok(data)
}

fn check_bits<R: BitRead>(read: &mut R, len: u64) -> Result<(), R::Error> {
    let mut r = SmallRng::seed_from_u64(0);
    for _ in 0..len {
        assert_eq!(read.read_bit()?, r.random::<bool>());
    }
    Ok(())
}

#[test]
fn test_copy_to_and_from() -> TestResult {
    for from in ORDERS {
        for to in ORDERS {
            for len in (0..=256).chain([1000, 1031]) {
                let data = random_bits(from, len)?;

                let mut copy = Vec::new();
                let mut read = BitReader::with_config(MemByteReader::new(&data), config(from));
                let mut write = BitWriter::with_config(MemByteWriterVec::new(&mut copy), config(to));
                read.copy_to(&mut write, len)?;
                drop(write);
                check_bits(
                    &mut BitReader::with_config(MemByteReader::new(&copy), config(to)),
                    len,
                )?;

                let mut copy = Vec::new();
                let mut read = BitReader::with_config(MemByteReader::new(&data), config(from));
                let mut write = BitWriter::with_config(MemByteWriterVec::new(&mut copy), config(to));
                write.copy_from(&mut read, len)?;
                drop(write);
                check_bits(
                    &mut BitReader::with_config(MemByteReader::new(&copy), config(to)),
                    len,
                )?;
            }
        }
    }
    Ok(())
}

#[test]
fn test_copy_past_end() -> TestResult {
    let data = random_bits(BitOrder::MostSignificant, 10)?;
    let mut read = BitReader::with_config(MemByteReader::new(&data), config(BitOrder::MostSignificant));
    let mut copy = Vec::new();
    let mut write = BitWriter::new(MemByteWriterVec::new(&mut copy));
    let err = read.copy_to(&mut write, 17).unwrap_err();
    assert!(err.to_string().starts_with("Read error while copying"));
    Ok(())
}

#[test]
fn test_copy_bits_out_and_in() -> TestResult {
    let mut r = SmallRng::seed_from_u64(1);
    for bit_order in ORDERS {
        for _ in 0..200 {
            let mut data = vec![0; r.random_range(1..100)];
            r.fill_bytes(&mut data);
            let bits = data.len() * 8;
            let start = r.random_range(0..bits);
            let count = r.random_range(0..=bits - start);
            let dest_offset = r.random_range(0..16);

            // Extract through a reader.
            let mut reader = BitReader::with_config(MemByteReader::new(&data), config(bit_order));
            reader.skip_bits(start)?;
            let mut out = vec![0; (dest_offset + count).div_ceil(8)];
            reader.copy_bits_out(count, &mut out, dest_offset)?;
            assert_eq!(reader.position_bits(), (start + count) as u64);

            let mut expected = vec![0; out.len()];
            copy_bits(bit_order, &data, start, &mut expected, dest_offset, count)?;
            assert_eq!(out, expected);

            // Put the same bits back through a writer.
            let mut written = Vec::new();
            let mut writer =
                BitWriter::with_config(MemByteWriterVec::new(&mut written), config(bit_order));
            writer.write_bits(0, start % 8)?;
            writer.copy_bits_in(&out, dest_offset, count)?;
            drop(writer);

            let mut expected = vec![0; (start % 8 + count).div_ceil(8)];
            copy_bits(bit_order, &data, start, &mut expected, start % 8, count)?;
            assert_eq!(written, expected);
        }
    }
    Ok(())
}
