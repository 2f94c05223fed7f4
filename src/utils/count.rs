/*
 * SPDX-FileCopyrightText: 2026 The media-bitstream authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::machine::BitOrder;
use crate::traits::*;

/// Wrapping struct that keep tracks of written bits. Optionally,
/// prints to standard error information about methods called.
#[derive(Debug)]
pub struct CountBitWriter<BW: BitWrite, const PRINT: bool = false> {
    bit_write: BW,
    /// The number of bits written so far on the underlying [`BitWrite`].
    pub bits_written: usize,
}

impl<BW: BitWrite, const PRINT: bool> CountBitWriter<BW, PRINT> {
    pub fn new(bit_write: BW) -> Self {
        Self {
            bit_write,
            bits_written: 0,
        }
    }

    pub fn into_inner(self) -> BW {
        self.bit_write
    }
}

impl<BW: BitWrite, const PRINT: bool> BitWrite for CountBitWriter<BW, PRINT> {
    type Error = BW::Error;

    fn bit_order(&self) -> BitOrder {
        self.bit_write.bit_order()
    }

    fn write_bits(&mut self, value: u64, n: usize) -> Result<usize, Self::Error> {
        self.bit_write.write_bits(value, n).inspect(|&x| {
            self.bits_written += x;
            if PRINT {
                eprintln!(
                    "write_bits({:#016x}, {}) = {} (total = {})",
                    value, n, x, self.bits_written
                );
            }
        })
    }

    fn write_bit(&mut self, bit: bool) -> Result<usize, Self::Error> {
        self.bit_write.write_bit(bit).inspect(|&x| {
            self.bits_written += x;
            if PRINT {
                eprintln!("write_bit({}) (total = {})", bit, self.bits_written);
            }
        })
    }

    fn flush(&mut self) -> Result<usize, Self::Error> {
        self.bit_write.flush().inspect(|&x| {
            if PRINT {
                eprintln!("flush() = {} (total = {})", x, self.bits_written);
            }
        })
    }
}

/// Wrapping struct that keep tracks of read bits. Optionally,
/// prints to standard error information about methods called.
#[derive(Debug)]
pub struct CountBitReader<BR: BitRead, const PRINT: bool = false> {
    bit_read: BR,
    /// The number of bits read (or skipped) so far from the underlying [`BitRead`].
    pub bits_read: usize,
}

impl<BR: BitRead, const PRINT: bool> CountBitReader<BR, PRINT> {
    pub fn new(bit_read: BR) -> Self {
        Self {
            bit_read,
            bits_read: 0,
        }
    }

    pub fn into_inner(self) -> BR {
        self.bit_read
    }
}

impl<BR: BitRead, const PRINT: bool> BitRead for CountBitReader<BR, PRINT> {
    type Error = BR::Error;

    fn bit_order(&self) -> BitOrder {
        self.bit_read.bit_order()
    }

    fn read_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        self.bit_read.read_bits(n).inspect(|&x| {
            self.bits_read += n;
            if PRINT {
                eprintln!("read_bits({}) = {:#016x} (total = {})", n, x, self.bits_read);
            }
        })
    }

    fn read_bit(&mut self) -> Result<bool, Self::Error> {
        self.bit_read.read_bit().inspect(|&x| {
            self.bits_read += 1;
            if PRINT {
                eprintln!("read_bit() = {} (total = {})", x, self.bits_read);
            }
        })
    }

    fn peek_bits(&mut self, n: usize) -> Result<u64, Self::Error> {
        self.bit_read.peek_bits(n).inspect(|&x| {
            if PRINT {
                eprintln!("peek_bits({}) = {:#016x} (total = {})", n, x, self.bits_read);
            }
        })
    }

    fn skip_bits(&mut self, n: usize) -> Result<(), Self::Error> {
        self.bit_read.skip_bits(n).inspect(|_| {
            self.bits_read += n;
            if PRINT {
                eprintln!("skip_bits({}) (total = {})", n, self.bits_read);
            }
        })
    }
}

impl<BR: BitRead + BitSeek, const PRINT: bool> BitSeek for CountBitReader<BR, PRINT> {
    type Error = <BR as BitSeek>::Error;

    fn bit_pos(&mut self) -> Result<u64, Self::Error> {
        self.bit_read.bit_pos()
    }

    fn set_bit_pos(&mut self, bit_pos: u64) -> Result<(), Self::Error> {
        self.bit_read.set_bit_pos(bit_pos)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::impls::*;

    #[test]
    fn test_count() -> crate::Result<()> {
        let mut buffer = Vec::new();
        let config = StreamConfig::default().with_bit_order(BitOrder::MostSignificant);
        let bit_write = BitWriter::with_config(MemByteWriterVec::new(&mut buffer), config);
        let mut count_bit_write = CountBitWriter::<_, true>::new(bit_write);

        count_bit_write.write_bits(5, 3)?;
        assert_eq!(count_bit_write.bits_written, 3);
        count_bit_write.write_bit(true)?;
        assert_eq!(count_bit_write.bits_written, 4);
        count_bit_write.write_bits(0x1234, 16)?;
        assert_eq!(count_bit_write.bits_written, 20);
        assert_eq!(count_bit_write.flush()?, 20);
        drop(count_bit_write);
        assert_eq!(buffer, [0b1011_0001, 0x23, 0x40]);

        let bit_read = BitReader::with_config(MemByteReader::new(&buffer), config);
        let mut count_bit_read = CountBitReader::<_, true>::new(bit_read);

        assert_eq!(count_bit_read.peek_bits(3)?, 5);
        assert_eq!(count_bit_read.bits_read, 0);
        assert_eq!(count_bit_read.read_bits(3)?, 5);
        assert_eq!(count_bit_read.bits_read, 3);
        assert!(count_bit_read.read_bit()?);
        assert_eq!(count_bit_read.bits_read, 4);
        count_bit_read.skip_bits(4)?;
        assert_eq!(count_bit_read.bits_read, 8);
        assert_eq!(count_bit_read.bit_pos()?, 8);
        assert_eq!(count_bit_read.read_bits(12)?, 0x234);
        assert_eq!(count_bit_read.bits_read, 20);
        assert!(count_bit_read.read_bits(8).is_err());
        assert_eq!(count_bit_read.bits_read, 20);

        Ok(())
    }
}
