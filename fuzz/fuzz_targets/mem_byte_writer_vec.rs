#![no_main]

use libfuzzer_sys::fuzz_target;
use media_bitstream::fuzz::mem_byte_writer_vec::*;

fuzz_target!(|data: FuzzCase| harness(data));
