#![no_main]

use libfuzzer_sys::fuzz_target;
use media_bitstream::fuzz::roundtrip::*;

fuzz_target!(|data: FuzzCase| harness(data));
