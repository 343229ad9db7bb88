#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffproc;

fuzz_target!(|data: &[u8]| {
    huffproc::huffman::round_trip(data);
});
