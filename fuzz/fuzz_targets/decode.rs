#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate huffproc;

fuzz_target!(|data: &[u8]| {
    _ = huffproc::decompress_to_vec(data);
});
