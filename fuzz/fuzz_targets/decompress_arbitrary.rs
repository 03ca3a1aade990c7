#![no_main]
use libfuzzer_sys::fuzz_target;
use rdeflate::{Decompressor, Format};

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must produce Ok or Err, never a panic.
    let mut d = Decompressor::new().unwrap();
    for format in Format::ALL {
        if let Ok((consumed, _)) = d.decompress_member(data, format) {
            assert!(consumed <= data.len());
        }
    }
});
