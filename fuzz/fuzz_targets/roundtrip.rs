#![no_main]
use libfuzzer_sys::fuzz_target;
use rdeflate::{Compressor, Decompressor, Format};

fuzz_target!(|input: &[u8]| {
    // First byte picks level and format; the rest is the payload.
    let Some((&selector, data)) = input.split_first() else { return };
    let level = 1 + (selector % 12) as i32;
    let format = Format::ALL[(selector / 12 % 3) as usize];

    let mut c = Compressor::new(level).unwrap();
    let compressed = c.compress(data, format).unwrap();
    assert!(
        compressed.len() <= format.compress_bound(data.len()),
        "{} bytes at level {level} exceeded the {format} bound",
        data.len()
    );

    let mut d = Decompressor::new().unwrap();
    let recovered = d.decompress(&compressed, format).unwrap();
    assert_eq!(recovered, data, "{format} level {level} round trip mismatch");

    let exact = d.decompress_exact(&compressed, format, data.len()).unwrap();
    assert_eq!(exact, data);
});
