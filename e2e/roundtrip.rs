// e2e/roundtrip.rs: whole-library round trips.
//
// Exercises every level and format over inputs with different shapes:
// empty, tiny, text, binary, runs and data much larger than one block.

use rdeflate::{Compressor, Decompressor, Format};

fn xorshift_bytes(n: usize, seed: u64) -> Vec<u8> {
    let mut x = seed | 1;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x as u8
        })
        .collect()
}

fn inputs() -> Vec<(&'static str, Vec<u8>)> {
    let mut mixed = Vec::new();
    for i in 0..40u64 {
        mixed.extend(xorshift_bytes(3_000, i));
        mixed.extend(std::iter::repeat(i as u8).take(2_000));
        mixed.extend_from_slice(format!("record {i}: the quick brown fox\n").as_bytes());
    }
    vec![
        ("empty", Vec::new()),
        ("one byte", vec![0x42]),
        ("passthrough limit", b"x".repeat(55)),
        ("just above limit", b"xy".repeat(28)),
        ("text", include_str!("roundtrip.rs").as_bytes().repeat(20)),
        ("random", xorshift_bytes(200_000, 7)),
        ("zeros", vec![0u8; 700_000]),
        ("mixed", mixed),
    ]
}

#[test]
fn every_level_and_format() {
    let mut d = Decompressor::new().unwrap();
    for level in 1..=12 {
        let mut c = Compressor::new(level).unwrap();
        for (name, data) in inputs() {
            for format in Format::ALL {
                let z = c.compress(&data, format).unwrap();
                assert!(z.len() <= format.compress_bound(data.len()), "{name} {format} L{level}");
                let back = d.decompress(&z, format).unwrap();
                assert!(back == data, "{name} {format} L{level}: round trip mismatch");
            }
        }
    }
}

#[test]
fn exact_size_round_trip() {
    let mut c = Compressor::new(6).unwrap();
    let mut d = Decompressor::new().unwrap();
    for (name, data) in inputs() {
        for format in Format::ALL {
            let z = c.compress(&data, format).unwrap();
            let back = d.decompress_exact(&z, format, data.len()).unwrap();
            assert!(back == data, "{name} {format}");
        }
    }
}

#[test]
fn buffers_are_reused_across_calls() {
    let mut c = Compressor::new(5).unwrap();
    let mut d = Decompressor::new().unwrap();
    let mut zbuf = Vec::new();
    let mut obuf = Vec::new();
    for (name, data) in inputs() {
        let n = c.compress_into(&data, Format::Gzip, &mut zbuf).unwrap();
        assert_eq!(n, zbuf.len());
        let m = d.decompress_into(&zbuf, Format::Gzip, &mut obuf).unwrap();
        assert_eq!(m, data.len(), "{name}");
        assert!(obuf == data, "{name}");
    }
}

#[test]
fn repeated_text_compresses_well_at_every_level() {
    let data = include_str!("roundtrip.rs").as_bytes().repeat(50);
    for level in 1..=12 {
        let z = Compressor::new(level).unwrap().compress(&data, Format::RawDeflate).unwrap();
        assert!(z.len() < data.len() / 20, "level {level}: {} of {} bytes", z.len(), data.len());
    }
}
