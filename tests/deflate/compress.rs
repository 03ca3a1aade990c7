// Integration tests for the raw DEFLATE compressor (`deflate::compress`).
//
// Covers the bound formula, the short-input stored path, block type choice
// and level handling.

use rdeflate::deflate::{
    deflate_compress_bound, CompressError, DeflateCompressor, DeflateDecompressor, CLEVEL_MAX,
    CLEVEL_MIN,
};

fn text(n: usize) -> Vec<u8> {
    let words = ["alpha ", "beta ", "gamma ", "delta ", "epsilon\n"];
    let mut state = 12345u32;
    let mut v = Vec::with_capacity(n + 8);
    while v.len() < n {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        v.extend_from_slice(words[(state >> 16) as usize % words.len()].as_bytes());
    }
    v.truncate(n);
    v
}

fn noise(n: usize) -> Vec<u8> {
    let mut x = 0x1234_5678_9ABC_DEF1u64;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x >> 24) as u8
        })
        .collect()
}

fn compress(level: i32, data: &[u8]) -> Vec<u8> {
    let mut c = DeflateCompressor::new(level).unwrap();
    let mut out = vec![0u8; deflate_compress_bound(data.len())];
    let n = c.compress(data, &mut out).unwrap();
    out.truncate(n);
    out
}

fn inflate(data: &[u8], size: usize) -> Vec<u8> {
    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; size];
    let o = d.decompress(data, &mut out).unwrap();
    assert_eq!(o.consumed, data.len());
    out.truncate(o.produced);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bound_formula() {
    assert_eq!(deflate_compress_bound(0), 5 + 1 + 8);
    assert_eq!(deflate_compress_bound(3), 5 + 3 + 1 + 8);
    assert_eq!(deflate_compress_bound(10_000), 5 + 10_000 + 1 + 8);
    assert_eq!(deflate_compress_bound(10_001), 10 + 10_001 + 1 + 8);
    assert!(deflate_compress_bound(usize::MAX / 2) > usize::MAX / 2);
}

#[test]
fn output_never_exceeds_bound() {
    for &n in &[0usize, 1, 55, 56, 1000, 70_000, 300_000] {
        for data in [noise(n), text(n), vec![0u8; n]] {
            for level in [CLEVEL_MIN, 6, CLEVEL_MAX] {
                let z = compress(level, &data);
                assert!(z.len() <= deflate_compress_bound(n), "n={n} level={level}");
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Short inputs and empty input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn foo_is_a_single_stored_block() {
    assert_eq!(compress(6, b"foo"), [0x01, 0x03, 0x00, 0xFC, 0xFF, b'f', b'o', b'o']);
}

#[test]
fn empty_input_is_an_empty_stored_block() {
    assert_eq!(compress(6, b""), [0x01, 0x00, 0x00, 0xFF, 0xFF]);
}

#[test]
fn passthrough_limit_is_fifty_five_bytes() {
    let data = vec![b'a'; 55];
    let z = compress(12, &data);
    assert_eq!(z.len(), 5 + 55);
    assert_eq!(z[0] & 0x07, 0x01);

    // One byte more and a run of the same byte is worth encoding.
    let data = vec![b'a'; 56];
    let z = compress(12, &data);
    assert!(z.len() < 20, "got {} bytes", z.len());
    assert_eq!(inflate(&z, 56), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Block choice
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn incompressible_data_falls_back_to_stored() {
    let data = noise(100_000);
    let z = compress(6, &data);
    // Stored framing costs 5 bytes per 64 KiB block at most.
    assert!(z.len() <= data.len() + 5 * 3, "got {} bytes", z.len());
    assert_eq!(inflate(&z, data.len()), data);
}

#[test]
fn repetitive_text_shrinks_at_every_level() {
    let data = text(200_000);
    let mut sizes = Vec::new();
    for level in CLEVEL_MIN..=CLEVEL_MAX {
        let z = compress(level, &data);
        assert!(z.len() < data.len() / 2, "level {level}: {} bytes", z.len());
        assert_eq!(inflate(&z, data.len()), data, "level {level}");
        sizes.push(z.len());
    }
    assert!(sizes[CLEVEL_MAX as usize - 1] <= sizes[0], "{sizes:?}");
}

#[test]
fn long_input_spans_several_blocks() {
    let mut data = text(600_000);
    data.extend(noise(100_000));
    data.extend(vec![0u8; 100_000]);
    for level in [1, 6, 12] {
        let z = compress(level, &data);
        assert_eq!(inflate(&z, data.len()), data, "level {level}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Levels and output space
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn levels_outside_range_are_rejected() {
    assert!(DeflateCompressor::new(0).is_none());
    assert!(DeflateCompressor::new(13).is_none());
    assert!(DeflateCompressor::new(-1).is_none());
    assert_eq!(DeflateCompressor::new(9).unwrap().level(), 9);
}

#[test]
fn small_output_reports_insufficient_space() {
    let data = noise(4096);
    let mut c = DeflateCompressor::new(6).unwrap();
    let mut out = vec![0u8; 100];
    assert_eq!(c.compress(&data, &mut out), Err(CompressError::InsufficientSpace));
    let mut out = vec![0u8; 0];
    assert_eq!(c.compress(b"", &mut out), Err(CompressError::InsufficientSpace));
}

#[test]
fn compressor_is_reusable() {
    let mut c = DeflateCompressor::new(6).unwrap();
    let a = text(50_000);
    let b = noise(50_000);
    let mut out = vec![0u8; deflate_compress_bound(50_000)];
    let n1 = c.compress(&a, &mut out).unwrap();
    let first = out[..n1].to_vec();
    let _ = c.compress(&b, &mut out).unwrap();
    let n3 = c.compress(&a, &mut out).unwrap();
    assert_eq!(&out[..n3], &first[..]);
}
