// Integration tests for the raw DEFLATE decoder (`deflate::decompress`).
//
// Streams below were produced by zlib; malformed ones are built by hand.

use rdeflate::deflate::{
    deflate_compress_bound, DecompressError, DeflateCompressor, DeflateDecompressor, Outcome,
};

fn inflate(input: &[u8], cap: usize) -> Result<(Outcome, Vec<u8>), DecompressError> {
    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; cap];
    let o = d.decompress(input, &mut out)?;
    out.truncate(o.produced);
    Ok((o, out))
}

/// "hello hello hello hello" in one static-Huffman block.
const HELLO_STATIC: [u8; 10] = [0xCB, 0x48, 0xCD, 0xC9, 0xC9, 0x57, 0xC8, 0x40, 0x27, 0x01];

/// `"abc" * 10`, a full flush (empty stored block), then `"xyz" * 10`.
const FLUSHED: [u8; 19] = [
    0x4A, 0x4C, 0x4A, 0x4E, 0xC4, 0x8D, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xAB, 0xA8, 0xAC,
    0xAA, 0xC0, 0x8D, 0x00,
];

#[test]
fn static_block_from_zlib() {
    let (o, out) = inflate(&HELLO_STATIC, 64).unwrap();
    assert_eq!(out, b"hello hello hello hello");
    assert_eq!(o.consumed, HELLO_STATIC.len());
}

#[test]
fn multiple_blocks_with_sync_flush() {
    let (o, out) = inflate(&FLUSHED, 100).unwrap();
    let mut expected = b"abc".repeat(10);
    expected.extend(b"xyz".repeat(10));
    assert_eq!(out, expected);
    assert_eq!(o.consumed, FLUSHED.len());
}

#[test]
fn exact_output_size_is_enough() {
    let (_, out) = inflate(&HELLO_STATIC, 23).unwrap();
    assert_eq!(out.len(), 23);
    assert_eq!(inflate(&HELLO_STATIC, 22).unwrap_err(), DecompressError::InsufficientSpace);
}

#[test]
fn consumed_excludes_following_data() {
    let mut input = HELLO_STATIC.to_vec();
    input.extend_from_slice(b"not deflate at all");
    let (o, out) = inflate(&input, 64).unwrap();
    assert_eq!(out, b"hello hello hello hello");
    assert_eq!(o.consumed, HELLO_STATIC.len());
}

#[test]
fn oversubscribed_precode_is_bad_data() {
    // Dynamic block, HCLEN = 4, precode lengths all 1.
    let input = [0x05, 0x00, 0x92, 0x04];
    assert_eq!(inflate(&input, 64).unwrap_err(), DecompressError::BadData);
}

#[test]
fn empty_input_is_bad_data() {
    assert_eq!(inflate(&[], 64).unwrap_err(), DecompressError::BadData);
}

#[test]
fn missing_final_block_is_bad_data() {
    // Non-final empty stored block and nothing after it.
    assert_eq!(inflate(&[0x00, 0x00, 0x00, 0xFF, 0xFF], 64).unwrap_err(), DecompressError::BadData);
}

#[test]
fn decoder_is_reusable_across_block_types() {
    let data = b"0123456789abcdef".iter().cycle().take(50_000).copied().collect::<Vec<u8>>();
    let mut c = DeflateCompressor::new(6).unwrap();
    let mut z = vec![0u8; deflate_compress_bound(data.len())];
    let n = c.compress(&data, &mut z).unwrap();

    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; data.len()];
    for _ in 0..2 {
        let o = d.decompress(&HELLO_STATIC, &mut out).unwrap();
        assert_eq!(&out[..o.produced], b"hello hello hello hello");
        let o = d.decompress(&z[..n], &mut out).unwrap();
        assert_eq!(o.produced, data.len());
        assert_eq!(out, data);
        // A failed call must not poison the next one.
        assert!(d.decompress(&[0x07], &mut out).is_err());
    }
}

#[test]
fn corrupted_streams_never_panic() {
    let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8 ^ (i / 97) as u8).collect();
    let mut c = DeflateCompressor::new(9).unwrap();
    let mut z = vec![0u8; deflate_compress_bound(data.len())];
    let n = c.compress(&data, &mut z).unwrap();
    z.truncate(n);

    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; data.len() * 2];
    for i in (0..n).step_by(7) {
        let mut bad = z.clone();
        bad[i] ^= 1 << (i % 8);
        // Any outcome is fine as long as it is reported, not a panic.
        if let Ok(o) = d.decompress(&bad, &mut out) {
            assert!(o.consumed <= bad.len());
            assert!(o.produced <= out.len());
        }
    }
}
