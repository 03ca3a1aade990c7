// Integration tests for the zlib wrapper (RFC 1950).

use rdeflate::deflate::{DecompressError, DeflateCompressor, DeflateDecompressor};
use rdeflate::format::zlib::{
    flevel, header, zlib_compress, zlib_compress_bound, zlib_decompress, ZLIB_OVERHEAD,
};

const FOO: [u8; 14] =
    [0x78, 0x9C, 0x01, 0x03, 0x00, 0xFC, 0xFF, b'f', b'o', b'o', 0x02, 0x82, 0x01, 0x45];

fn compress(level: i32, data: &[u8]) -> Vec<u8> {
    let mut c = DeflateCompressor::new(level).unwrap();
    let mut out = vec![0u8; zlib_compress_bound(data.len())];
    let n = zlib_compress(&mut c, data, &mut out).unwrap();
    out.truncate(n);
    out
}

fn decompress(data: &[u8], cap: usize) -> Result<(usize, Vec<u8>), DecompressError> {
    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; cap];
    let o = zlib_decompress(&mut d, data, &mut out)?;
    out.truncate(o.produced);
    Ok((o.consumed, out))
}

#[test]
fn bound_adds_six_bytes() {
    assert_eq!(ZLIB_OVERHEAD, 6);
    assert_eq!(zlib_compress_bound(0), 5 + 1 + 8 + 6);
    assert_eq!(zlib_compress_bound(20_000), 10 + 20_000 + 1 + 8 + 6);
}

#[test]
fn every_level_writes_a_valid_header() {
    for level in 1..=12 {
        let z = compress(level, b"some bytes to wrap in a zlib stream");
        assert_eq!(&z[..2], &header(level));
        assert_eq!(u16::from_be_bytes([z[0], z[1]]) % 31, 0, "level {level}");
        assert_eq!(z[1] >> 6, flevel(level), "level {level}");
    }
    assert_eq!(flevel(1), 0);
    assert_eq!(flevel(5), 1);
    assert_eq!(flevel(6), 2);
    assert_eq!(flevel(7), 3);
}

#[test]
fn foo_vector() {
    assert_eq!(compress(6, b"foo"), FOO);
    assert_eq!(decompress(&FOO, 16).unwrap(), (FOO.len(), b"foo".to_vec()));
}

#[test]
fn trailing_bytes_are_not_consumed() {
    let mut data = FOO.to_vec();
    data.extend_from_slice(&[0xDE, 0xAD]);
    assert_eq!(decompress(&data, 16).unwrap().0, FOO.len());
}

#[test]
fn header_fields_are_validated() {
    let fix = |cmf: u8, flg: u8| {
        let hdr = ((cmf as u16) << 8) | flg as u16;
        let hdr = hdr | (31 - hdr % 31) % 31;
        let mut v = FOO;
        v[..2].copy_from_slice(&hdr.to_be_bytes());
        v
    };
    // Wrong compression method.
    assert_eq!(decompress(&fix(0x79, 0x80), 16).unwrap_err(), DecompressError::BadData);
    // Window larger than 32 KiB.
    assert_eq!(decompress(&fix(0x88, 0x80), 16).unwrap_err(), DecompressError::BadData);
    // Smaller windows are accepted.
    assert_eq!(decompress(&fix(0x58, 0x80), 16).unwrap().1, b"foo");
}

#[test]
fn short_input_is_bad_data() {
    for n in 0..FOO.len() {
        assert_eq!(decompress(&FOO[..n], 16).unwrap_err(), DecompressError::BadData, "len {n}");
    }
}

#[test]
fn adler_mismatch_is_bad_data() {
    let data = b"The quick brown fox jumps over the lazy dog. ".repeat(100);
    let mut z = compress(9, &data);
    let n = z.len();
    z[n - 1] ^= 0x10;
    assert_eq!(decompress(&z, data.len()).unwrap_err(), DecompressError::BadData);
}

#[test]
fn small_output_reports_insufficient_space() {
    let data = vec![7u8; 10_000];
    let z = compress(6, &data);
    assert_eq!(decompress(&z, 9_999).unwrap_err(), DecompressError::InsufficientSpace);
}
