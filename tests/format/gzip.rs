// Integration tests for the gzip wrapper (RFC 1952).

use rdeflate::deflate::{DecompressError, DeflateCompressor, DeflateDecompressor};
use rdeflate::format::gzip::{
    gzip_compress, gzip_compress_bound, gzip_decompress, parse_header, GZIP_FCOMMENT,
    GZIP_FEXTRA, GZIP_FHCRC, GZIP_FNAME, GZIP_FTEXT, GZIP_OVERHEAD,
};

const FOO: [u8; 26] = [
    0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x01, 0x03, 0x00, 0xFC, 0xFF,
    b'f', b'o', b'o', 0x21, 0x65, 0x73, 0x8C, 0x03, 0x00, 0x00, 0x00,
];

fn compress(level: i32, data: &[u8]) -> Vec<u8> {
    let mut c = DeflateCompressor::new(level).unwrap();
    let mut out = vec![0u8; gzip_compress_bound(data.len())];
    let n = gzip_compress(&mut c, data, &mut out).unwrap();
    out.truncate(n);
    out
}

fn decompress(data: &[u8], cap: usize) -> Result<(usize, Vec<u8>), DecompressError> {
    let mut d = DeflateDecompressor::new().unwrap();
    let mut out = vec![0u8; cap];
    let o = gzip_decompress(&mut d, data, &mut out)?;
    out.truncate(o.produced);
    Ok((o.consumed, out))
}

/// FOO with `flags` set and the given optional header bytes inserted.
fn with_fields(flags: u8, fields: &[u8]) -> Vec<u8> {
    let mut v = FOO[..10].to_vec();
    v[3] = flags;
    v.extend_from_slice(fields);
    v.extend_from_slice(&FOO[10..]);
    v
}

#[test]
fn bound_adds_eighteen_bytes() {
    assert_eq!(GZIP_OVERHEAD, 18);
    assert_eq!(gzip_compress_bound(0), 5 + 1 + 8 + 18);
}

#[test]
fn foo_vector() {
    assert_eq!(compress(6, b"foo"), FOO);
    assert_eq!(decompress(&FOO, 16).unwrap(), (FOO.len(), b"foo".to_vec()));
}

#[test]
fn header_carries_level_hint() {
    assert_eq!(compress(1, b"x")[8], 4);
    assert_eq!(compress(6, b"x")[8], 0);
    assert_eq!(compress(9, b"x")[8], 2);
    for level in 1..=12 {
        let z = compress(level, b"x");
        assert_eq!(&z[..4], &[0x1F, 0x8B, 0x08, 0x00]);
        assert_eq!(&z[4..8], &[0, 0, 0, 0], "MTIME");
        assert_eq!(z[9], 0xFF, "OS");
    }
}

#[test]
fn optional_header_fields_are_skipped() {
    let member = with_fields(
        GZIP_FTEXT | GZIP_FEXTRA | GZIP_FNAME | GZIP_FCOMMENT | GZIP_FHCRC,
        b"\x03\x00abcname.txt\0a comment\0\x12\x34",
    );
    assert_eq!(parse_header(&member).unwrap(), 10 + 5 + 9 + 10 + 2);
    let (consumed, out) = decompress(&member, 16).unwrap();
    assert_eq!(out, b"foo");
    assert_eq!(consumed, member.len());
}

#[test]
fn unterminated_name_is_bad_data() {
    let member = with_fields(GZIP_FNAME, b"no terminator");
    // The name runs into the body and trailer without a NUL.
    let member: Vec<u8> = member.into_iter().map(|b| if b == 0 { 1 } else { b }).collect();
    assert_eq!(parse_header(&member), Err(DecompressError::BadData));
}

#[test]
fn oversized_extra_field_is_bad_data() {
    let member = with_fields(GZIP_FEXTRA, b"\xFF\xFF");
    assert_eq!(decompress(&member, 16).unwrap_err(), DecompressError::BadData);
}

#[test]
fn fixed_fields_are_validated() {
    for (at, value) in [(0, 0x1E), (1, 0x8C), (2, 0x07), (3, 0x20), (3, 0x80)] {
        let mut bad = FOO;
        bad[at] = value;
        assert_eq!(decompress(&bad, 16).unwrap_err(), DecompressError::BadData, "byte {at} = {value:#x}");
    }
}

#[test]
fn trailer_is_checked() {
    let mut bad_crc = FOO;
    bad_crc[18] ^= 1;
    assert_eq!(decompress(&bad_crc, 16).unwrap_err(), DecompressError::BadData);

    let mut bad_size = FOO;
    bad_size[22] = 4;
    assert_eq!(decompress(&bad_size, 16).unwrap_err(), DecompressError::BadData);
}

#[test]
fn concatenated_members_report_first_member_length() {
    let first = compress(6, &b"first member ".repeat(20));
    let second = compress(1, b"second");
    let mut both = first.clone();
    both.extend_from_slice(&second);

    let (consumed, out) = decompress(&both, 1024).unwrap();
    assert_eq!(consumed, first.len());
    assert_eq!(out, b"first member ".repeat(20));
    assert_eq!(decompress(&both[consumed..], 1024).unwrap().1, b"second");
}
