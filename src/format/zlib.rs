//! zlib container (RFC 1950): 2-byte header, DEFLATE data, big-endian
//! Adler-32 of the uncompressed data.

use crate::checksum::{adler32, ADLER32_INIT};
use crate::deflate::{
    deflate_compress_bound, CompressError, DecompressError, DeflateCompressor,
    DeflateDecompressor, Outcome,
};

pub const ZLIB_HEADER_LEN: usize = 2;
pub const ZLIB_TRAILER_LEN: usize = 4;
pub const ZLIB_OVERHEAD: usize = ZLIB_HEADER_LEN + ZLIB_TRAILER_LEN;

pub const ZLIB_CM_DEFLATE: u8 = 8;
/// log2(window size) - 8 for a 32 KiB window.
pub const ZLIB_CINFO_32K_WINDOW: u8 = 7;
pub const ZLIB_FDICT: u8 = 0x20;

pub const ZLIB_FASTEST_COMPRESSION: u8 = 0;
pub const ZLIB_FAST_COMPRESSION: u8 = 1;
pub const ZLIB_DEFAULT_COMPRESSION: u8 = 2;
pub const ZLIB_SLOWEST_COMPRESSION: u8 = 3;

pub fn zlib_compress_bound(in_len: usize) -> usize {
    deflate_compress_bound(in_len) + ZLIB_OVERHEAD
}

/// FLEVEL header hint for a compression level.
pub fn flevel(level: i32) -> u8 {
    match level {
        i32::MIN..=1 => ZLIB_FASTEST_COMPRESSION,
        2..=5 => ZLIB_FAST_COMPRESSION,
        6 => ZLIB_DEFAULT_COMPRESSION,
        _ => ZLIB_SLOWEST_COMPRESSION,
    }
}

/// CMF/FLG pair for `level`, FCHECK making the big-endian value a multiple of 31.
pub fn header(level: i32) -> [u8; ZLIB_HEADER_LEN] {
    let cmf = (ZLIB_CINFO_32K_WINDOW << 4) | ZLIB_CM_DEFLATE;
    let mut hdr = ((cmf as u16) << 8) | ((flevel(level) as u16) << 6);
    hdr |= 31 - (hdr % 31);
    hdr.to_be_bytes()
}

pub fn zlib_compress(
    c: &mut DeflateCompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, CompressError> {
    if out.len() < ZLIB_OVERHEAD {
        return Err(CompressError::InsufficientSpace);
    }
    let body_end = out.len() - ZLIB_TRAILER_LEN;
    out[..ZLIB_HEADER_LEN].copy_from_slice(&header(c.level()));
    let n = c.compress(input, &mut out[ZLIB_HEADER_LEN..body_end])?;
    let end = ZLIB_HEADER_LEN + n;
    out[end..end + ZLIB_TRAILER_LEN]
        .copy_from_slice(&adler32(ADLER32_INIT, input).to_be_bytes());
    Ok(end + ZLIB_TRAILER_LEN)
}

pub fn zlib_decompress(
    d: &mut DeflateDecompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<Outcome, DecompressError> {
    if input.len() < ZLIB_OVERHEAD {
        return Err(DecompressError::BadData);
    }
    let (cmf, flg) = (input[0], input[1]);
    if u16::from_be_bytes([cmf, flg]) % 31 != 0
        || cmf & 0x0F != ZLIB_CM_DEFLATE
        || cmf >> 4 > ZLIB_CINFO_32K_WINDOW
        || flg & ZLIB_FDICT != 0
    {
        return Err(DecompressError::BadData);
    }

    let body = &input[ZLIB_HEADER_LEN..input.len() - ZLIB_TRAILER_LEN];
    let o = d.decompress(body, out)?;

    let trailer_at = ZLIB_HEADER_LEN + o.consumed;
    let trailer = &input[trailer_at..trailer_at + ZLIB_TRAILER_LEN];
    let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    if adler32(ADLER32_INIT, &out[..o.produced]) != expected {
        return Err(DecompressError::BadData);
    }
    Ok(Outcome { consumed: trailer_at + ZLIB_TRAILER_LEN, produced: o.produced })
}
