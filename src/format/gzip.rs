//! gzip container (RFC 1952): 10-byte header plus optional fields, DEFLATE
//! data, then CRC-32 and ISIZE (uncompressed size mod 2^32), little-endian.

use crate::checksum::{crc32, CRC32_INIT};
use crate::deflate::{
    deflate_compress_bound, CompressError, DecompressError, DeflateCompressor,
    DeflateDecompressor, Outcome,
};

pub const GZIP_MIN_HEADER_LEN: usize = 10;
pub const GZIP_TRAILER_LEN: usize = 8;
pub const GZIP_OVERHEAD: usize = GZIP_MIN_HEADER_LEN + GZIP_TRAILER_LEN;

pub const GZIP_ID1: u8 = 0x1F;
pub const GZIP_ID2: u8 = 0x8B;
pub const GZIP_CM_DEFLATE: u8 = 8;

pub const GZIP_FTEXT: u8 = 0x01;
pub const GZIP_FHCRC: u8 = 0x02;
pub const GZIP_FEXTRA: u8 = 0x04;
pub const GZIP_FNAME: u8 = 0x08;
pub const GZIP_FCOMMENT: u8 = 0x10;
pub const GZIP_FRESERVED: u8 = 0xE0;

pub const GZIP_MTIME_UNAVAILABLE: u32 = 0;
pub const GZIP_XFL_SLOWEST_COMPRESSION: u8 = 0x02;
pub const GZIP_XFL_FASTEST_COMPRESSION: u8 = 0x04;
pub const GZIP_OS_UNKNOWN: u8 = 0xFF;

pub fn gzip_compress_bound(in_len: usize) -> usize {
    deflate_compress_bound(in_len) + GZIP_OVERHEAD
}

/// XFL header hint for a compression level.
pub fn xfl(level: i32) -> u8 {
    match level {
        1 => GZIP_XFL_FASTEST_COMPRESSION,
        8..=i32::MAX => GZIP_XFL_SLOWEST_COMPRESSION,
        _ => 0,
    }
}

pub fn header(level: i32) -> [u8; GZIP_MIN_HEADER_LEN] {
    let mtime = GZIP_MTIME_UNAVAILABLE.to_le_bytes();
    [
        GZIP_ID1,
        GZIP_ID2,
        GZIP_CM_DEFLATE,
        0,
        mtime[0],
        mtime[1],
        mtime[2],
        mtime[3],
        xfl(level),
        GZIP_OS_UNKNOWN,
    ]
}

pub fn gzip_compress(
    c: &mut DeflateCompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, CompressError> {
    if out.len() < GZIP_OVERHEAD {
        return Err(CompressError::InsufficientSpace);
    }
    let body_end = out.len() - GZIP_TRAILER_LEN;
    out[..GZIP_MIN_HEADER_LEN].copy_from_slice(&header(c.level()));
    let n = c.compress(input, &mut out[GZIP_MIN_HEADER_LEN..body_end])?;
    let end = GZIP_MIN_HEADER_LEN + n;
    out[end..end + 4].copy_from_slice(&crc32(CRC32_INIT, input).to_le_bytes());
    out[end + 4..end + 8].copy_from_slice(&(input.len() as u32).to_le_bytes());
    Ok(end + GZIP_TRAILER_LEN)
}

/// Length of the member header at the start of `input`, optional fields
/// included.  Only the fixed fields and the flag layout are validated.
pub fn parse_header(input: &[u8]) -> Result<usize, DecompressError> {
    if input.len() < GZIP_OVERHEAD
        || input[0] != GZIP_ID1
        || input[1] != GZIP_ID2
        || input[2] != GZIP_CM_DEFLATE
    {
        return Err(DecompressError::BadData);
    }
    let flg = input[3];
    if flg & GZIP_FRESERVED != 0 {
        return Err(DecompressError::BadData);
    }

    // The trailer must still fit after every optional field.
    let limit = input.len() - GZIP_TRAILER_LEN;
    let mut pos = GZIP_MIN_HEADER_LEN;

    if flg & GZIP_FEXTRA != 0 {
        let xlen = match input.get(pos..pos + 2) {
            Some(b) => u16::from_le_bytes([b[0], b[1]]) as usize,
            None => return Err(DecompressError::BadData),
        };
        pos += 2 + xlen;
        if pos > limit {
            return Err(DecompressError::BadData);
        }
    }
    for field in [GZIP_FNAME, GZIP_FCOMMENT] {
        if flg & field != 0 {
            let nul = input[pos..limit]
                .iter()
                .position(|&b| b == 0)
                .ok_or(DecompressError::BadData)?;
            pos += nul + 1;
        }
    }
    if flg & GZIP_FHCRC != 0 {
        pos += 2;
        if pos > limit {
            return Err(DecompressError::BadData);
        }
    }
    Ok(pos)
}

pub fn gzip_decompress(
    d: &mut DeflateDecompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<Outcome, DecompressError> {
    let start = parse_header(input)?;
    let body = &input[start..input.len() - GZIP_TRAILER_LEN];
    let o = d.decompress(body, out)?;

    let at = start + o.consumed;
    let t = &input[at..at + GZIP_TRAILER_LEN];
    let crc = u32::from_le_bytes([t[0], t[1], t[2], t[3]]);
    let size = u32::from_le_bytes([t[4], t[5], t[6], t[7]]);
    if crc32(CRC32_INIT, &out[..o.produced]) != crc || o.produced as u32 != size {
        return Err(DecompressError::BadData);
    }
    Ok(Outcome { consumed: at + GZIP_TRAILER_LEN, produced: o.produced })
}
