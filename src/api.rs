//! Loosely typed entry points for binding layers.
//!
//! Formats are plain integers ([`DEFLATE`], [`ZLIB`], [`GZIP`]) and most
//! arguments are optional, with the defaults a scripting-language wrapper
//! would expose.  Everything here is a thin shim over [`Compressor`],
//! [`Decompressor`] and [`checksum`](crate::checksum).

use crate::checksum::{self, ADLER32_INIT, CRC32_INIT};
use crate::config::DEFAULT_COMPRESSION_LEVEL;
use crate::engine::{Compressor, Decompressor};
use crate::error::Result;
use crate::format::Format;

pub use crate::format::{DEFLATE, GZIP, ZLIB};

/// Compressor at `level`, or at the default level when `None`.
pub fn new_compressor(level: Option<i32>) -> Result<Compressor> {
    Compressor::new(level.unwrap_or(DEFAULT_COMPRESSION_LEVEL))
}

pub fn new_decompressor() -> Result<Decompressor> {
    Decompressor::new()
}

/// CRC-32 of `data` continuing from `state`.
///
/// With no data the state is returned unchanged (`0` when absent too); with
/// data and no state the computation starts from the CRC-32 seed.
pub fn crc32(data: Option<&[u8]>, state: Option<u32>) -> u32 {
    match data {
        None => state.unwrap_or(CRC32_INIT),
        Some(d) => checksum::crc32(state.unwrap_or(CRC32_INIT), d),
    }
}

/// Adler-32 of `data` continuing from `state`.
///
/// Same rules as [`crc32`], with `1` as the seed and the no-input value.
pub fn adler32(data: Option<&[u8]>, state: Option<u32>) -> u32 {
    match data {
        None => state.unwrap_or(ADLER32_INIT),
        Some(d) => checksum::adler32(state.unwrap_or(ADLER32_INIT), d),
    }
}

/// Compress `data` as `format` (raw DEFLATE when `None`).
///
/// When `outbuf` is given it is reused and returned; its capacity is tried
/// before any reallocation.  An unknown format id fails before allocating.
pub fn compress(
    c: &mut Compressor,
    data: &[u8],
    format: Option<i32>,
    outbuf: Option<Vec<u8>>,
) -> Result<Vec<u8>> {
    let format = Format::try_from(format.unwrap_or(DEFLATE))?;
    match outbuf {
        None => c.compress(data, format),
        Some(mut buf) => {
            c.compress_into(data, format, &mut buf)?;
            Ok(buf)
        }
    }
}

/// Decompress `data` as `format` (raw DEFLATE when `None`).
pub fn decompress(
    d: &mut Decompressor,
    data: &[u8],
    format: Option<i32>,
    outbuf: Option<Vec<u8>>,
) -> Result<Vec<u8>> {
    let format = Format::try_from(format.unwrap_or(DEFLATE))?;
    match outbuf {
        None => d.decompress(data, format),
        Some(mut buf) => {
            d.decompress_into(data, format, &mut buf)?;
            Ok(buf)
        }
    }
}
