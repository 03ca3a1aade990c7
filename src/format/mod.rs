//! Container formats and the static format table.
//!
//! | Id | [`Format`]   | Framing                           | Bound            |
//! |----|--------------|-----------------------------------|------------------|
//! | 0  | `RawDeflate` | none                              | DEFLATE bound    |
//! | 1  | `Zlib`       | 2-byte header, Adler-32 trailer   | DEFLATE bound + 6  |
//! | 2  | `Gzip`       | 10+-byte header, CRC-32 + ISIZE   | DEFLATE bound + 18 |
//!
//! Every entry of [`FORMATS`] carries plain function pointers, so the table
//! is immutable and shared by all compressors and decompressors.

pub mod gzip;
pub mod zlib;

use crate::deflate::{
    deflate_compress_bound, CompressError, DecompressError, DeflateCompressor,
    DeflateDecompressor, Outcome,
};
use crate::error::Error;

pub const DEFLATE: i32 = 0;
pub const ZLIB: i32 = 1;
pub const GZIP: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Format {
    RawDeflate = DEFLATE,
    Zlib = ZLIB,
    Gzip = GZIP,
}

pub type CompressFn = fn(&mut DeflateCompressor, &[u8], &mut [u8]) -> Result<usize, CompressError>;
pub type DecompressFn =
    fn(&mut DeflateDecompressor, &[u8], &mut [u8]) -> Result<Outcome, DecompressError>;

/// Per-format behaviour.
pub struct FormatSpec {
    pub format: Format,
    /// Name accepted on the command line.
    pub name: &'static str,
    /// File suffix used by the command-line tool, without the dot.
    pub extension: &'static str,
    pub bound: fn(usize) -> usize,
    pub compress: CompressFn,
    pub decompress: DecompressFn,
}

fn raw_compress(
    c: &mut DeflateCompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<usize, CompressError> {
    c.compress(input, out)
}

fn raw_decompress(
    d: &mut DeflateDecompressor,
    input: &[u8],
    out: &mut [u8],
) -> Result<Outcome, DecompressError> {
    d.decompress(input, out)
}

/// Indexed by format id.
pub static FORMATS: [FormatSpec; 3] = [
    FormatSpec {
        format: Format::RawDeflate,
        name: "deflate",
        extension: "deflate",
        bound: deflate_compress_bound,
        compress: raw_compress,
        decompress: raw_decompress,
    },
    FormatSpec {
        format: Format::Zlib,
        name: "zlib",
        extension: "zz",
        bound: zlib::zlib_compress_bound,
        compress: zlib::zlib_compress,
        decompress: zlib::zlib_decompress,
    },
    FormatSpec {
        format: Format::Gzip,
        name: "gzip",
        extension: "gz",
        bound: gzip::gzip_compress_bound,
        compress: gzip::gzip_compress,
        decompress: gzip::gzip_decompress,
    },
];

impl Format {
    pub const ALL: [Format; 3] = [Format::RawDeflate, Format::Zlib, Format::Gzip];

    #[inline]
    pub fn id(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn spec(self) -> &'static FormatSpec {
        &FORMATS[self as usize]
    }

    /// Worst-case compressed size of `in_len` bytes in this container.
    #[inline]
    pub fn compress_bound(self, in_len: usize) -> usize {
        (self.spec().bound)(in_len)
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn extension(self) -> &'static str {
        self.spec().extension
    }
}

impl TryFrom<i32> for Format {
    type Error = Error;

    fn try_from(id: i32) -> Result<Self, Error> {
        match id {
            DEFLATE => Ok(Format::RawDeflate),
            ZLIB => Ok(Format::Zlib),
            GZIP => Ok(Format::Gzip),
            other => Err(Error::UnknownFormat(other)),
        }
    }
}

impl core::fmt::Display for Format {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
