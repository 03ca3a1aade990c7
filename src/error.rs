//! Engine error kinds.
//!
//! A closed set: construction, format selection and the two codec
//! directions each have their own variant.  [`Error::BadData`] is the one
//! callers typically single out (untrusted input), and it also counts as a
//! decompression failure through [`Error::is_decompression_failure`].

use core::fmt;

use crate::deflate::DecompressError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid compression level or out of memory for the work tables.
    AllocationFailed,
    /// Format identifier outside `0..=2`.
    UnknownFormat(i32),
    /// The encoder ran out of space even with a bound-sized buffer.
    CompressionFailed,
    /// Decompression failed for a reason other than corrupt input.
    DecompressionFailed,
    /// Corrupt, truncated or otherwise malformed compressed input.
    BadData,
}

impl Error {
    /// Short stable identifier of the error kind.
    pub fn name(&self) -> &'static str {
        match self {
            Error::AllocationFailed => "AllocationFailed",
            Error::UnknownFormat(_) => "UnknownFormat",
            Error::CompressionFailed => "CompressionFailed",
            Error::DecompressionFailed => "DecompressionFailed",
            Error::BadData => "BadData",
        }
    }

    #[inline]
    pub fn is_bad_data(&self) -> bool {
        matches!(self, Error::BadData)
    }

    /// `true` for [`Error::DecompressionFailed`] and its specialization
    /// [`Error::BadData`].
    #[inline]
    pub fn is_decompression_failure(&self) -> bool {
        matches!(self, Error::DecompressionFailed | Error::BadData)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed => f.write_str("failed to allocate compressor state"),
            Error::UnknownFormat(id) => write!(f, "unknown compressed data format: {id}"),
            Error::CompressionFailed => f.write_str("failed to compress data"),
            Error::DecompressionFailed => f.write_str("failed to decompress data"),
            Error::BadData => f.write_str("bad compressed data"),
        }
    }
}

impl std::error::Error for Error {}

impl From<DecompressError> for Error {
    /// Space exhaustion is handled by the engine's growth loop; reaching this
    /// conversion with it means the loop gave up.
    fn from(e: DecompressError) -> Self {
        match e {
            DecompressError::BadData => Error::BadData,
            DecompressError::ShortOutput | DecompressError::InsufficientSpace => {
                Error::DecompressionFailed
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
