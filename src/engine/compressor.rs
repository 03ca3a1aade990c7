//! Bounded-output compression with a single grow-and-retry.

use core::fmt;

use crate::config::DEFAULT_COMPRESSION_LEVEL;
use crate::deflate::{CompressError, DeflateCompressor};
use crate::error::{Error, Result};
use crate::format::Format;

/// A compressor bound to one compression level.
///
/// The level is fixed for the lifetime of the value.  The work tables are
/// reused across calls but no data carries over from one call to the next.
pub struct Compressor {
    inner: DeflateCompressor,
}

impl Compressor {
    /// Build a compressor for `level` (`1..=12`).
    ///
    /// Fails with [`Error::AllocationFailed`] for a level outside that range
    /// or when the work tables cannot be allocated.
    pub fn new(level: i32) -> Result<Self> {
        DeflateCompressor::new(level)
            .map(|inner| Self { inner })
            .ok_or(Error::AllocationFailed)
    }

    pub fn with_default_level() -> Result<Self> {
        Self::new(DEFAULT_COMPRESSION_LEVEL)
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.inner.level()
    }

    /// Compress `input` into a freshly allocated buffer sized by the format's
    /// bound.
    pub fn compress(&mut self, input: &[u8], format: Format) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(format.compress_bound(input.len()))
            .map_err(|_| Error::AllocationFailed)?;
        self.compress_into(input, format, &mut out)?;
        Ok(out)
    }

    /// Compress `input` into `out`, replacing its contents.
    ///
    /// The existing capacity of `out` is tried first.  If it is too small and
    /// below the format's bound, `out` is grown to the bound and compression
    /// is retried once.  On success `out.len()` is the compressed size and
    /// the capacity is kept for the next call.  On failure `out` is empty.
    pub fn compress_into(&mut self, input: &[u8], format: Format, out: &mut Vec<u8>) -> Result<usize> {
        let spec = format.spec();
        let inner = &mut self.inner;
        compress_with(|buf| (spec.compress)(inner, input, buf), (spec.bound)(input.len()), out)
    }
}

/// Run `codec` over the spare capacity of `out`, growing it to `bound` and
/// retrying once on [`CompressError::InsufficientSpace`].
///
/// No retry happens when the existing capacity already reaches `bound`.
/// Running out of space at the bound is [`Error::CompressionFailed`].
fn compress_with<F>(mut codec: F, bound: usize, out: &mut Vec<u8>) -> Result<usize>
where
    F: FnMut(&mut [u8]) -> core::result::Result<usize, CompressError>,
{
    out.clear();
    let capacity = out.capacity();
    out.resize(capacity, 0);
    match codec(out.as_mut_slice()) {
        Ok(n) => {
            out.truncate(n);
            return Ok(n);
        }
        Err(CompressError::InsufficientSpace) if capacity >= bound => {
            out.clear();
            return Err(Error::CompressionFailed);
        }
        Err(CompressError::InsufficientSpace) => {}
    }

    if out.try_reserve_exact(bound - out.len()).is_err() {
        out.clear();
        return Err(Error::AllocationFailed);
    }
    out.resize(bound, 0);
    match codec(out.as_mut_slice()) {
        Ok(n) => {
            out.truncate(n);
            Ok(n)
        }
        Err(CompressError::InsufficientSpace) => {
            out.clear();
            Err(Error::CompressionFailed)
        }
    }
}

impl fmt::Debug for Compressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compressor").field("level", &self.level()).finish_non_exhaustive()
    }
}
