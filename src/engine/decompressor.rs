//! Decompression into a growable buffer.
//!
//! The output buffer starts at the policy's guess (or at whatever capacity
//! the caller's buffer already has) and doubles on every insufficient-space
//! result.  There is no retry limit: growth stops only when the data fits or
//! an allocation fails, which is reported as [`Error::AllocationFailed`].

use core::fmt;

use crate::config::BufferPolicy;
use crate::deflate::{DecompressError, DeflateDecompressor};
use crate::error::{Error, Result};
use crate::format::Format;

pub struct Decompressor {
    inner: DeflateDecompressor,
    policy: BufferPolicy,
}

impl Decompressor {
    pub fn new() -> Result<Self> {
        Self::with_policy(BufferPolicy::default())
    }

    /// Build a decompressor with custom buffer sizing.
    pub fn with_policy(policy: BufferPolicy) -> Result<Self> {
        DeflateDecompressor::new()
            .map(|inner| Self { inner, policy })
            .ok_or(Error::AllocationFailed)
    }

    #[inline]
    pub fn policy(&self) -> BufferPolicy {
        self.policy
    }

    /// Decompress `input` into a new buffer.
    pub fn decompress(&mut self, input: &[u8], format: Format) -> Result<Vec<u8>> {
        let mut out = self.guess_buffer(input.len())?;
        self.decompress_into(input, format, &mut out)?;
        Ok(out)
    }

    /// Decompress `input` into `out`, replacing its contents, and return the
    /// decompressed size.  Bytes after the end of the compressed stream are
    /// ignored.  On failure `out` is empty.
    pub fn decompress_into(&mut self, input: &[u8], format: Format, out: &mut Vec<u8>) -> Result<usize> {
        self.decompress_member_into(input, format, out)?;
        Ok(out.len())
    }

    /// Decompress the stream at the start of `input` and return how many
    /// input bytes it occupied together with the output.
    ///
    /// Used to walk concatenated gzip members.
    pub fn decompress_member(&mut self, input: &[u8], format: Format) -> Result<(usize, Vec<u8>)> {
        let mut out = self.guess_buffer(input.len())?;
        let consumed = self.decompress_member_into(input, format, &mut out)?;
        Ok((consumed, out))
    }

    /// Like [`decompress_member`](Self::decompress_member), writing into
    /// `out`.  Returns the number of input bytes consumed.
    pub fn decompress_member_into(
        &mut self,
        input: &[u8],
        format: Format,
        out: &mut Vec<u8>,
    ) -> Result<usize> {
        let spec = format.spec();
        out.clear();
        loop {
            let capacity = out.capacity();
            out.resize(capacity, 0);
            match (spec.decompress)(&mut self.inner, input, out) {
                Ok(o) => {
                    out.truncate(o.produced);
                    return Ok(o.consumed);
                }
                Err(DecompressError::InsufficientSpace) => {
                    let target = self.policy.grown_capacity(capacity);
                    if out.try_reserve_exact(target - out.len()).is_err() {
                        out.clear();
                        return Err(Error::AllocationFailed);
                    }
                }
                Err(e) => {
                    out.clear();
                    return Err(e.into());
                }
            }
        }
    }

    /// Decompress data whose uncompressed size is known to be `size` bytes.
    ///
    /// Fails with [`Error::DecompressionFailed`] if the stream decodes to a
    /// different size.
    pub fn decompress_exact(&mut self, input: &[u8], format: Format, size: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(size).map_err(|_| Error::AllocationFailed)?;
        out.resize(size, 0);
        self.inner.decompress_exact_with(input, &mut out, format.spec().decompress)?;
        Ok(out)
    }

    fn guess_buffer(&self, in_len: usize) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.policy.initial_capacity(in_len))
            .map_err(|_| Error::AllocationFailed)?;
        Ok(out)
    }
}

impl fmt::Debug for Decompressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decompressor").field("policy", &self.policy).finish_non_exhaustive()
    }
}
