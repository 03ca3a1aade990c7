// config.rs: Compile-time defaults for the engine and the command-line tool.
//
// The decompression buffer constants are tuning knobs, not format rules;
// `BufferPolicy` lets a caller replace them per `Decompressor`.

use crate::deflate::{CLEVEL_DEFAULT, CLEVEL_MAX, CLEVEL_MIN};

// Compression level used when none is given.
// Can be overridden by the RDEFLATE_CLEVEL environment variable,
// or by the -# command-line flag.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = CLEVEL_DEFAULT;
pub const MIN_COMPRESSION_LEVEL: i32 = CLEVEL_MIN;
pub const MAX_COMPRESSION_LEVEL: i32 = CLEVEL_MAX;

// First decompression attempt gets next_power_of_two(input) << 4 bytes.
pub const DECOMPRESS_GUESS_SHIFT: u32 = 4;

// Floor for the first guess and for growth out of an empty buffer.
pub const MIN_DECOMPRESS_CAPACITY: usize = 64;

// Default number of worker threads for the command-line tool (0 = all cores).
// Can be overridden by the RDEFLATE_NBWORKERS environment variable,
// or by the -T# command-line flag.
pub const NB_WORKERS_DEFAULT: usize = 1;
pub const NB_WORKERS_MAX: usize = 200;

pub const ENV_CLEVEL: &str = "RDEFLATE_CLEVEL";
pub const ENV_NBWORKERS: &str = "RDEFLATE_NBWORKERS";

/// Output buffer sizing for [`Decompressor`](crate::Decompressor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPolicy {
    /// The first guess is `next_power_of_two(input_len) << guess_shift`.
    pub guess_shift: u32,
    /// Lower limit for the first guess and for every regrowth.
    pub min_capacity: usize,
}

impl Default for BufferPolicy {
    fn default() -> Self {
        Self { guess_shift: DECOMPRESS_GUESS_SHIFT, min_capacity: MIN_DECOMPRESS_CAPACITY }
    }
}

impl BufferPolicy {
    /// Capacity of the first decompression attempt for `in_len` input bytes.
    /// Falls back to `in_len` when the guess overflows.
    pub fn initial_capacity(&self, in_len: usize) -> usize {
        in_len
            .checked_next_power_of_two()
            .and_then(|p| p.checked_mul(1usize.checked_shl(self.guess_shift)?))
            .unwrap_or(in_len)
            .max(self.min_capacity)
    }

    /// Capacity after an insufficient-space failure at `capacity`: double it,
    /// never below `min_capacity` so an empty buffer still grows.
    pub fn grown_capacity(&self, capacity: usize) -> usize {
        capacity.saturating_mul(2).max(self.min_capacity)
    }
}
