// rdeflate: DEFLATE, zlib and gzip compression engine

pub mod api;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod deflate;
pub mod engine;
pub mod error;
pub mod format;
pub mod io;
pub mod util;

// ── Version constants ─────────────────────────────────────────────────────────
pub const RDEFLATE_VERSION_MAJOR: u32 = 0;
pub const RDEFLATE_VERSION_MINOR: u32 = 4;
pub const RDEFLATE_VERSION_RELEASE: u32 = 0;
pub const RDEFLATE_VERSION_NUMBER: u32 =
    RDEFLATE_VERSION_MAJOR * 100 * 100 + RDEFLATE_VERSION_MINOR * 100 + RDEFLATE_VERSION_RELEASE;
pub const RDEFLATE_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub fn version_number() -> u32 {
    RDEFLATE_VERSION_NUMBER
}

pub fn version_string() -> &'static str {
    RDEFLATE_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use checksum::{adler32, crc32};
pub use config::BufferPolicy;
pub use engine::{Compressor, Decompressor};
pub use error::{Error, Result};
pub use format::{Format, DEFLATE, GZIP, ZLIB};
