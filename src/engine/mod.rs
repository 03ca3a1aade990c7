//! Reusable compressor and decompressor handles over the format table.
//!
//! Both own their codec work tables exclusively and are meant for use from
//! one thread at a time; run one instance per thread for parallel work.

pub mod compressor;
pub mod decompressor;

pub use compressor::Compressor;
pub use decompressor::Decompressor;
