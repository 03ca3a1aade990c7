//! Streaming checksums used by the zlib and gzip containers.
//!
//! Both functions are pure and chainable: the value returned for one segment
//! is the state passed in for the next one, so that
//! `crc32(crc32(s, a), b) == crc32(s, a ‖ b)` for any split point.
//!
//! | Function            | Container | Identity / seed |
//! |---------------------|-----------|-----------------|
//! | [`crc32()`]         | gzip      | `0`             |
//! | [`adler32()`]       | zlib      | `1`             |

pub mod adler32;
pub mod crc32;

pub use adler32::{adler32, ADLER32_INIT};
pub use crc32::{crc32, CRC32_INIT};
