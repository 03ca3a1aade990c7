//! File-level operations behind the `rdeflate` binary.
//!
//! | Submodule   | Responsibility |
//! |-------------|----------------|
//! | [`prefs`]   | `Prefs`: level, format, output and overwrite policy, worker count |
//! | [`file_io`] | whole-file reads and writes, stdin/stdout, suffix handling |
//! | [`process`] | compress / decompress / test one or many inputs |

pub mod file_io;
pub mod prefs;
pub mod process;

pub use prefs::Prefs;
pub use process::{process_file, process_files, FileOutcome, Worker};
