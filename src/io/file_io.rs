//! Whole-file I/O for the command-line tool.
//!
//! - [`read_source`]: reads a file, or stdin for [`STDIO_MARK`], into memory.
//! - [`write_destination`]: writes a buffer to a new file, enforcing the
//!   overwrite policy.
//! - [`compressed_name`] / [`decompressed_name`]: suffix handling per format.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use crate::cli::constants::STDIO_MARK;
use crate::displaylevel;
use crate::format::Format;

#[inline]
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO_MARK
}

/// Read all of `path` (stdin for `-`).
pub fn read_source(path: &Path) -> io::Result<Vec<u8>> {
    if is_stdio(path) {
        displaylevel!(4, "Using stdin for input\n");
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    if path.is_dir() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "is a directory"));
    }
    fs::read(path)
}

/// Write `data` to stdout.
pub fn write_stdout(data: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(data)?;
    out.flush()
}

/// Create `path` and write `data` to it.
///
/// An existing file is only replaced when `overwrite` is set; otherwise the
/// call fails with [`io::ErrorKind::AlreadyExists`] and the file is left
/// alone.
pub fn write_destination(path: &Path, data: &[u8], overwrite: bool) -> io::Result<()> {
    let mut opts = OpenOptions::new();
    opts.write(true);
    if overwrite {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    let mut f = opts.open(path)?;
    f.write_all(data)?;
    f.sync_all()
}

/// `path` with the format's suffix appended (`a.txt` → `a.txt.gz`).
pub fn compressed_name(path: &Path, format: Format) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// `path` with the format's suffix removed, or `None` when it does not carry
/// that suffix (or carries nothing else).
pub fn decompressed_name(path: &Path, format: Format) -> Option<PathBuf> {
    let ext = path.extension()?;
    if !ext.eq_ignore_ascii_case(format.extension()) {
        return None;
    }
    let stem = path.file_stem()?;
    Some(path.with_file_name(stem))
}

/// `true` when `path` already ends in the format's suffix.
pub fn has_suffix(path: &Path, format: Format) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case(format.extension()))
}
