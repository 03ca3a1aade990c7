//! Input list expansion for `-r`.
//!
//! [`create_file_list`] turns a mixed list of files and directories into a
//! flat list of regular files, walking directories with [`walkdir`].
//! Symlinks found inside a walked directory are neither followed nor
//! returned; a symlink named directly on the command line is kept.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::cli::constants::STDIO_MARK;

/// Expand `inputs` into regular files.
///
/// Non-directory inputs (including `-`) are passed through unchanged and in
/// order. Entries of a directory are emitted in file-name order so repeated
/// runs visit files identically. The first unreadable entry aborts the walk.
pub fn create_file_list<P: AsRef<Path>>(inputs: &[P]) -> io::Result<Vec<PathBuf>> {
    let mut result = Vec::new();
    for input in inputs {
        let input = input.as_ref();
        if input.as_os_str() == STDIO_MARK || !input.is_dir() {
            result.push(input.to_path_buf());
            continue;
        }
        for entry in WalkDir::new(input).sort_by_file_name() {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_file() {
                result.push(entry.into_path());
            }
        }
    }
    Ok(result)
}

fn walk_error(e: walkdir::Error) -> io::Error {
    let msg = match e.path() {
        Some(p) => format!("{}: {e}", p.display()),
        None => e.to_string(),
    };
    let kind = e.io_error().map_or(io::ErrorKind::Other, io::Error::kind);
    io::Error::new(kind, msg)
}
