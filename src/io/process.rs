//! File-level compress / decompress / test operations.
//!
//! | Function                   | Role |
//! |----------------------------|------|
//! | [`compress_buffer`]        | one buffer → one container |
//! | [`decompress_buffer`]      | one buffer → all members it holds (gzip may be concatenated) |
//! | [`process_file`]           | read, transform, write and clean up one input path |
//! | [`process_files`]          | run [`process_file`] over many inputs on a `rayon` pool |
//!
//! Each pool worker owns one [`Worker`] (a `Compressor` and a
//! `Decompressor`); instances are never shared between threads.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::constants::PROGRAM_NAME;
use crate::cli::op_mode::OpMode;
use crate::engine::{Compressor, Decompressor};
use crate::format::gzip::{GZIP_ID1, GZIP_ID2};
use crate::format::Format;
use crate::io::file_io::{
    compressed_name, decompressed_name, has_suffix, is_stdio, read_source, write_destination,
    write_stdout,
};
use crate::io::prefs::Prefs;
use crate::util::file_status::{copy_file_stat, is_directory};
use crate::displaylevel;

/// Per-thread codec state.
pub struct Worker {
    compressor: Compressor,
    decompressor: Decompressor,
}

impl Worker {
    pub fn new(level: i32) -> crate::Result<Self> {
        Ok(Self { compressor: Compressor::new(level)?, decompressor: Decompressor::new()? })
    }
}

/// What happened to one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Done,
    /// Not processed (wrong suffix, directory, ...); already reported.
    Skipped,
}

pub fn compress_buffer(c: &mut Compressor, input: &[u8], format: Format) -> Result<Vec<u8>> {
    Ok(c.compress(input, format)?)
}

/// Decompress every member in `input`.
///
/// For gzip, members are decoded back to back while the remaining bytes
/// start with the gzip magic; anything else after the last member is
/// reported and ignored.
pub fn decompress_buffer(d: &mut Decompressor, input: &[u8], format: Format) -> Result<Vec<u8>> {
    let (mut pos, mut out) = d.decompress_member(input, format)?;
    if format == Format::Gzip {
        while input[pos..].starts_with(&[GZIP_ID1, GZIP_ID2]) {
            let (consumed, member) = d
                .decompress_member(&input[pos..], format)
                .with_context(|| format!("member at offset {pos}"))?;
            out.extend_from_slice(&member);
            pos += consumed;
        }
    }
    if pos < input.len() {
        displaylevel!(2, "{}: {} bytes of trailing garbage ignored\n", PROGRAM_NAME, input.len() - pos);
    }
    Ok(out)
}

/// Process one input path according to `mode`.
pub fn process_file(w: &mut Worker, path: &Path, mode: OpMode, prefs: &Prefs) -> Result<FileOutcome> {
    let stdio = is_stdio(path);
    if !stdio && is_directory(path) {
        displaylevel!(1, "{}: {} is a directory -- ignored\n", PROGRAM_NAME, path.display());
        return Ok(FileOutcome::Skipped);
    }

    let dst: Option<PathBuf> = match mode {
        _ if stdio || prefs.to_stdout => None,
        OpMode::Test => None,
        OpMode::Compress => {
            if has_suffix(path, prefs.format) {
                displaylevel!(
                    1,
                    "{}: {} already has .{} suffix -- unchanged\n",
                    PROGRAM_NAME,
                    path.display(),
                    prefs.format.extension()
                );
                return Ok(FileOutcome::Skipped);
            }
            Some(compressed_name(path, prefs.format))
        }
        OpMode::Decompress => match decompressed_name(path, prefs.format) {
            Some(p) => Some(p),
            None => {
                displaylevel!(
                    1,
                    "{}: {}: unknown suffix -- ignored\n",
                    PROGRAM_NAME,
                    path.display()
                );
                return Ok(FileOutcome::Skipped);
            }
        },
    };

    let input = read_source(path).with_context(|| format!("{}", path.display()))?;
    let output = match mode {
        OpMode::Compress => compress_buffer(&mut w.compressor, &input, prefs.format),
        OpMode::Decompress | OpMode::Test => {
            decompress_buffer(&mut w.decompressor, &input, prefs.format)
        }
    }
    .with_context(|| format!("{}", path.display()))?;

    if mode == OpMode::Test {
        displaylevel!(3, "{}: OK\n", path.display());
        return Ok(FileOutcome::Done);
    }

    match &dst {
        None => write_stdout(&output).context("writing to stdout")?,
        Some(dst) => {
            write_destination(dst, &output, prefs.overwrite)
                .with_context(|| format!("{}", dst.display()))?;
            if let Err(e) = copy_file_stat(path, dst) {
                displaylevel!(2, "{}: cannot preserve attributes: {}\n", dst.display(), e);
            }
        }
    }

    displaylevel!(3, "{}: {}\n", path.display(), summary(mode, input.len(), output.len(), dst.as_deref()));

    if let Some(dst) = &dst {
        if !prefs.keep {
            std::fs::remove_file(path)
                .with_context(|| format!("removing {} after writing {}", path.display(), dst.display()))?;
        }
    }
    Ok(FileOutcome::Done)
}

fn summary(mode: OpMode, in_len: usize, out_len: usize, dst: Option<&Path>) -> String {
    let (raw, packed) = if mode == OpMode::Compress { (in_len, out_len) } else { (out_len, in_len) };
    let saved = if raw == 0 { 0.0 } else { 100.0 - packed as f64 * 100.0 / raw as f64 };
    match dst {
        Some(d) => format!("{saved:5.1}% -- replaced with {}", d.display()),
        None => format!("{saved:5.1}%"),
    }
}

/// Process every input and return the number that failed or were skipped.
///
/// With more than one worker and output going to files, inputs are spread
/// over a `rayon` pool with one [`Worker`] per thread; writes to stdout stay
/// sequential so outputs are not interleaved.
pub fn process_files(inputs: &[PathBuf], mode: OpMode, prefs: &Prefs) -> Result<usize> {
    let sequential = prefs.to_stdout || inputs.len() < 2 || prefs.effective_workers() == 1;

    let run_one = |w: &mut crate::Result<Worker>, path: &PathBuf| -> bool {
        let result = match w {
            Ok(w) => process_file(w, path, mode, prefs),
            Err(e) => Err(anyhow::Error::new(*e)),
        };
        match result {
            Ok(FileOutcome::Done) => true,
            Ok(FileOutcome::Skipped) => false,
            Err(e) => {
                displaylevel!(1, "{}: {:#}\n", PROGRAM_NAME, e);
                false
            }
        }
    };

    let ok = if sequential {
        let mut w = Worker::new(prefs.level);
        inputs.iter().filter(|p| run_one(&mut w, *p)).count()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(prefs.effective_workers())
            .build()
            .context("creating worker pool")?;
        pool.install(|| {
            inputs
                .par_iter()
                .map_init(|| Worker::new(prefs.level), |w, p| run_one(w, p))
                .filter(|&ok| ok)
                .count()
        })
    };
    Ok(inputs.len() - ok)
}
