//! Command-line parsing.
//!
//! Options are declared with `clap`'s derive API on [`Cli`].  gzip-style
//! numeric level flags (`-1` … `-12`) are not expressible as clap short
//! options, so [`normalize_level_args`] rewrites them to `--level=N` before
//! parsing.  [`parse_args`] then folds the parsed flags and the environment
//! defaults into a [`ParsedArgs`].

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::cli::constants::{DISPLAY_LEVEL_DEFAULT, DISPLAY_LEVEL_MAX};
use crate::cli::op_mode::{init_c_level, init_nb_workers, OpMode};
use crate::config::{MAX_COMPRESSION_LEVEL, MIN_COMPRESSION_LEVEL, NB_WORKERS_MAX};
use crate::format::Format;
use crate::io::prefs::Prefs;

/// Container selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Raw DEFLATE stream, `.deflate`
    Deflate,
    /// zlib stream, `.zz`
    Zlib,
    /// gzip file, `.gz`
    Gzip,
}

impl From<FormatArg> for Format {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Deflate => Format::RawDeflate,
            FormatArg::Zlib => Format::Zlib,
            FormatArg::Gzip => Format::Gzip,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "rdeflate",
    version,
    about = "Compress or decompress files in gzip, zlib or raw DEFLATE format",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\
                  Compression levels: -1 (fastest) to -12 (slowest), default -6."
)]
pub struct Cli {
    /// Decompress
    #[arg(short = 'd', long = "decompress", visible_alias = "uncompress")]
    pub decompress: bool,

    /// Test compressed file integrity
    #[arg(short = 't', long = "test")]
    pub test: bool,

    /// Write to standard output, keep input files
    #[arg(short = 'c', long = "stdout", visible_alias = "to-stdout")]
    pub stdout: bool,

    /// Keep (don't delete) input files
    #[arg(short = 'k', long = "keep")]
    pub keep: bool,

    /// Overwrite existing output files
    #[arg(short = 'f', long = "force")]
    pub force: bool,

    /// Operate recursively on directories
    #[arg(short = 'r', long = "recursive")]
    pub recursive: bool,

    /// Suppress warnings; repeat to suppress errors too
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Verbose mode; repeat for more output
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Compression level (same as -N)
    #[arg(
        long = "level",
        value_name = "N",
        value_parser = clap::value_parser!(i32).range(MIN_COMPRESSION_LEVEL as i64..=MAX_COMPRESSION_LEVEL as i64)
    )]
    pub level: Option<i32>,

    /// Container format
    #[arg(long = "format", value_enum, default_value_t = FormatArg::Gzip)]
    pub format: FormatArg,

    /// Number of worker threads (0 = one per core)
    #[arg(short = 'T', long = "threads", value_name = "#")]
    pub threads: Option<usize>,

    /// Files to process
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Fully resolved command line.
#[derive(Debug)]
pub struct ParsedArgs {
    pub op_mode: OpMode,
    pub prefs: Prefs,
    pub display_level: u32,
    pub recursive: bool,
    /// Input paths; empty means stdin.
    pub inputs: Vec<PathBuf>,
}

/// Rewrite `-N` level flags to `--level=N`.  Arguments after `--` are left
/// untouched.
pub fn normalize_level_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut after_separator = false;
    args.into_iter()
        .map(|arg| {
            if after_separator {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    after_separator = true;
                    arg
                }
                Some(s) if is_level_flag(s) => OsString::from(format!("--level={}", &s[1..])),
                _ => arg,
            }
        })
        .collect()
}

fn is_level_flag(s: &str) -> bool {
    s.len() > 1 && s.starts_with('-') && s[1..].bytes().all(|b| b.is_ascii_digit())
}

/// Parse `args` (program name first) into a [`ParsedArgs`].
pub fn parse_args<I>(args: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = Cli::try_parse_from(normalize_level_args(args))?;
    Ok(resolve(cli))
}

fn resolve(cli: Cli) -> ParsedArgs {
    let op_mode = if cli.test {
        OpMode::Test
    } else if cli.decompress {
        OpMode::Decompress
    } else {
        OpMode::Compress
    };

    let display_level = (DISPLAY_LEVEL_DEFAULT + cli.verbose as u32)
        .saturating_sub(cli.quiet as u32)
        .min(DISPLAY_LEVEL_MAX);

    let prefs = Prefs {
        level: cli.level.unwrap_or_else(init_c_level),
        format: cli.format.into(),
        to_stdout: cli.stdout,
        keep: cli.keep || cli.stdout,
        overwrite: cli.force,
        nb_workers: cli.threads.map_or_else(init_nb_workers, |n| n.min(NB_WORKERS_MAX)),
    };

    ParsedArgs { op_mode, prefs, display_level, recursive: cli.recursive, inputs: cli.files }
}
