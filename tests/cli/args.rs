// Integration tests for command-line parsing (`cli::args`).

use std::ffi::OsString;
use std::path::PathBuf;

use rdeflate::cli::args::{parse_args, ParsedArgs};
use rdeflate::cli::op_mode::OpMode;
use rdeflate::Format;

fn parse(args: &[&str]) -> Result<ParsedArgs, clap::Error> {
    parse_args(std::iter::once("rdeflate").chain(args.iter().copied()).map(OsString::from))
}

#[test]
fn no_arguments_means_stdin() {
    let p = parse(&[]).unwrap();
    assert_eq!(p.op_mode, OpMode::Compress);
    assert!(p.inputs.is_empty());
    assert_eq!(p.prefs.format, Format::Gzip);
    assert!(!p.recursive);
}

#[test]
fn combined_short_flags() {
    let p = parse(&["-dkf", "a.gz", "b.gz"]).unwrap();
    assert_eq!(p.op_mode, OpMode::Decompress);
    assert!(p.prefs.keep && p.prefs.overwrite && !p.prefs.to_stdout);
    assert_eq!(p.inputs, [PathBuf::from("a.gz"), PathBuf::from("b.gz")]);
}

#[test]
fn test_mode_wins_over_decompress() {
    assert_eq!(parse(&["-d", "-t", "x.gz"]).unwrap().op_mode, OpMode::Test);
}

#[test]
fn level_forms() {
    assert_eq!(parse(&["-1"]).unwrap().prefs.level, 1);
    assert_eq!(parse(&["--level", "11"]).unwrap().prefs.level, 11);
    assert_eq!(parse(&["--level=4"]).unwrap().prefs.level, 4);
    assert!(parse(&["--level", "0"]).is_err());
    assert!(parse(&["-99"]).is_err());
}

#[test]
fn format_names() {
    assert_eq!(parse(&["--format", "deflate"]).unwrap().prefs.format, Format::RawDeflate);
    assert_eq!(parse(&["--format=zlib"]).unwrap().prefs.format, Format::Zlib);
    assert!(parse(&["--format", "bzip2"]).is_err());
}

#[test]
fn file_named_like_a_level_after_separator() {
    let p = parse(&["--", "-5"]).unwrap();
    assert_eq!(p.inputs, [PathBuf::from("-5")]);
}

#[test]
fn recursive_and_threads() {
    let p = parse(&["-r", "-T", "0", "dir"]).unwrap();
    assert!(p.recursive);
    assert_eq!(p.prefs.nb_workers, 0);
    let p = parse(&["--threads=1000"]).unwrap();
    assert_eq!(p.prefs.nb_workers, 200);
}

#[test]
fn help_and_version_are_not_usage_errors() {
    let err = parse(&["--help"]).unwrap_err();
    assert!(!err.use_stderr());
    let err = parse(&["--version"]).unwrap_err();
    assert!(!err.use_stderr());
    let err = parse(&["--bogus"]).unwrap_err();
    assert!(err.use_stderr());
}
