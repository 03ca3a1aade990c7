// e2e/cli_integration.rs: the `rdeflate` binary as a black box.
//
// Covers file and pipe modes, suffix handling, --keep/--force, recursion,
// integrity testing and exit codes.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rdeflate"))
}

fn content() -> Vec<u8> {
    b"Hello, rdeflate!\n".repeat(300)
}

fn make_input(dir: &Path, name: &str) -> PathBuf {
    let p = dir.join(name);
    fs::write(&p, content()).unwrap();
    p
}

/// Run with `stdin` piped in and return the captured output.
fn run_piped(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn rdeflate");
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn run(args: &[&str]) -> Output {
    bin().args(args).stdin(Stdio::null()).output().expect("failed to run rdeflate")
}

// ── 1. File round trip ───────────────────────────────────────────────────────

#[test]
fn compress_then_decompress_file() {
    let dir = TempDir::new().unwrap();
    let input = make_input(dir.path(), "input.txt");
    let packed = dir.path().join("input.txt.gz");

    let out = run(&[input.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(packed.exists());
    assert!(!input.exists(), "input removed after compression");

    let out = run(&["-d", packed.to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(fs::read(&input).unwrap(), content());
    assert!(!packed.exists());
}

// ── 2. Pipes ─────────────────────────────────────────────────────────────────

#[test]
fn stdin_to_stdout_round_trip() {
    let packed = run_piped(&["-9"], &content());
    assert!(packed.status.success());
    assert_eq!(&packed.stdout[..3], &[0x1F, 0x8B, 0x08]);
    assert_eq!(packed.stdout[8], 2, "XFL for a slow level");

    let unpacked = run_piped(&["-d"], &packed.stdout);
    assert!(unpacked.status.success());
    assert_eq!(unpacked.stdout, content());
}

#[test]
fn concatenated_members_from_stdin() {
    let a = run_piped(&[], b"first half, ").stdout;
    let b = run_piped(&["-1"], b"second half").stdout;
    let both = [a, b].concat();
    let out = run_piped(&["-d", "-c"], &both);
    assert!(out.status.success());
    assert_eq!(out.stdout, b"first half, second half");
}

#[test]
fn zlib_and_raw_formats() {
    for (format, first) in [("zlib", 0x78u8), ("deflate", 0x01)] {
        let packed = run_piped(&["--format", format], b"short");
        assert!(packed.status.success());
        assert_eq!(packed.stdout[0], first, "{format}");
        let unpacked = run_piped(&["-d", "--format", format], &packed.stdout);
        assert_eq!(unpacked.stdout, b"short", "{format}");
    }
}

// ── 3. Options ───────────────────────────────────────────────────────────────

#[test]
fn keep_and_stdout_leave_input_alone() {
    let dir = TempDir::new().unwrap();
    let input = make_input(dir.path(), "k.txt");

    assert!(run(&["-k", input.to_str().unwrap()]).status.success());
    assert!(input.exists());
    assert!(dir.path().join("k.txt.gz").exists());

    let out = run(&["-c", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(input.exists());
    assert_eq!(&out.stdout[..2], &[0x1F, 0x8B]);
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    let input = make_input(dir.path(), "f.txt");
    let packed = dir.path().join("f.txt.gz");
    fs::write(&packed, b"occupied").unwrap();

    let out = run(&["-k", input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&packed).unwrap(), b"occupied");

    let out = run(&["-k", "-f", input.to_str().unwrap()]);
    assert!(out.status.success());
    assert_ne!(fs::read(&packed).unwrap(), b"occupied");
}

#[test]
fn recursive_compression_with_workers() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    let files = [
        make_input(dir.path(), "a.txt"),
        make_input(dir.path(), "b.txt"),
        make_input(&dir.path().join("nested"), "c.txt"),
    ];

    let out = run(&["-r", "-T", "3", dir.path().to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for f in &files {
        assert!(!f.exists());
        let mut gz = f.clone().into_os_string();
        gz.push(".gz");
        assert!(Path::new(&gz).exists());
    }

    let out = run(&["-d", "-r", dir.path().to_str().unwrap()]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    for f in &files {
        assert_eq!(fs::read(f).unwrap(), content());
    }
}

// ── 4. Integrity test and failures ───────────────────────────────────────────

#[test]
fn test_mode_detects_corruption() {
    let dir = TempDir::new().unwrap();
    let input = make_input(dir.path(), "t.txt");
    assert!(run(&["-k", input.to_str().unwrap()]).status.success());
    let packed = dir.path().join("t.txt.gz");

    let out = run(&["-t", packed.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let mut bytes = fs::read(&packed).unwrap();
    let n = bytes.len();
    bytes[n - 1] ^= 0x01;
    fs::write(&packed, bytes).unwrap();
    let out = run(&["-t", packed.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn unknown_suffix_is_skipped_with_failure_status() {
    let dir = TempDir::new().unwrap();
    let input = make_input(dir.path(), "plain.txt");
    let out = run(&["-d", input.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(&input).unwrap(), content());
}

#[test]
fn missing_file_fails() {
    let out = run(&["/nonexistent/__rdeflate_missing__.txt"]);
    assert_eq!(out.status.code(), Some(1));
}

// ── 5. Informational flags ───────────────────────────────────────────────────

#[test]
fn version_and_help() {
    let out = run(&["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));

    let out = run(&["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--decompress"));
}

#[test]
fn bad_option_is_a_usage_error() {
    let out = run(&["--no-such-flag"]);
    assert_eq!(out.status.code(), Some(1));
    let out = run(&["-13"]);
    assert_eq!(out.status.code(), Some(1));
}
