//! Binary entry point for the `rdeflate` command-line tool.
//!
//! 1. [`parse_args`] turns the command line into a [`ParsedArgs`].
//! 2. [`run`] checks the terminal situation, expands `-r` directories and
//!    hands the inputs to [`process_files`].
//!
//! Exit status is 0 when every input was processed and 1 otherwise.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use rdeflate::cli::args::{parse_args, ParsedArgs};
use rdeflate::cli::constants::{display_level, set_display_level, PROGRAM_NAME, STDIO_MARK};
use rdeflate::cli::op_mode::OpMode;
use rdeflate::io::process_files;
use rdeflate::{display, displaylevel};

fn run(args: ParsedArgs) -> anyhow::Result<usize> {
    let ParsedArgs { op_mode, prefs, display_level: level, recursive, inputs } = args;
    set_display_level(level);

    displaylevel!(
        4,
        "*** {} v{} {}-bit, {} worker(s) ***\n",
        PROGRAM_NAME,
        rdeflate::version_string(),
        std::mem::size_of::<usize>() * 8,
        prefs.effective_workers()
    );

    let mut inputs = if inputs.is_empty() { vec![PathBuf::from(STDIO_MARK)] } else { inputs };
    if recursive {
        inputs = rdeflate::util::create_file_list(&inputs[..])?;
        for (u, p) in inputs.iter().enumerate() {
            displaylevel!(4, "{} {}\n", u, p.display());
        }
    }

    let reads_stdin = inputs.iter().any(|p| p.as_os_str() == STDIO_MARK);
    if reads_stdin && std::io::stdin().is_terminal() {
        anyhow::bail!("refusing to read from a console");
    }

    let writes_stdout = op_mode != OpMode::Test && (prefs.to_stdout || reads_stdin);
    if writes_stdout
        && op_mode == OpMode::Compress
        && std::io::stdout().is_terminal()
        && !prefs.overwrite
    {
        anyhow::bail!("refusing to write compressed data to a console without -f");
    }
    if (writes_stdout || inputs.len() > 1) && display_level() == 2 {
        set_display_level(1);
    }

    process_files(&inputs, op_mode, &prefs)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args_os()) {
        Ok(a) => a,
        Err(e) => {
            // --help and --version land here too, with a success exit code.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    match run(args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            displaylevel!(3, "{}: {} file(s) not processed\n", PROGRAM_NAME, failed);
            ExitCode::FAILURE
        }
        Err(e) => {
            display!("{}: {:#}\n", PROGRAM_NAME, e);
            ExitCode::FAILURE
        }
    }
}
