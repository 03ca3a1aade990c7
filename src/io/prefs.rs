// prefs.rs: options shared by every file operation of the command-line tool.

use crate::config::{DEFAULT_COMPRESSION_LEVEL, NB_WORKERS_DEFAULT};
use crate::format::Format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    pub level: i32,
    pub format: Format,
    /// Send all output to stdout.
    pub to_stdout: bool,
    /// Keep input files after a successful operation.
    pub keep: bool,
    /// Replace existing output files.
    pub overwrite: bool,
    /// 0 = one worker per core.
    pub nb_workers: usize,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
            format: Format::Gzip,
            to_stdout: false,
            keep: false,
            overwrite: false,
            nb_workers: NB_WORKERS_DEFAULT,
        }
    }
}

impl Prefs {
    /// Worker count with `0` resolved to the number of cores.
    pub fn effective_workers(&self) -> usize {
        if self.nb_workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.nb_workers
        }
    }
}
