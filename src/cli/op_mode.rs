//! Operation mode and environment-provided defaults.
//!
//! - [`OpMode`]: compress, decompress or test.
//! - [`init_c_level`] / [`init_nb_workers`]: defaults read from
//!   `RDEFLATE_CLEVEL` and `RDEFLATE_NBWORKERS`, each with a `*_from`
//!   variant that takes the raw value so the parsing is testable without
//!   touching the process environment.

use crate::config::{
    DEFAULT_COMPRESSION_LEVEL, ENV_CLEVEL, ENV_NBWORKERS, MAX_COMPRESSION_LEVEL,
    MIN_COMPRESSION_LEVEL, NB_WORKERS_DEFAULT, NB_WORKERS_MAX,
};
use crate::displaylevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    Compress,
    Decompress,
    /// Decompress and verify, writing nothing.
    Test,
}

pub fn init_c_level() -> i32 {
    init_c_level_from(std::env::var(ENV_CLEVEL).ok().as_deref())
}

/// Parse an optional `RDEFLATE_CLEVEL` value; anything that is not a level
/// in `1..=12` is ignored with a warning.
pub fn init_c_level_from(env_val: Option<&str>) -> i32 {
    if let Some(env) = env_val {
        match env.trim().parse::<i32>() {
            Ok(level) if (MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&level) => {
                return level
            }
            _ => displaylevel!(
                2,
                "Ignore environment variable setting {}={}: not a valid compression level\n",
                ENV_CLEVEL,
                env
            ),
        }
    }
    DEFAULT_COMPRESSION_LEVEL
}

pub fn init_nb_workers() -> usize {
    init_nb_workers_from(std::env::var(ENV_NBWORKERS).ok().as_deref())
}

/// Parse an optional `RDEFLATE_NBWORKERS` value, capped at
/// [`NB_WORKERS_MAX`].
pub fn init_nb_workers_from(env_val: Option<&str>) -> usize {
    if let Some(env) = env_val {
        match env.trim().parse::<usize>() {
            Ok(n) => return n.min(NB_WORKERS_MAX),
            Err(_) => displaylevel!(
                2,
                "Ignore environment variable setting {}={}: not a valid unsigned value\n",
                ENV_NBWORKERS,
                env
            ),
        }
    }
    NB_WORKERS_DEFAULT
}
