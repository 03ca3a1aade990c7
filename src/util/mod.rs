//! Filesystem helpers for the command-line tool.
//!
//! - [`file_list`]  : recursive input expansion (`-r`)
//! - [`file_status`]: type predicates and attribute copying

pub mod file_list;
pub mod file_status;

pub use file_list::create_file_list;
pub use file_status::{copy_file_stat, is_directory, is_reg_file};
