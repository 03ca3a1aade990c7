//! Command-line interface for the `rdeflate` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|----------------|
//! | [`constants`] | Program name, stdio marker, the `DISPLAY_LEVEL` atomic and display macros. |
//! | [`op_mode`]   | `OpMode` and environment-based defaults for level and worker count. |
//! | [`args`]      | `clap` definition and resolution into `ParsedArgs`. |
//!
//! Typical call sequence: `parse_args` → `set_display_level` → dispatch to the I/O layer.

pub mod args;
pub mod constants;
pub mod op_mode;
