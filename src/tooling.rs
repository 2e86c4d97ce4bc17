//! Tooling & Integration Layer
//!
//! Command-line parsing and human-readable output for the `autoref` binary.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext};
pub use format::{format_run_summary, format_section_heading};
