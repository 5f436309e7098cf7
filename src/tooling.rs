//! Tooling & Integration Layer
//!
//! Command-line entry points and text formatting over the file tree model.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
