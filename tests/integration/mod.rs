//! Integration tests for the content file tree model

mod cli_commands;
mod snapshot_isolation;
mod tree_properties;
