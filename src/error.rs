//! Error types for the file tree model and the tooling around it.

use thiserror::Error;

/// Errors raised by strict tree construction and strict edit replay.
///
/// The plain mutators on [`crate::tree::FileTree`] never return these; they degrade
/// to no-ops instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    #[error("Node not found: {0}")]
    NotFound(String),
}

/// Errors surfaced by configuration, logging and the command-line tool.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
