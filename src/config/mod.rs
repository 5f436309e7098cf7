//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional file,
//! then `INSIGHT__*` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::PathPolicy;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Tree construction settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// How malformed baseline paths and duplicate ids are handled
    #[serde(default)]
    pub path_policy: PathPolicy,
}

/// Editor session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of previous snapshots kept for undo
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    50
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}
