//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::InsightConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults overlaid with the environment.
    pub fn load() -> Result<InsightConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration from a specific file, overlaid with the environment.
    pub fn load_from_file(path: &Path) -> Result<InsightConfig, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Create default configuration.
    pub fn default() -> InsightConfig {
        InsightConfig::default()
    }
}
