//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::CatalogueConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default options file (if present) and environment.
    pub fn load() -> Result<CatalogueConfig, ConfigError> {
        MergeService::load(None)
    }

    /// Load configuration from a specific options file, which must exist.
    pub fn load_from_file(path: &Path) -> Result<CatalogueConfig, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Render a configuration as TOML.
    pub fn render(config: &CatalogueConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::Message(e.to_string()))
    }

    /// Create default configuration.
    pub fn default() -> CatalogueConfig {
        CatalogueConfig::default()
    }
}
