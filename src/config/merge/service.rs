//! MergeService: orchestrates sources, applies precedence, deserializes to CatalogueConfig.

use crate::config::sources::{environment, options_file};
use crate::config::CatalogueConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: serde defaults (lowest) -> options file -> environment (highest).
    ///
    /// With no explicit path the default options file is optional; an explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<CatalogueConfig, ConfigError> {
        let builder = Config::builder();
        let builder = options_file::add_to_builder(builder, explicit)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
