//! Options file source. Format is chosen from the file extension (TOML by default).

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Add the options file to the builder.
///
/// An explicit path is required to exist; the default `$XDG_CONFIG_HOME/autoref/options.toml`
/// is skipped silently when absent.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    explicit: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        return Ok(builder.add_source(File::from(path.to_path_buf()).required(true)));
    }

    match xdg::default_options_file() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}
