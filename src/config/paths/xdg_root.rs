//! XDG Base Directory utilities for locating the options file.

use std::path::PathBuf;

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Some(PathBuf::from(xdg_config_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config"))
}

/// Default options file: `$XDG_CONFIG_HOME/autoref/options.toml`
pub fn default_options_file() -> Option<PathBuf> {
    config_home().map(|home| home.join("autoref").join("options.toml"))
}
