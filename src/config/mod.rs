//! Catalogue configuration
//!
//! Column names, output conventions and physical-mode labels are loaded once into an
//! immutable [`CatalogueConfig`] and handed by reference to every component that needs them.

pub mod facade;
pub mod fields;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use fields::FieldNames;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Root configuration value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default)]
    pub fields: FieldNames,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub physical: PhysicalConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_output_suffix() -> String {
    "_AutoRef".to_string()
}

fn default_meta_folder() -> String {
    "meta".to_string()
}

fn default_empty_suffix() -> String {
    "_EmptyDirectoriesRemoved".to_string()
}

fn default_accession_delimiter() -> String {
    "-".to_string()
}

fn default_reference_padding() -> usize {
    5
}

fn default_reserved_names() -> Vec<String> {
    vec!["auto_ref.exe".to_string(), "auto_ref.bin".to_string()]
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_backoff_secs() -> u64 {
    10
}

/// Output file naming and write behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to the output file stem, e.g. `root_AutoRef.xlsx`
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Folder created under the output directory to hold the catalogue; never catalogued itself
    #[serde(default = "default_meta_folder")]
    pub meta_folder: String,

    /// Suffix of the plain-text log of removed empty directories
    #[serde(default = "default_empty_suffix")]
    pub empty_suffix: String,

    /// Delimiter between accession prefix and number when no explicit delimiter is given
    #[serde(default = "default_accession_delimiter")]
    pub accession_delimiter: String,

    /// Zero padding applied to numeric segments when sorting by reference
    #[serde(default = "default_reference_padding")]
    pub reference_padding: usize,

    /// Entry names that are never catalogued (the tool's own executables)
    #[serde(default = "default_reserved_names")]
    pub reserved_names: Vec<String>,

    /// Attempts made when the output file is locked
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Seconds to wait between locked-file retries
    #[serde(default = "default_retry_backoff_secs")]
    pub retry_backoff_secs: u64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            meta_folder: default_meta_folder(),
            empty_suffix: default_empty_suffix(),
            accession_delimiter: default_accession_delimiter(),
            reference_padding: default_reference_padding(),
            reserved_names: default_reserved_names(),
            retry_attempts: default_retry_attempts(),
            retry_backoff_secs: default_retry_backoff_secs(),
        }
    }
}

fn default_level_field() -> String {
    "Level".to_string()
}

fn default_level_separators() -> String {
    "collection, section, series, sub-series, file".to_string()
}

fn default_items() -> String {
    "item".to_string()
}

fn default_title_field() -> String {
    "Title".to_string()
}

/// Labels used when building references from an inventory spreadsheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalConfig {
    /// Inventory column naming each row's level
    #[serde(default = "default_level_field")]
    pub level_field: String,

    /// Comma separated hierarchy of level labels, outermost first
    #[serde(default = "default_level_separators")]
    pub level_separators: String,

    /// Comma separated labels treated as leaf items
    #[serde(default = "default_items")]
    pub items: String,

    /// Inventory column holding the title used as a fallback prefix
    #[serde(default = "default_title_field")]
    pub title_field: String,
}

impl PhysicalConfig {
    pub fn separators(&self) -> Vec<String> {
        split_labels(&self.level_separators)
    }

    pub fn item_labels(&self) -> Vec<String> {
        split_labels(&self.items)
    }
}

fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|label| label.trim().to_lowercase())
        .filter(|label| !label.is_empty())
        .collect()
}

impl Default for PhysicalConfig {
    fn default() -> Self {
        Self {
            level_field: default_level_field(),
            level_separators: default_level_separators(),
            items: default_items(),
            title_field: default_title_field(),
        }
    }
}
