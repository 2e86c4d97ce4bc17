//! Error types for catalogue generation
//!
//! Every failure aborts the run: a partially catalogued tree is never exported.

use crate::export::RenderError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, walking, composing or exporting a catalogue.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// Invalid option or option combination.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The options file or environment overlay could not be loaded.
    #[error("Failed to load options: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// Keyword list or keyword mapping file is unusable.
    #[error("Keyword configuration error in {path}: {reason}")]
    Keyword { path: PathBuf, reason: String },

    /// Filesystem enumeration, stat or removal failed.
    #[error("I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// File vanished before its fixity could be generated.
    #[error("File not found while generating fixity: {0}")]
    FileNotFound(PathBuf),

    /// Reading a file for its fixity failed part way through.
    #[error("Failed to generate fixity for {path}: {source}")]
    Hash { path: PathBuf, source: io::Error },

    /// The record set could not be composed into references.
    #[error("Reference composition failed: {0}")]
    Reference(String),

    /// Inventory or spreadsheet input for physical / sort mode is invalid.
    #[error("Invalid input {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Rendering the catalogue document failed.
    #[error("Failed to export {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    /// The requested format was compiled out of this build.
    #[error("Output format '{format}' is not available; rebuild with the '{feature}' feature")]
    UnsupportedFormat { format: String, feature: String },

    /// The user declined a destructive confirmation.
    #[error("Aborted by user")]
    Aborted,
}

impl CatalogueError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CatalogueError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether a failed write is worth retrying (file locked or busy).
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogueError::Io { source, .. } => matches!(
                source.kind(),
                io::ErrorKind::PermissionDenied | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}
