//! Output formats, output file naming, and the retrying writer every export goes through.

use super::renderer_for;
use super::table::CatalogueTable;
use crate::config::OutputConfig;
use crate::error::CatalogueError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
    Xml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// Cargo feature gating this format, if any
    pub fn feature(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Xlsx => Some("xlsx"),
            OutputFormat::Xml => Some("xml"),
            OutputFormat::Csv | OutputFormat::Json => None,
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            OutputFormat::Xlsx => cfg!(feature = "xlsx"),
            OutputFormat::Xml => cfg!(feature = "xml"),
            OutputFormat::Csv | OutputFormat::Json => true,
        }
    }

    /// Fail early when the format was compiled out.
    pub fn ensure_available(&self) -> Result<(), CatalogueError> {
        match self.feature() {
            Some(feature) if !self.is_available() => Err(CatalogueError::UnsupportedFormat {
                format: self.extension().to_string(),
                feature: feature.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// `<output_dir>/[<meta>/]<name><suffix>.<extension>`, creating the directories.
pub fn output_file(
    output_dir: &Path,
    name: &str,
    meta_folder: Option<&str>,
    suffix: &str,
    extension: &str,
) -> Result<PathBuf, CatalogueError> {
    let dir = match meta_folder {
        Some(meta) => output_dir.join(meta),
        None => output_dir.to_path_buf(),
    };
    fs::create_dir_all(&dir).map_err(|e| CatalogueError::io(&dir, e))?;
    Ok(dir.join(format!("{}{}.{}", name, suffix, extension)))
}

/// Retry behaviour for locked output files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for WritePolicy {
    fn default() -> Self {
        WritePolicy::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for WritePolicy {
    fn from(config: &OutputConfig) -> Self {
        Self {
            attempts: config.retry_attempts.max(1),
            backoff: Duration::from_secs(config.retry_backoff_secs),
        }
    }
}

/// Write `bytes` to `path`, retrying transient failures after the policy's backoff.
pub fn write_with_retry(path: &Path, bytes: &[u8], policy: WritePolicy) -> Result<(), CatalogueError> {
    write_with(path, bytes, policy, &|path, bytes| fs::write(path, bytes))
}

fn write_with(
    path: &Path,
    bytes: &[u8],
    policy: WritePolicy,
    write: &dyn Fn(&Path, &[u8]) -> io::Result<()>,
) -> Result<(), CatalogueError> {
    let attempts = policy.attempts.max(1);
    let mut attempt = 1;
    loop {
        match write(path, bytes) {
            Ok(()) => return Ok(()),
            Err(e) => {
                let err = CatalogueError::io(path, e);
                if !err.is_transient() || attempt >= attempts {
                    return Err(err);
                }
                warn!(
                    path = %path.display(),
                    attempt,
                    backoff_secs = policy.backoff.as_secs(),
                    "Output file could not be opened; retrying"
                );
                std::thread::sleep(policy.backoff);
                attempt += 1;
            }
        }
    }
}

/// Render a table and write it.
pub fn export_table(
    table: &CatalogueTable,
    format: OutputFormat,
    path: &Path,
    policy: WritePolicy,
) -> Result<(), CatalogueError> {
    let renderer = renderer_for(format)?;
    let bytes = renderer.render(table).map_err(|source| CatalogueError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    write_with_retry(path, &bytes, policy)?;
    info!(path = %path.display(), format = renderer.name(), rows = table.len(), "Saved catalogue");
    Ok(())
}

/// Write one line per entry to a plain-text file.
pub fn export_lines<I, S>(lines: I, path: &Path, policy: WritePolicy) -> Result<(), CatalogueError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut content = String::new();
    for line in lines {
        content.push_str(line.as_ref());
        content.push('\n');
    }
    write_with_retry(path, content.as_bytes(), policy)?;
    info!(path = %path.display(), "Saved log");
    Ok(())
}
