//! Logging System
//!
//! Structured logging using the `tracing` crate. The effective [`LoggingConfig`] is the
//! `[logging]` options table, overlaid by `AUTOREF_LOG*` environment variables
//! ([`LoggingConfig::with_env_overrides`]) and finally by CLI flags.

use crate::error::CatalogueError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const ENV_LEVEL: &str = "AUTOREF_LOG";
const ENV_FORMAT: &str = "AUTOREF_LOG_FORMAT";
const ENV_OUTPUT: &str = "AUTOREF_LOG_OUTPUT";
const ENV_FILE: &str = "AUTOREF_LOG_FILE";

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Level or full filter directive: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// json or text
    #[serde(default = "default_format")]
    pub format: String,

    /// stdout, stderr, file or file+stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file when output includes a file; defaults to the platform state directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Per-module levels, e.g. `autoref::tree = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: true,
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Overlay the non-empty `AUTOREF_LOG*` environment variables.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup(ENV_LEVEL) {
            self.level = level;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = format;
        }
        if let Some(output) = lookup(ENV_OUTPUT) {
            self.output = output;
        }
        if let Some(file) = lookup(ENV_FILE) {
            self.file = Some(PathBuf::from(file));
        }
        self
    }

    /// Configured log file, or `autoref.log` in the platform state directory.
    pub fn log_file_path(&self) -> Result<PathBuf, CatalogueError> {
        match self.file.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(path.clone()),
            None => default_log_file_path(),
        }
    }
}

fn default_log_file_path() -> Result<PathBuf, CatalogueError> {
    let project_dirs = directories::ProjectDirs::from("", "autoref", "autoref").ok_or_else(|| {
        CatalogueError::Config("Could not determine platform state directory for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir());
    Ok(dir.join("autoref.log"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(CatalogueError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Destination {
    Stdout,
    Stderr,
    File,
    FileAndStderr,
}

impl Destination {
    fn writes_file(&self) -> bool {
        matches!(self, Destination::File | Destination::FileAndStderr)
    }
}

impl FromStr for Destination {
    type Err = CatalogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(Destination::Stdout),
            "stderr" => Ok(Destination::Stderr),
            "file" => Ok(Destination::File),
            "file+stderr" => Ok(Destination::FileAndStderr),
            other => Err(CatalogueError::Config(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file' or 'file+stderr')",
                other
            ))),
        }
    }
}

/// Install the global subscriber for `config`, which should already carry every override.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CatalogueError> {
    let install_error = |e: tracing_subscriber::util::TryInitError| {
        CatalogueError::Config(format!("Failed to install logger: {}", e))
    };
    if !config.enabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(install_error);
    }

    let filter = build_env_filter(config)?;
    let format: LogFormat = config.format.parse()?;
    let destination: Destination = config.output.parse()?;
    let ansi = config.color && !destination.writes_file();
    let writer = build_writer(destination, config)?;

    match format {
        LogFormat::Json => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(ansi)
                    .with_writer(writer),
            )
            .try_init(),
    }
    .map_err(install_error)
}

fn build_writer(destination: Destination, config: &LoggingConfig) -> Result<BoxMakeWriter, CatalogueError> {
    match destination {
        Destination::Stdout => return Ok(BoxMakeWriter::new(std::io::stdout)),
        Destination::Stderr => return Ok(BoxMakeWriter::new(std::io::stderr)),
        Destination::File | Destination::FileAndStderr => {}
    }

    let log_file = config.log_file_path()?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| CatalogueError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            CatalogueError::Config(format!("Failed to open log file {}: {}", log_file.display(), e))
        })?;
    let file = Mutex::new(file);

    Ok(match destination {
        Destination::FileAndStderr => BoxMakeWriter::new(file.and(std::io::stderr)),
        _ => BoxMakeWriter::new(file),
    })
}

fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, CatalogueError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| CatalogueError::Config(format!("Invalid log level '{}': {}", config.level, e)))?;
    for (module, level) in &config.modules {
        let directive = format!("{}={}", module, level)
            .parse()
            .map_err(|e| CatalogueError::Config(format!("Invalid log directive: {}", e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}
