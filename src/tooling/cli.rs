//! CLI Tooling
//!
//! Command-line surface for catalogue generation. Flags are folded into
//! [`GeneratorOptions`] and the loaded [`CatalogueConfig`]; the run summary is returned
//! as text for the binary to print.

use crate::config::{CatalogueConfig, ConfigLoader};
use crate::error::CatalogueError;
use crate::export::OutputFormat;
use crate::generator::{GeneratorOptions, ReferenceGenerator};
use crate::logging::LoggingConfig;
use crate::reference::{AccessionMode, ReferenceOptions, SuffixTarget, DEFAULT_DELIMITER};
use crate::tooling::format::format_run_summary;
use crate::tree::filter::SortOrder;
use crate::tree::hasher::FixityAlgorithm;
use crate::tree::keywords::{KeywordMode, KeywordOptions};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Auto Reference Generator for digital cataloguing
#[derive(Parser, Debug, Clone)]
#[command(name = "autoref", version)]
#[command(about = "Generate ISAD(G) style archival references for a directory tree")]
pub struct Cli {
    /// The root directory to create references for (default: current directory)
    pub root: Option<PathBuf>,

    /// Prefix leading every generated reference
    #[arg(short = 'p', long)]
    pub prefix: Option<String>,

    /// Suffix appended to generated references
    #[arg(short = 's', long)]
    pub suffix: Option<String>,

    /// Whether the suffix applies to files, folders or both
    #[arg(long, value_enum, default_value_t = SuffixTarget::Files)]
    pub suffix_option: SuffixTarget,

    /// Remove empty directories before cataloguing and log the removals
    #[arg(long)]
    pub rm_empty: bool,

    /// Do not write the list of removed empty directories
    #[arg(long, requires = "rm_empty")]
    pub no_empty_log: bool,

    /// Create an accession listing: a running number over files, directories or both
    #[arg(long = "accession", visible_alias = "acc", value_enum, ignore_case = true)]
    pub accession: Option<AccessionMode>,

    /// Prefix for accession codes (default: the reference prefix)
    #[arg(long = "acc-prefix", visible_alias = "accp")]
    pub acc_prefix: Option<String>,

    /// Output directory for the catalogue (default: the root directory)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Deepest level that receives a reference segment
    #[arg(short = 'l', long)]
    pub level_limit: Option<u32>,

    /// Starting reference number; sub-folders always start at 1
    #[arg(long, visible_alias = "str", default_value_t = 1, allow_negative_numbers = true)]
    pub start_ref: i64,

    /// Delimiter between reference levels (default "/")
    #[arg(long, visible_alias = "dlm")]
    pub delimiter: Option<String>,

    /// Write the catalogue directly into the output directory instead of its meta folder
    #[arg(long)]
    pub disable_meta_dir: bool,

    /// Skip reference generation and produce a plain listing
    #[arg(long, visible_alias = "skp")]
    pub skip: bool,

    /// Include hidden files and folders
    #[arg(long, visible_alias = "hid")]
    pub hidden: bool,

    /// Descend into symbolically linked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Output format
    #[arg(short = 'f', long, visible_alias = "fmt", value_enum, default_value_t = OutputFormat::Xlsx)]
    pub output_format: OutputFormat,

    /// Generate fixities with the given algorithm (default SHA-1)
    #[arg(long, visible_alias = "fx", num_args = 0..=1, default_missing_value = "SHA-1")]
    pub fixity: Option<FixityAlgorithm>,

    /// Replace folder reference numbers with keywords; a list, or a JSON mapping file in from_json mode
    #[arg(long, visible_alias = "key", num_args = 0..)]
    pub keywords: Option<Vec<String>>,

    /// Match keywords case-sensitively
    #[arg(long)]
    pub keywords_case_sensitivity: bool,

    /// How keyword tokens are derived
    #[arg(long, visible_alias = "keym", value_enum, default_value_t = KeywordMode::Initialise)]
    pub keywords_mode: KeywordMode,

    /// Keyworded folders still consume a reference number
    #[arg(long)]
    pub keywords_retain_order: bool,

    /// Letters kept in firstletters mode, or the word cap in initialise mode
    #[arg(long)]
    pub keywords_abbreviation_number: Option<usize>,

    /// Sibling ordering
    #[arg(long, value_enum, default_value_t = SortOrder::FoldersFirst, ignore_case = true)]
    pub sort_by: SortOrder,

    /// Options file overriding column names and output conventions
    #[arg(long)]
    pub options_file: Option<PathBuf>,

    /// Build references from an inventory CSV instead of a directory tree
    #[arg(long)]
    pub physical_mode_input: Option<PathBuf>,

    /// Sort a CSV by its reference column in hierarchy order
    #[arg(long)]
    pub spreadsheet_to_sort: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging (debug level)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the logging flags over the configured logging table.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }

    /// Translate the flags into generator options.
    pub fn generator_options(&self) -> Result<GeneratorOptions, CatalogueError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|e| CatalogueError::io(".", e))?,
        };
        if self.physical_mode_input.is_some() && self.spreadsheet_to_sort.is_some() {
            return Err(CatalogueError::Config(
                "--physical-mode-input and --spreadsheet-to-sort cannot be combined".to_string(),
            ));
        }
        if matches!(&self.delimiter, Some(d) if d.is_empty()) {
            return Err(CatalogueError::Config("delimiter must not be empty".to_string()));
        }

        let accession_prefix = match (&self.acc_prefix, self.accession) {
            (Some(_), None) => {
                warn!("Accession prefix set but accession mode not set; ignoring accession prefix");
                None
            }
            (prefix, _) => prefix.clone(),
        };

        let keywords = self.keywords.as_ref().map(|keywords| KeywordOptions {
            keywords: keywords.clone(),
            mode: self.keywords_mode,
            retain_order: self.keywords_retain_order,
            case_sensitive: self.keywords_case_sensitivity,
            abbreviation: self.keywords_abbreviation_number,
        });

        let mut options = GeneratorOptions::new(root);
        options.output_dir = self.output.clone();
        options.reference = ReferenceOptions {
            prefix: self.prefix.clone(),
            delimiter: self
                .delimiter
                .clone()
                .unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            suffix: self.suffix.clone(),
            suffix_target: self.suffix_option,
            level_limit: self.level_limit,
            start_ref: self.start_ref,
        };
        options.keywords = keywords;
        options.accession = self.accession;
        options.accession_prefix = accession_prefix;
        options.accession_delimiter = self.delimiter.clone();
        options.fixity = self.fixity;
        options.show_hidden = self.hidden;
        options.sort_order = self.sort_by;
        options.follow_symlinks = self.follow_symlinks;
        options.format = self.output_format;
        options.meta_dir = !self.disable_meta_dir;
        options.skip_references = self.skip;
        options.remove_empty = self.rm_empty;
        options.prune_log = !self.no_empty_log;
        options.physical_input = self.physical_mode_input.clone();
        options.sort_input = self.spreadsheet_to_sort.clone();
        Ok(options)
    }
}

/// CLI context holding the loaded configuration
pub struct CliContext {
    config: CatalogueConfig,
}

impl CliContext {
    /// Load configuration from an explicit options file, or the default file and environment.
    pub fn new(options_file: Option<PathBuf>) -> Result<Self, CatalogueError> {
        let config = match &options_file {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: CatalogueConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    /// Execute the command line and return the text to print.
    pub fn execute(&self, cli: &Cli) -> Result<String, CatalogueError> {
        if cli.print_config {
            return ConfigLoader::render(&self.config).map_err(CatalogueError::from);
        }

        let options = cli.generator_options()?;
        match &options.output_dir {
            Some(dir) => info!(output = %dir.display(), "Output path set"),
            None => info!(output = %options.root.display(), "Output path defaulting to root directory"),
        }

        let report = ReferenceGenerator::new(options, self.config.clone()).run()?;
        Ok(format_run_summary(&report))
    }
}
