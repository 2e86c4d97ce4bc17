//! Reference Generator
//!
//! Orchestrates one run: optional pruning, enumeration, composition, accession numbering
//! and export. Physical and sort modes take an inventory table instead of a walk.

use crate::config::CatalogueConfig;
use crate::error::CatalogueError;
use crate::export::{
    export_lines, export_table, output_file, CatalogueTable, OutputFormat, TableLayout, WritePolicy,
};
use crate::prune::{Confirmation, EmptyDirPruner, PruneReport, TerminalConfirmation};
use crate::reference::physical::assign_physical_references;
use crate::reference::sort::sort_by_reference;
use crate::reference::{assign_accessions, compose, AccessionCounter, AccessionMode, ReferenceOptions};
use crate::store::RecordSet;
use crate::tree::filter::SortOrder;
use crate::tree::hasher::FixityAlgorithm;
use crate::tree::keywords::{KeywordOptions, KeywordResolver};
use crate::tree::walker::{TreeWalker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;

const TEXT_EXTENSION: &str = "txt";

/// Everything a run needs besides the loaded configuration.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub root: PathBuf,
    /// Defaults to the root directory
    pub output_dir: Option<PathBuf>,
    pub reference: ReferenceOptions,
    pub keywords: Option<KeywordOptions>,
    pub accession: Option<AccessionMode>,
    /// Defaults to the reference prefix
    pub accession_prefix: Option<String>,
    /// Explicit delimiter; when unset accession codes use the configured accession delimiter
    pub accession_delimiter: Option<String>,
    pub fixity: Option<FixityAlgorithm>,
    pub show_hidden: bool,
    pub sort_order: SortOrder,
    pub follow_symlinks: bool,
    pub format: OutputFormat,
    /// Place the catalogue in the meta folder under the output directory
    pub meta_dir: bool,
    /// List entries without generating references
    pub skip_references: bool,
    pub remove_empty: bool,
    /// Write the list of removed directories next to the catalogue
    pub prune_log: bool,
    pub physical_input: Option<PathBuf>,
    pub sort_input: Option<PathBuf>,
}

impl GeneratorOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: None,
            reference: ReferenceOptions::default(),
            keywords: None,
            accession: None,
            accession_prefix: None,
            accession_delimiter: None,
            fixity: None,
            show_hidden: false,
            sort_order: SortOrder::default(),
            follow_symlinks: false,
            format: OutputFormat::default(),
            meta_dir: true,
            skip_references: false,
            remove_empty: false,
            prune_log: true,
            physical_input: None,
            sort_input: None,
        }
    }
}

/// Which kind of run produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Catalogue,
    Physical,
    Sort,
}

impl RunMode {
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Catalogue => "catalogue",
            RunMode::Physical => "physical",
            RunMode::Sort => "sort",
        }
    }
}

/// The enumerated, referenced record set of a catalogue run.
#[derive(Debug, Clone)]
pub struct Catalogue {
    pub root: PathBuf,
    pub records: RecordSet,
    pub layout: TableLayout,
    pub pruned: Option<PruneReport>,
}

impl Catalogue {
    pub fn table(&self, config: &CatalogueConfig) -> CatalogueTable {
        CatalogueTable::from_records(&self.records, &config.fields, self.layout)
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mode: RunMode,
    pub source: PathBuf,
    pub rows: usize,
    pub directories: usize,
    pub files: usize,
    pub pruned: usize,
    pub output_file: PathBuf,
    pub elapsed: Duration,
}

pub struct ReferenceGenerator {
    options: GeneratorOptions,
    config: CatalogueConfig,
    confirmation: Box<dyn Confirmation>,
}

impl ReferenceGenerator {
    pub fn new(options: GeneratorOptions, config: CatalogueConfig) -> Self {
        Self {
            options,
            config,
            confirmation: Box::new(TerminalConfirmation),
        }
    }

    pub fn with_confirmation(mut self, confirmation: Box<dyn Confirmation>) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn config(&self) -> &CatalogueConfig {
        &self.config
    }

    /// Run the selected mode and write its output.
    pub fn run(&self) -> Result<RunReport, CatalogueError> {
        self.options.format.ensure_available()?;
        if let Some(input) = &self.options.physical_input {
            self.run_physical(input)
        } else if let Some(input) = &self.options.sort_input {
            self.run_sort(input)
        } else {
            self.run_catalogue()
        }
    }

    /// Build the catalogue without exporting it.
    pub fn catalogue(&self) -> Result<Catalogue, CatalogueError> {
        let options = &self.options;
        let keywords = options
            .keywords
            .as_ref()
            .map(KeywordResolver::new)
            .transpose()?;

        let root = dunce::canonicalize(&options.root).map_err(|e| CatalogueError::io(&options.root, e))?;
        let pruned = if options.remove_empty {
            Some(self.prune(&root)?)
        } else {
            None
        };

        let walker = TreeWalker::new(self.walker_config(), options.reference.clone()).with_keywords(keywords);
        let mut records = walker.enumerate(&root)?;

        if !options.skip_references {
            compose(&mut records, &options.reference)?;
        }
        if let Some(mode) = options.accession {
            let mut counter = AccessionCounter::new(
                mode,
                options
                    .accession_prefix
                    .clone()
                    .or_else(|| options.reference.prefix().map(str::to_string)),
                options
                    .accession_delimiter
                    .clone()
                    .unwrap_or_else(|| self.config.output.accession_delimiter.clone()),
                options.reference.start_ref,
            );
            assign_accessions(&mut records, &mut counter);
        }

        Ok(Catalogue {
            root,
            records,
            layout: TableLayout {
                reference: !options.skip_references,
                accession: options.accession.is_some(),
                fixity: options.fixity.is_some(),
            },
            pruned,
        })
    }

    fn run_catalogue(&self) -> Result<RunReport, CatalogueError> {
        let started = Instant::now();
        let catalogue = self.catalogue()?;
        let table = catalogue.table(&self.config);

        let output = self.resolve_output_dir(&catalogue.root);
        let path = output_file(
            &output,
            &base_name(&catalogue.root),
            self.meta_folder(),
            &self.config.output.output_suffix,
            self.options.format.extension(),
        )?;
        export_table(&table, self.options.format, &path, self.write_policy())?;

        Ok(RunReport {
            mode: RunMode::Catalogue,
            source: catalogue.root.clone(),
            rows: catalogue.records.len(),
            directories: catalogue.records.directory_count(),
            files: catalogue.records.file_count(),
            pruned: catalogue.pruned.as_ref().map_or(0, |p| p.removed.len()),
            output_file: path,
            elapsed: started.elapsed(),
        })
    }

    /// Inventory in, inventory with references out.
    pub fn run_physical(&self, input: &Path) -> Result<RunReport, CatalogueError> {
        let started = Instant::now();
        let mut table = read_inventory(input)?;
        assign_physical_references(
            &mut table,
            input,
            &self.config.physical,
            &self.options.reference,
            &self.config.fields.reference,
        )?;
        self.export_inventory(RunMode::Physical, input, &table, started)
    }

    /// Listing in, listing sorted by reference out.
    pub fn run_sort(&self, input: &Path) -> Result<RunReport, CatalogueError> {
        let started = Instant::now();
        let mut table = read_inventory(input)?;
        sort_by_reference(
            &mut table,
            input,
            &self.config.fields.reference,
            &self.options.reference.delimiter,
            self.config.output.reference_padding,
        )?;
        self.export_inventory(RunMode::Sort, input, &table, started)
    }

    fn export_inventory(
        &self,
        mode: RunMode,
        input: &Path,
        table: &CatalogueTable,
        started: Instant,
    ) -> Result<RunReport, CatalogueError> {
        let output = self.resolve_output_dir(&self.options.root);
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let path = output_file(
            &output,
            &stem,
            None,
            &self.config.output.output_suffix,
            self.options.format.extension(),
        )?;
        export_table(table, self.options.format, &path, self.write_policy())?;
        info!(mode = mode.label(), input = %input.display(), rows = table.len(), "Inventory processed");

        Ok(RunReport {
            mode,
            source: input.to_path_buf(),
            rows: table.len(),
            directories: 0,
            files: 0,
            pruned: 0,
            output_file: path,
            elapsed: started.elapsed(),
        })
    }

    fn prune(&self, root: &Path) -> Result<PruneReport, CatalogueError> {
        let report = EmptyDirPruner::new(root, self.confirmation.as_ref()).prune()?;
        if self.options.prune_log && !report.is_empty() {
            let log = output_file(
                &self.resolve_output_dir(root),
                &base_name(root),
                self.meta_folder(),
                &self.config.output.empty_suffix,
                TEXT_EXTENSION,
            )?;
            export_lines(
                report.removed.iter().map(|p| p.to_string_lossy().into_owned()),
                &log,
                self.write_policy(),
            )?;
        }
        Ok(report)
    }

    fn walker_config(&self) -> WalkerConfig {
        let mut reserved_names = vec![self.config.output.meta_folder.clone()];
        reserved_names.extend(self.config.output.reserved_names.iter().cloned());
        if let Some(name) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.file_name().map(|n| n.to_string_lossy().into_owned()))
        {
            reserved_names.push(name);
        }

        WalkerConfig {
            show_hidden: self.options.show_hidden,
            sort_order: self.options.sort_order,
            follow_symlinks: self.options.follow_symlinks,
            fixity: self.options.fixity,
            reserved_names,
        }
    }

    fn resolve_output_dir(&self, fallback: &Path) -> PathBuf {
        self.options
            .output_dir
            .clone()
            .unwrap_or_else(|| fallback.to_path_buf())
    }

    fn meta_folder(&self) -> Option<&str> {
        self.options
            .meta_dir
            .then_some(self.config.output.meta_folder.as_str())
    }

    fn write_policy(&self) -> WritePolicy {
        WritePolicy::from(&self.config.output)
    }
}

/// Physical and sort inputs are CSV documents or spreadsheets, chosen by extension.
fn read_inventory(input: &Path) -> Result<CatalogueTable, CatalogueError> {
    let extension = input
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => CatalogueTable::read_csv(input),
        "xlsx" | "xlsm" | "xls" | "ods" => CatalogueTable::read_spreadsheet(input),
        _ => Err(CatalogueError::Input {
            path: input.to_path_buf(),
            reason: "unsupported input type; expected .csv, .xlsx, .xlsm, .xls or .ods".to_string(),
        }),
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "root".to_string())
}
