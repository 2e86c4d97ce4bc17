//! Empty-Directory Pruner
//!
//! Removes directories below the root that hold nothing, deepest first, so a directory
//! left empty by earlier removals goes too. Nothing is removed until the confirmation
//! has been fully answered. The root itself and files are never removed.

use crate::error::CatalogueError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

pub const PRUNE_WARNING: &str = "***WARNING***\n\n\
You have selected the Remove Empty Folders option.\n\
This process is NOT reversible!\n\n\
Please confirm this by typing: \"Y\"\n\
Typing any other character will abort the program...\n\n\
Please confirm your choice";

/// Source of the yes/no answer gating removal.
pub trait Confirmation {
    /// `Ok(true)` only for an explicit yes.
    fn confirm(&self, prompt: &str) -> Result<bool, CatalogueError>;
}

/// Reads a typed answer from the terminal; only `y` / `Y` confirms.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&self, prompt: &str) -> Result<bool, CatalogueError> {
        let answer: String = dialoguer::Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CatalogueError::Config(format!("Failed to get user input: {}", e)))?;
        Ok(answer.trim().eq_ignore_ascii_case("y"))
    }
}

/// Outcome of a prune
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PruneReport {
    pub removed: Vec<PathBuf>,
    /// Directories that were empty but could not be removed
    pub failed: Vec<(PathBuf, String)>,
}

impl PruneReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

pub struct EmptyDirPruner<'a> {
    root: PathBuf,
    confirmation: &'a dyn Confirmation,
}

impl<'a> EmptyDirPruner<'a> {
    pub fn new(root: impl Into<PathBuf>, confirmation: &'a dyn Confirmation) -> Self {
        Self {
            root: root.into(),
            confirmation,
        }
    }

    /// Ask for confirmation, then remove every empty directory below the root.
    ///
    /// A declined confirmation returns [`CatalogueError::Aborted`] without touching the tree.
    pub fn prune(&self) -> Result<PruneReport, CatalogueError> {
        if !self.confirmation.confirm(PRUNE_WARNING)? {
            info!("Empty directory removal declined; aborting");
            return Err(CatalogueError::Aborted);
        }

        let mut report = PruneReport::default();
        for entry in WalkDir::new(&self.root).contents_first(true).min_depth(1) {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
                CatalogueError::io(path, source)
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let path = entry.path();
            match is_empty_dir(path) {
                Ok(false) => {}
                Ok(true) => match fs::remove_dir(path) {
                    Ok(()) => {
                        info!(path = %path.display(), "Removed empty directory");
                        report.removed.push(path.to_path_buf());
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Failed to remove directory");
                        report.failed.push((path.to_path_buf(), e.to_string()));
                    }
                },
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to inspect directory");
                    report.failed.push((path.to_path_buf(), e.to_string()));
                }
            }
        }

        if report.is_empty() {
            info!(root = %self.root.display(), "No directories removed");
        }
        Ok(report)
    }
}

fn is_empty_dir(path: &Path) -> std::io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
