//! Catalogue entry records

use crate::reference::AccessionCode;
use crate::tree::hasher::FixityAlgorithm;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::time::SystemTime;

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }

    /// Attribute column value
    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Directory => "Dir",
            EntryKind::File => "File",
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }
}

/// Content digest of a file entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixity {
    pub algorithm: FixityAlgorithm,
    /// Uppercase hex digest
    pub digest: String,
}

/// One catalogued filesystem entry.
///
/// `raw_ref_token` is fixed when the record is created; `final_reference` and
/// `accession_code` are filled in afterwards by the reference passes.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub full_path: PathBuf,
    pub relative_path: String,
    pub basename: String,
    pub extension: String,
    /// Looked up by equality against other records' `full_path`; never followed directly
    pub parent_path: PathBuf,
    pub kind: EntryKind,
    pub size_bytes: u64,
    pub created_at: Option<DateTime<Local>>,
    pub modified_at: Option<DateTime<Local>>,
    pub accessed_at: Option<DateTime<Local>>,
    /// Depth below the catalogued root (root = 0)
    pub level: u32,
    pub raw_ref_token: String,
    pub fixity: Option<Fixity>,
    pub final_reference: Option<String>,
    pub accession_code: Option<AccessionCode>,
}

impl EntryRecord {
    /// Capture a record from an already stat-ed path.
    ///
    /// `root_parent` is the directory containing the catalogued root; it is stripped from
    /// `full_path` to form the relative path.
    pub fn capture(
        full_path: &Path,
        metadata: &Metadata,
        root_parent: &Path,
        level: u32,
        raw_ref_token: String,
    ) -> Self {
        let parent_path = full_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        let basename = full_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = full_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        EntryRecord {
            full_path: full_path.to_path_buf(),
            relative_path: relative_to(full_path, root_parent),
            basename,
            extension,
            parent_path,
            kind: EntryKind::from_metadata(metadata),
            size_bytes: metadata.len(),
            created_at: local_time(metadata.created()),
            modified_at: local_time(metadata.modified()),
            accessed_at: local_time(metadata.accessed()),
            level,
            raw_ref_token,
            fixity: None,
            final_reference: None,
            accession_code: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

fn local_time(time: std::io::Result<SystemTime>) -> Option<DateTime<Local>> {
    time.ok().map(DateTime::<Local>::from)
}

/// Path below `root_parent`, always with a leading separator (`/root/A/a1.txt`).
fn relative_to(full_path: &Path, root_parent: &Path) -> String {
    match full_path.strip_prefix(root_parent) {
        Ok(rel) => {
            let rel = rel.to_string_lossy();
            if rel.starts_with(MAIN_SEPARATOR) {
                rel.into_owned()
            } else {
                format!("{}{}", MAIN_SEPARATOR, rel)
            }
        }
        Err(_) => full_path.to_string_lossy().into_owned(),
    }
}
