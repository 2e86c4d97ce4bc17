//! Child listing: exclusion of hidden and reserved entries, and sibling ordering.

use crate::error::CatalogueError;
use crate::tree::node::EntryKind;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Sibling ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortOrder {
    /// Directories before files, then case-insensitive name
    #[default]
    #[value(name = "folders_first")]
    FoldersFirst,
    /// Case-insensitive name regardless of kind
    #[value(name = "alphabetical")]
    Alphabetical,
}

impl SortOrder {
    fn compare(&self, a: &ChildEntry, b: &ChildEntry) -> Ordering {
        let by_kind = match self {
            SortOrder::FoldersFirst => a.kind.is_dir().cmp(&b.kind.is_dir()).reverse(),
            SortOrder::Alphabetical => Ordering::Equal,
        };
        by_kind
            .then_with(|| a.sort_key.cmp(&b.sort_key))
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// An immediate child of a directory, stat-ed once during listing.
#[derive(Debug, Clone)]
pub struct ChildEntry {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    pub metadata: Metadata,
    pub is_symlink: bool,
    sort_key: String,
}

/// Case-folded comparison key; NFC first so composed and decomposed names sort together.
pub fn fold_name(name: &str) -> String {
    name.nfc().collect::<String>().to_lowercase()
}

/// Lists and orders the children of a directory.
#[derive(Debug, Clone)]
pub struct ChildFilter {
    show_hidden: bool,
    reserved: HashSet<String>,
    order: SortOrder,
}

impl ChildFilter {
    pub fn new(show_hidden: bool, reserved: impl IntoIterator<Item = String>, order: SortOrder) -> Self {
        Self {
            show_hidden,
            reserved: reserved.into_iter().collect(),
            order,
        }
    }

    /// Whether an entry with this name and metadata is excluded from the catalogue.
    pub fn excludes(&self, name: &str, metadata: &Metadata) -> bool {
        if self.reserved.contains(name) {
            return true;
        }
        !self.show_hidden && (name.starts_with('.') || has_hidden_attribute(metadata))
    }

    /// Ordered immediate children of `dir`. Any enumeration or stat failure is returned as an error.
    pub fn list_children(&self, dir: &Path) -> Result<Vec<ChildEntry>, CatalogueError> {
        let read_dir = fs::read_dir(dir).map_err(|e| CatalogueError::io(dir, e))?;
        let mut children = Vec::new();

        for entry in read_dir {
            let entry = entry.map_err(|e| CatalogueError::io(dir, e))?;
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type().map_err(|e| CatalogueError::io(&path, e))?;
            let metadata = fs::metadata(&path).map_err(|e| CatalogueError::io(&path, e))?;

            if self.excludes(&name, &metadata) {
                continue;
            }

            children.push(ChildEntry {
                kind: EntryKind::from_metadata(&metadata),
                sort_key: fold_name(&name),
                is_symlink: file_type.is_symlink(),
                path,
                name,
                metadata,
            });
        }

        children.sort_by(|a, b| self.order.compare(a, b));
        Ok(children)
    }
}

#[cfg(windows)]
fn has_hidden_attribute(metadata: &Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn has_hidden_attribute(_metadata: &Metadata) -> bool {
    false
}
