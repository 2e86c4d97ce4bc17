//! Record Set
//!
//! Flat, traversal-ordered storage for catalogue entries with a path index for
//! constant-time parent lookup. Owned by the walker while it is being built, then by
//! the reference passes.

use crate::error::CatalogueError;
use crate::reference::AccessionCode;
use crate::tree::node::EntryRecord;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Catalogue entries in traversal order, indexed by full path
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<EntryRecord>,
    index: HashMap<PathBuf, usize>,
}

impl RecordSet {
    /// Build the set and its index. Two records with the same full path are an integrity error.
    pub fn from_records(records: Vec<EntryRecord>) -> Result<Self, CatalogueError> {
        let mut index = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.full_path.clone(), position).is_some() {
                return Err(CatalogueError::Reference(format!(
                    "duplicate entry for {}",
                    record.full_path.display()
                )));
            }
        }
        Ok(Self { records, index })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntryRecord> {
        self.records.iter()
    }

    pub fn get(&self, position: usize) -> Option<&EntryRecord> {
        self.records.get(position)
    }

    pub fn position(&self, path: &Path) -> Option<usize> {
        self.index.get(path).copied()
    }

    pub fn find(&self, path: &Path) -> Option<&EntryRecord> {
        self.position(path).and_then(|p| self.records.get(p))
    }

    /// The record whose `full_path` equals this record's `parent_path`, if it is in the set.
    pub fn parent_of(&self, record: &EntryRecord) -> Option<&EntryRecord> {
        self.find(&record.parent_path)
    }

    /// The level-0 record.
    pub fn root(&self) -> Option<&EntryRecord> {
        self.records.iter().find(|r| r.level == 0)
    }

    pub fn set_reference(&mut self, position: usize, reference: Option<String>) {
        if let Some(record) = self.records.get_mut(position) {
            record.final_reference = reference;
        }
    }

    pub fn set_accession(&mut self, position: usize, code: Option<AccessionCode>) {
        if let Some(record) = self.records.get_mut(position) {
            record.accession_code = code;
        }
    }

    pub fn directory_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_dir()).count()
    }

    pub fn file_count(&self) -> usize {
        self.records.len() - self.directory_count()
    }

    pub fn into_records(self) -> Vec<EntryRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a EntryRecord;
    type IntoIter = std::slice::Iter<'a, EntryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
