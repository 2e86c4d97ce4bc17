//! Reference generation: composition of hierarchical references, accession numbering,
//! and the inventory-based physical and sort modes.

pub mod accession;
pub mod compose;
pub mod physical;
pub mod sort;

pub use accession::{assign_accessions, AccessionCode, AccessionCounter, AccessionMode};
pub use compose::{compose, reference_for};

use crate::tree::node::EntryKind;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: &str = "/";

/// Which entries receive the reference suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum SuffixTarget {
    #[default]
    #[value(name = "apply_to_files")]
    Files,
    #[value(name = "apply_to_folders")]
    Folders,
    #[value(name = "apply_to_both")]
    Both,
}

impl SuffixTarget {
    pub fn applies_to(&self, kind: EntryKind) -> bool {
        match self {
            SuffixTarget::Files => !kind.is_dir(),
            SuffixTarget::Folders => kind.is_dir(),
            SuffixTarget::Both => true,
        }
    }
}

/// Options shared by enumeration (token shaping) and composition (joining).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceOptions {
    pub prefix: Option<String>,
    pub delimiter: String,
    pub suffix: Option<String>,
    pub suffix_target: SuffixTarget,
    /// Entries deeper than this level get an empty token
    pub level_limit: Option<u32>,
    /// First counter value on the root's children
    pub start_ref: i64,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            prefix: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            suffix: None,
            suffix_target: SuffixTarget::default(),
            level_limit: None,
            start_ref: 1,
        }
    }
}

impl ReferenceOptions {
    /// Configured prefix; an empty string counts as unset.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Suffix to append to a token of this kind, if any.
    pub fn suffix_for(&self, kind: EntryKind) -> Option<&str> {
        self.suffix
            .as_deref()
            .filter(|s| !s.is_empty() && self.suffix_target.applies_to(kind))
    }

    pub fn beyond_limit(&self, level: u32) -> bool {
        self.level_limit.is_some_and(|limit| level > limit)
    }
}

/// Join with the delimiter, dropping empty sides.
pub(crate) fn join(parent: &str, child: &str, delimiter: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}{}{}", parent, delimiter, child),
    }
}
