//! Accession Counter: a running number over files, directories or both.

use crate::store::RecordSet;
use crate::tree::node::EntryKind;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ACCESSION_DELIMITER: &str = "-";

/// Which entries consume an accession number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AccessionMode {
    /// Files are numbered; directories get the `Dir` marker
    File,
    /// Directories are numbered; files get the `File` marker
    Dir,
    /// Every entry is numbered
    All,
}

impl AccessionMode {
    fn counts(&self, kind: EntryKind) -> bool {
        match self {
            AccessionMode::File => !kind.is_dir(),
            AccessionMode::Dir => kind.is_dir(),
            AccessionMode::All => true,
        }
    }
}

/// Accession column value: a bare number, or a prefixed code / kind marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessionCode {
    Number(i64),
    Code(String),
}

impl fmt::Display for AccessionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessionCode::Number(n) => write!(f, "{}", n),
            AccessionCode::Code(code) => f.write_str(code),
        }
    }
}

/// Monotonic accession counter.
#[derive(Debug, Clone)]
pub struct AccessionCounter {
    mode: AccessionMode,
    prefix: Option<String>,
    delimiter: String,
    next: i64,
}

impl AccessionCounter {
    pub fn new(mode: AccessionMode, prefix: Option<String>, delimiter: impl Into<String>, start: i64) -> Self {
        Self {
            mode,
            prefix: prefix.filter(|p| !p.is_empty()),
            delimiter: delimiter.into(),
            next: start,
        }
    }

    /// Code for the next entry of this kind.
    pub fn next(&mut self, kind: EntryKind) -> AccessionCode {
        if !self.mode.counts(kind) {
            return self.decorate(kind.label().to_string());
        }
        let value = self.next;
        self.next += 1;
        match &self.prefix {
            Some(_) => self.decorate(value.to_string()),
            None => AccessionCode::Number(value),
        }
    }

    pub fn peek(&self) -> i64 {
        self.next
    }

    fn decorate(&self, body: String) -> AccessionCode {
        match &self.prefix {
            Some(prefix) => AccessionCode::Code(format!("{}{}{}", prefix, self.delimiter, body)),
            None => AccessionCode::Code(body),
        }
    }
}

/// Assign an accession code to every record in traversal order.
pub fn assign_accessions(set: &mut RecordSet, counter: &mut AccessionCounter) {
    let kinds: Vec<EntryKind> = set.iter().map(|r| r.kind).collect();
    for (position, kind) in kinds.into_iter().enumerate() {
        let code = counter.next(kind);
        set.set_accession(position, Some(code));
    }
}
