//! Tree Enumerator
//!
//! Depth-first pre-order walk over an explicit stack of directory frames. Each frame
//! owns its ordered children and its own sibling counter, so numbering never leaks
//! between directories. Every entry becomes one [`EntryRecord`] with its raw token
//! fixed at creation.

use crate::error::CatalogueError;
use crate::reference::ReferenceOptions;
use crate::store::RecordSet;
use crate::tree::filter::{ChildEntry, ChildFilter, SortOrder};
use crate::tree::hasher::{FixityAlgorithm, HashProvider, StreamingHasher};
use crate::tree::keywords::KeywordResolver;
use crate::tree::node::{EntryKind, EntryRecord, Fixity};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Root token; the compositor treats the level-0 record as contributing nothing.
pub const ROOT_TOKEN: &str = "0";

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    pub show_hidden: bool,
    pub sort_order: SortOrder,
    pub follow_symlinks: bool,
    pub fixity: Option<FixityAlgorithm>,
    /// Names excluded at every level regardless of `show_hidden`
    pub reserved_names: Vec<String>,
}

/// Numeric state of one directory's children, kept apart from the displayed token.
#[derive(Debug, Clone, Copy)]
struct SiblingCounter {
    next: i64,
}

struct Frame {
    children: std::vec::IntoIter<ChildEntry>,
    counter: SiblingCounter,
    level: u32,
}

/// Enumerates a directory tree into a [`RecordSet`].
pub struct TreeWalker {
    config: WalkerConfig,
    filter: ChildFilter,
    reference: ReferenceOptions,
    keywords: Option<KeywordResolver>,
    hasher: Box<dyn HashProvider>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig, reference: ReferenceOptions) -> Self {
        let filter = ChildFilter::new(
            config.show_hidden,
            config.reserved_names.iter().cloned(),
            config.sort_order,
        );
        Self {
            config,
            filter,
            reference,
            keywords: None,
            hasher: Box::new(StreamingHasher::default()),
        }
    }

    pub fn with_keywords(mut self, keywords: Option<KeywordResolver>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_hasher(mut self, hasher: Box<dyn HashProvider>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Walk `root` and return every entry, root first, in pre-order.
    pub fn enumerate(&self, root: &Path) -> Result<RecordSet, CatalogueError> {
        let root = dunce::canonicalize(root).map_err(|e| CatalogueError::io(root, e))?;
        let root_metadata = fs::metadata(&root).map_err(|e| CatalogueError::io(&root, e))?;
        if !root_metadata.is_dir() {
            return Err(CatalogueError::Config(format!(
                "root {} is not a directory",
                root.display()
            )));
        }
        let root_parent = root.parent().map(Path::to_path_buf).unwrap_or_else(|| root.clone());

        let mut records = vec![EntryRecord::capture(
            &root,
            &root_metadata,
            &root_parent,
            0,
            ROOT_TOKEN.to_string(),
        )];
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack = vec![self.open_frame(&root, 1, self.reference.start_ref)?];

        while let Some(frame) = stack.last_mut() {
            let Some(child) = frame.children.next() else {
                stack.pop();
                continue;
            };
            let level = frame.level;
            let (token, counter) = self.token_for(&child, level, frame.counter);
            frame.counter = counter;

            let mut record = EntryRecord::capture(&child.path, &child.metadata, &root_parent, level, token);
            if let (EntryKind::File, Some(algorithm)) = (child.kind, self.config.fixity) {
                let digest = self.hasher.digest(&child.path, algorithm)?;
                debug!(path = %child.path.display(), %algorithm, "Fixity generated");
                record.fixity = Some(Fixity { algorithm, digest });
            }
            records.push(record);

            if child.kind.is_dir() && self.should_descend(&child, &root, &mut visited)? {
                stack.push(self.open_frame(&child.path, level + 1, 1)?);
            }
        }

        let set = RecordSet::from_records(records)?;
        info!(
            root = %root.display(),
            entries = set.len(),
            directories = set.directory_count(),
            files = set.file_count(),
            "Enumeration complete"
        );
        Ok(set)
    }

    fn open_frame(&self, dir: &Path, level: u32, start: i64) -> Result<Frame, CatalogueError> {
        let children = self.filter.list_children(dir)?;
        debug!(dir = %dir.display(), children = children.len(), "Listed directory");
        Ok(Frame {
            children: children.into_iter(),
            counter: SiblingCounter { next: start },
            level,
        })
    }

    /// Displayed token for a child and the counter state for its next sibling.
    fn token_for(&self, child: &ChildEntry, level: u32, counter: SiblingCounter) -> (String, SiblingCounter) {
        let keyword = self
            .keywords
            .as_ref()
            .and_then(|k| k.resolve(&child.name, child.kind));
        let holds_number = keyword.is_some()
            && !self.keywords.as_ref().is_some_and(KeywordResolver::retain_order);

        let mut token = keyword.unwrap_or_else(|| counter.next.to_string());
        if let Some(suffix) = self.reference.suffix_for(child.kind) {
            token.push_str(suffix);
        }
        if self.reference.beyond_limit(level) {
            token.clear();
        }

        let next = if holds_number {
            counter
        } else {
            SiblingCounter {
                next: counter.next + 1,
            }
        };
        (token, next)
    }

    /// Symlinked directories are entered only when following links. A link whose target
    /// lies inside the root is listed but not entered, since the target is walked under
    /// its own path; outside targets are entered at most once.
    fn should_descend(
        &self,
        child: &ChildEntry,
        root: &Path,
        visited: &mut HashSet<PathBuf>,
    ) -> Result<bool, CatalogueError> {
        if !child.is_symlink {
            return Ok(true);
        }
        if !self.config.follow_symlinks {
            return Ok(false);
        }
        let target = dunce::canonicalize(&child.path).map_err(|e| CatalogueError::io(&child.path, e))?;
        if target.starts_with(root) {
            debug!(link = %child.path.display(), target = %target.display(), "Link target inside root");
            return Ok(false);
        }
        Ok(visited.insert(target))
    }
}
