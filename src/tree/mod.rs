//! Filesystem side of the catalogue: listing, keyword tokens, fixity and the walk itself.

pub mod filter;
pub mod hasher;
pub mod keywords;
pub mod node;
pub mod walker;

pub use filter::{ChildFilter, SortOrder};
pub use hasher::{FixityAlgorithm, HashProvider, StreamingHasher};
pub use keywords::{KeywordMode, KeywordOptions, KeywordResolver};
pub use node::{EntryKind, EntryRecord, Fixity};
pub use walker::{TreeWalker, WalkerConfig};
