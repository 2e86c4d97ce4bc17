//! Keyword resolution: replaces a directory's numeric token with an alphabetic one.
//!
//! Matching rules:
//! - an empty keyword list matches every directory;
//! - a keyword list matches when any entry contains the directory name;
//! - a JSON mapping matches only on an exact key.
//!
//! Names and keywords are uppercased before comparison unless matching is case sensitive.
//! Files never match.

use crate::error::CatalogueError;
use crate::tree::node::EntryKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default number of characters kept from a single-word name
pub const DEFAULT_ABBREVIATION: usize = 3;

/// How a matched directory name becomes a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum KeywordMode {
    /// Initials of each word; first letters for a single word
    #[default]
    #[value(name = "initialise")]
    Initialise,
    /// First letters of the name
    #[value(name = "firstletters")]
    FirstLetters,
    /// Literal tokens from a JSON object of name → token
    #[value(name = "from_json")]
    FromJson,
}

/// Keyword settings as supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct KeywordOptions {
    /// Keyword list, or a single path to the JSON mapping in `from_json` mode
    pub keywords: Vec<String>,
    pub mode: KeywordMode,
    /// Whether a keyworded directory still consumes a number
    pub retain_order: bool,
    pub case_sensitive: bool,
    /// Characters kept by first-letter truncation, or the split cap for initials
    pub abbreviation: Option<usize>,
}

#[derive(Debug, Clone)]
enum KeywordIndex {
    All,
    Listed(Vec<String>),
    Mapping(HashMap<String, String>),
}

/// Resolves directory names to override tokens.
#[derive(Debug, Clone)]
pub struct KeywordResolver {
    index: KeywordIndex,
    mode: KeywordMode,
    case_sensitive: bool,
    abbreviation: Option<usize>,
    retain_order: bool,
}

impl KeywordResolver {
    /// Build the resolver, reading the JSON mapping in `from_json` mode.
    pub fn new(options: &KeywordOptions) -> Result<Self, CatalogueError> {
        let index = match options.mode {
            KeywordMode::FromJson => {
                let path = options.keywords.first().ok_or_else(|| {
                    CatalogueError::Config(
                        "from_json keyword mode requires the path to a JSON mapping".to_string(),
                    )
                })?;
                let path = Path::new(path);
                let mapping = normalise_keys(load_mapping(path)?, options.case_sensitive).map_err(|reason| {
                    CatalogueError::Keyword {
                        path: path.to_path_buf(),
                        reason,
                    }
                })?;
                KeywordIndex::Mapping(mapping)
            }
            _ if options.keywords.is_empty() => KeywordIndex::All,
            _ => KeywordIndex::Listed(
                options
                    .keywords
                    .iter()
                    .map(|k| normalise(k, options.case_sensitive))
                    .collect(),
            ),
        };

        Ok(Self {
            index,
            mode: options.mode,
            case_sensitive: options.case_sensitive,
            abbreviation: options.abbreviation,
            retain_order: options.retain_order,
        })
    }

    pub fn retain_order(&self) -> bool {
        self.retain_order
    }

    /// Override token for an entry, or `None` to keep the numeric counter.
    pub fn resolve(&self, name: &str, kind: EntryKind) -> Option<String> {
        if !kind.is_dir() {
            return None;
        }
        let candidate = normalise(name, self.case_sensitive);

        let token = match &self.index {
            KeywordIndex::All => self.abbreviate(&candidate),
            KeywordIndex::Listed(keywords) => {
                if keywords.iter().any(|keyword| keyword.contains(candidate.as_str())) {
                    self.abbreviate(&candidate)
                } else {
                    return None;
                }
            }
            KeywordIndex::Mapping(mapping) => mapping.get(&candidate)?.clone(),
        };

        if token.is_empty() {
            None
        } else {
            Some(token)
        }
    }

    fn abbreviate(&self, name: &str) -> String {
        let cleaned = strip_punctuation(name);
        match self.mode {
            KeywordMode::FirstLetters => {
                first_letters(&cleaned, self.abbreviation.unwrap_or(DEFAULT_ABBREVIATION))
            }
            _ => initialise(&cleaned, self.abbreviation),
        }
    }
}

fn normalise(value: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        value.to_string()
    } else {
        value.to_uppercase()
    }
}

/// Keys that normalise to the same string are rejected.
fn normalise_keys(
    mapping: Vec<(String, String)>,
    case_sensitive: bool,
) -> Result<HashMap<String, String>, String> {
    let mut keys: HashMap<String, String> = HashMap::with_capacity(mapping.len());
    let mut index = HashMap::with_capacity(mapping.len());
    for (name, token) in mapping {
        let key = normalise(&name, case_sensitive);
        if let Some(earlier) = keys.get(&key) {
            return Err(format!(
                "keys '{}' and '{}' collide when matching case-insensitively",
                earlier, name
            ));
        }
        keys.insert(key.clone(), name);
        index.insert(key, token);
    }
    Ok(index)
}

/// Remove ASCII punctuation.
pub fn strip_punctuation(name: &str) -> String {
    name.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Initials of a multi-word name, uppercased.
///
/// `cap` limits the number of splits, so at most `cap + 1` words contribute.
/// A single word falls back to [`first_letters`] with `cap` (default 3) characters.
pub fn initialise(name: &str, cap: Option<usize>) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    if words.len() <= 1 {
        return first_letters(name, cap.unwrap_or(DEFAULT_ABBREVIATION));
    }
    let considered = cap
        .map(|splits| splits.saturating_add(1).min(words.len()))
        .unwrap_or(words.len());
    words[..considered]
        .iter()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First `count` characters, uppercased, with spaces dropped.
pub fn first_letters(name: &str, count: usize) -> String {
    name.chars()
        .take(count)
        .collect::<String>()
        .to_uppercase()
        .replace(' ', "")
}

fn load_mapping(path: &Path) -> Result<Vec<(String, String)>, CatalogueError> {
    let keyword_error = |reason: String| CatalogueError::Keyword {
        path: PathBuf::from(path),
        reason,
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| keyword_error(format!("failed to read keyword mapping: {}", e)))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| keyword_error(format!("invalid JSON: {}", e)))?;
    let object = value
        .as_object()
        .ok_or_else(|| keyword_error("keywords JSON file is not a valid dictionary".to_string()))?;

    object
        .iter()
        .map(|(name, token)| {
            let token = match token {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(keyword_error(format!(
                        "value for '{}' must be a string, found {}",
                        name, other
                    )))
                }
            };
            Ok((name.clone(), token))
        })
        .collect()
}
