//! Physical mode: references for the rows of an inventory, numbered from each row's
//! declared level instead of a filesystem walk.

use super::ReferenceOptions;
use crate::config::PhysicalConfig;
use crate::error::CatalogueError;
use crate::export::table::{CatalogueTable, Cell};
use std::path::Path;

const COLLECTION_LEVEL: &str = "collection";

/// Running counters, one per declared level plus one for items.
#[derive(Debug)]
struct LevelCounters {
    separators: Vec<String>,
    items: Vec<String>,
    counters: Vec<u64>,
    prefix_index: usize,
}

impl LevelCounters {
    fn new(separators: Vec<String>, items: Vec<String>) -> Self {
        let prefix_index = separators
            .iter()
            .position(|s| s == COLLECTION_LEVEL)
            .unwrap_or(0);
        let counters = vec![0; separators.len() + 1];
        Self {
            separators,
            items,
            counters,
            prefix_index,
        }
    }

    fn prefix_label(&self) -> Option<&str> {
        self.separators.get(self.prefix_index).map(String::as_str)
    }

    /// Items, and any unrecognised level, count one below the deepest declared level.
    fn index_of(&self, level: &str) -> usize {
        if let Some(index) = self.separators.iter().position(|s| s == level) {
            return index;
        }
        if !self.items.iter().any(|item| item == level) {
            tracing::debug!(level, "Unrecognised level counted as an item");
        }
        self.separators.len()
    }

    /// Count a row at `index`; deeper counters restart.
    fn advance(&mut self, index: usize) {
        self.counters[index] += 1;
        for deeper in &mut self.counters[index + 1..] {
            *deeper = 0;
        }
    }

    /// Non-zero counters below the prefix level.
    fn below_prefix(&self) -> impl Iterator<Item = u64> + '_ {
        self.counters[self.prefix_index + 1..]
            .iter()
            .copied()
            .filter(|c| *c > 0)
    }
}

/// Append the reference column to an inventory table.
pub fn assign_physical_references(
    table: &mut CatalogueTable,
    source: &Path,
    config: &PhysicalConfig,
    options: &ReferenceOptions,
    reference_column: &str,
) -> Result<(), CatalogueError> {
    let level_column = table.column(&config.level_field).ok_or_else(|| CatalogueError::Input {
        path: source.to_path_buf(),
        reason: format!("missing level column '{}'", config.level_field),
    })?;
    let title_column = table.column(&config.title_field);

    let mut counters = LevelCounters::new(config.separators(), config.item_labels());
    let prefix_value = match options.prefix() {
        Some(prefix) => Some(prefix.to_string()),
        None => first_title_at(table, level_column, title_column, counters.prefix_label()),
    };

    let mut references = Vec::with_capacity(table.len());
    for row in &table.rows {
        let level = row[level_column].render().trim().to_lowercase();
        let index = counters.index_of(&level);
        counters.advance(index);

        let reference = if index == counters.prefix_index {
            match &prefix_value {
                Some(prefix) => prefix.clone(),
                None => counters.counters[index].to_string(),
            }
        } else {
            let mut parts: Vec<String> = prefix_value.iter().cloned().collect();
            parts.extend(counters.below_prefix().map(|c| c.to_string()));
            let mut reference = parts.join(options.delimiter.as_str());
            if let Some(suffix) = options.suffix.as_deref() {
                reference.push_str(suffix);
            }
            reference
        };
        references.push(Cell::text(reference));
    }

    table.set_column(reference_column, references);
    tracing::debug!(rows = table.len(), "Physical references assigned");
    Ok(())
}

fn first_title_at(
    table: &CatalogueTable,
    level_column: usize,
    title_column: Option<usize>,
    label: Option<&str>,
) -> Option<String> {
    let (title_column, label) = (title_column?, label?);
    table
        .rows
        .iter()
        .find(|row| row[level_column].render().trim().to_lowercase() == label)
        .map(|row| row[title_column].render())
        .filter(|title| !title.is_empty())
}
