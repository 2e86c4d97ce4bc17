//! Sort mode: reorder a table by its reference column in hierarchy order.

use crate::error::CatalogueError;
use crate::export::table::CatalogueTable;
use std::path::Path;

/// Sort key for a reference: numeric segments are zero-padded so `1/10` follows `1/9`.
pub fn padded_key(reference: &str, delimiter: &str, width: usize) -> String {
    if reference.is_empty() {
        return String::new();
    }
    reference
        .split(delimiter)
        .map(|segment| {
            if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
                format!("{:0>width$}", segment, width = width)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// Stable sort of the table rows by the named reference column; empty references lead.
pub fn sort_by_reference(
    table: &mut CatalogueTable,
    source: &Path,
    column: &str,
    delimiter: &str,
    width: usize,
) -> Result<(), CatalogueError> {
    let index = table.column(column).ok_or_else(|| CatalogueError::Input {
        path: source.to_path_buf(),
        reason: format!("missing reference column '{}'", column),
    })?;
    table
        .rows
        .sort_by_cached_key(|row| padded_key(&row[index].render(), delimiter, width));
    Ok(())
}
