//! Reference Compositor
//!
//! Builds each record's final reference by walking its parent chain through the path
//! index, joining every non-root ancestor's raw token in front of the record's own.
//! The root contributes nothing to its descendants; the prefix, when set, leads every
//! reference and replaces the root's own token.

use super::{join, ReferenceOptions};
use crate::error::CatalogueError;
use crate::store::RecordSet;

/// Final reference of the record at `position`.
pub fn reference_for(
    set: &RecordSet,
    position: usize,
    options: &ReferenceOptions,
) -> Result<String, CatalogueError> {
    let record = set
        .get(position)
        .ok_or_else(|| CatalogueError::Reference(format!("no record at position {}", position)))?;

    if record.level == 0 {
        return Ok(options
            .prefix()
            .unwrap_or(record.raw_ref_token.as_str())
            .to_string());
    }

    let delimiter = options.delimiter.as_str();
    let mut composed = record.raw_ref_token.clone();
    let mut current = record;
    let mut hops = 0usize;

    while let Some(parent) = set.parent_of(current) {
        hops += 1;
        if hops > set.len() {
            return Err(CatalogueError::Reference(format!(
                "parent chain of {} does not terminate",
                record.full_path.display()
            )));
        }
        if parent.level == 0 {
            break;
        }
        composed = join(&parent.raw_ref_token, &composed, delimiter);
        current = parent;
    }

    Ok(match options.prefix() {
        Some(prefix) => join(prefix, &composed, delimiter),
        None => composed,
    })
}

/// Fill in `final_reference` for every record. Either every record is composed or none is.
pub fn compose(set: &mut RecordSet, options: &ReferenceOptions) -> Result<(), CatalogueError> {
    let references = (0..set.len())
        .map(|position| reference_for(set, position, options))
        .collect::<Result<Vec<_>, _>>()?;

    for (position, reference) in references.into_iter().enumerate() {
        set.set_reference(position, Some(reference));
    }
    tracing::debug!(records = set.len(), "References composed");
    Ok(())
}
