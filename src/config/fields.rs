//! Logical field name → output column name mapping.

use serde::{Deserialize, Serialize};

macro_rules! field_defaults {
    ($($field:ident => $column:literal),* $(,)?) => {
        $(
            pub(super) fn $field() -> String {
                $column.to_string()
            }
        )*
    };
}

mod defaults {
    field_defaults! {
        path => "FullName",
        relative => "RelativeName",
        basename => "Basename",
        extension => "Extension",
        parent => "Parent",
        parent_ref => "Parent_Ref",
        attribute => "Attribute",
        size => "Size",
        created => "CreateDate",
        modified => "DateModified",
        accessed => "DateAccessed",
        level => "Level",
        ref_section => "Ref_Section",
        reference => "Archive_Reference",
        accession => "Accession_Reference",
        algorithm => "Algorithm",
        hash => "Hash",
    }
}

/// Column names used in the exported table.
///
/// Any name left out of the options file keeps its built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default = "defaults::path")]
    pub path: String,
    #[serde(default = "defaults::relative")]
    pub relative: String,
    #[serde(default = "defaults::basename")]
    pub basename: String,
    #[serde(default = "defaults::extension")]
    pub extension: String,
    #[serde(default = "defaults::parent")]
    pub parent: String,
    #[serde(default = "defaults::parent_ref")]
    pub parent_ref: String,
    #[serde(default = "defaults::attribute")]
    pub attribute: String,
    #[serde(default = "defaults::size")]
    pub size: String,
    #[serde(default = "defaults::created")]
    pub created: String,
    #[serde(default = "defaults::modified")]
    pub modified: String,
    #[serde(default = "defaults::accessed")]
    pub accessed: String,
    #[serde(default = "defaults::level")]
    pub level: String,
    /// Raw per-level token column
    #[serde(default = "defaults::ref_section")]
    pub ref_section: String,
    /// Final composed reference column
    #[serde(default = "defaults::reference")]
    pub reference: String,
    #[serde(default = "defaults::accession")]
    pub accession: String,
    #[serde(default = "defaults::algorithm")]
    pub algorithm: String,
    #[serde(default = "defaults::hash")]
    pub hash: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            path: defaults::path(),
            relative: defaults::relative(),
            basename: defaults::basename(),
            extension: defaults::extension(),
            parent: defaults::parent(),
            parent_ref: defaults::parent_ref(),
            attribute: defaults::attribute(),
            size: defaults::size(),
            created: defaults::created(),
            modified: defaults::modified(),
            accessed: defaults::accessed(),
            level: defaults::level(),
            ref_section: defaults::ref_section(),
            reference: defaults::reference(),
            accession: defaults::accession(),
            algorithm: defaults::algorithm(),
            hash: defaults::hash(),
        }
    }
}
