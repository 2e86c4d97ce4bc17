//! Catalogue Exporter
//!
//! A [`CatalogueTable`] is rendered to bytes by the [`Renderer`] for the chosen format,
//! then written through the retrying writer in [`output`].

pub mod delimited;
pub mod json;
pub mod output;
pub mod table;
#[cfg(feature = "xlsx")]
pub mod xlsx;
#[cfg(feature = "xml")]
pub mod xml;

pub use output::{export_lines, export_table, output_file, write_with_retry, OutputFormat, WritePolicy};
pub use table::{CatalogueTable, Cell, TableLayout};

use crate::error::CatalogueError;
use thiserror::Error;

/// Failure inside a document renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "xml")]
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[cfg(feature = "xlsx")]
    #[error("Excel error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Buffer error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes a table into one document format.
pub trait Renderer {
    fn name(&self) -> &'static str;
    fn render(&self, table: &CatalogueTable) -> Result<Vec<u8>, RenderError>;
}

/// Renderer for a format, or `UnsupportedFormat` when its feature is compiled out.
pub fn renderer_for(format: OutputFormat) -> Result<Box<dyn Renderer>, CatalogueError> {
    format.ensure_available()?;
    let renderer: Box<dyn Renderer> = match format {
        OutputFormat::Csv => Box::new(delimited::CsvRenderer),
        OutputFormat::Json => Box::new(json::JsonRenderer),
        #[cfg(feature = "xlsx")]
        OutputFormat::Xlsx => Box::new(xlsx::XlsxRenderer),
        #[cfg(feature = "xml")]
        OutputFormat::Xml => Box::new(xml::XmlRenderer),
        #[allow(unreachable_patterns)]
        other => {
            return Err(CatalogueError::UnsupportedFormat {
                format: other.extension().to_string(),
                feature: other.feature().unwrap_or_default().to_string(),
            })
        }
    };
    Ok(renderer)
}
