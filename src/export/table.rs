//! Tabular model shared by every renderer and by the inventory modes.

use crate::config::FieldNames;
use crate::error::CatalogueError;
use crate::reference::AccessionCode;
use crate::store::RecordSet;
use crate::tree::node::EntryRecord;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::{DateTime, Local};
use std::path::Path;
use tracing::debug;

/// Timestamp text form used by the text renderers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Local>),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Text form of the cell; empty cells render as "".
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Timestamp(t) => t.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

impl From<Option<DateTime<Local>>> for Cell {
    fn from(value: Option<DateTime<Local>>) -> Self {
        value.map(Cell::Timestamp).unwrap_or(Cell::Empty)
    }
}

impl From<&AccessionCode> for Cell {
    fn from(code: &AccessionCode) -> Self {
        match code {
            AccessionCode::Number(n) => Cell::Integer(*n),
            AccessionCode::Code(s) => Cell::Text(s.clone()),
        }
    }
}

/// Which optional columns a catalogue table carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableLayout {
    pub reference: bool,
    pub accession: bool,
    pub fixity: bool,
}

/// Header row plus data rows, every row as wide as the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogueTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl CatalogueTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Lay out a record set using the configured column names.
    pub fn from_records(set: &RecordSet, fields: &FieldNames, layout: TableLayout) -> Self {
        let mut headers: Vec<String> = [
            &fields.path,
            &fields.relative,
            &fields.basename,
            &fields.extension,
            &fields.parent,
            &fields.attribute,
            &fields.size,
            &fields.created,
            &fields.modified,
            &fields.accessed,
            &fields.level,
            &fields.ref_section,
        ]
        .into_iter()
        .cloned()
        .collect();
        if layout.fixity {
            headers.push(fields.algorithm.clone());
            headers.push(fields.hash.clone());
        }
        headers.push(fields.parent_ref.clone());
        if layout.reference {
            headers.push(fields.reference.clone());
        }
        if layout.accession {
            headers.push(fields.accession.clone());
        }

        let rows = set.iter().map(|record| record_row(set, record, layout)).collect();
        Self { headers, rows }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Replace the named column's values, appending the column when it is absent.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        let index = match self.column(name) {
            Some(index) => index,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Empty);
                }
                self.headers.len() - 1
            }
        };
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[index] = value;
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a CSV document with a header row. Short rows are padded with empty cells.
    pub fn read_csv(path: &Path) -> Result<Self, CatalogueError> {
        let input_error = |reason: String| CatalogueError::Input {
            path: path.to_path_buf(),
            reason,
        };
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| input_error(e.to_string()))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| input_error(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut table = CatalogueTable::new(headers);
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|e| input_error(e.to_string()))?;
            let line = row.position().map_or(index as u64 + 2, |p| p.line());
            table
                .push_row(row.iter().map(Cell::text).collect(), line)
                .map_err(input_error)?;
        }
        Ok(table)
    }

    /// Read the first worksheet of an xlsx, xlsm, xls or ods workbook; its first row is the header.
    pub fn read_spreadsheet(path: &Path) -> Result<Self, CatalogueError> {
        let input_error = |reason: String| CatalogueError::Input {
            path: path.to_path_buf(),
            reason,
        };
        let mut workbook = open_workbook_auto(path).map_err(|e| input_error(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| input_error("workbook has no worksheets".to_string()))?
            .map_err(|e| input_error(e.to_string()))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default();
        let first_line = u64::from(range.start().map_or(0, |(row, _)| row)) + 2;

        let mut table = CatalogueTable::new(headers);
        for (index, row) in rows.enumerate() {
            table
                .push_row(row.iter().map(spreadsheet_cell).collect(), first_line + index as u64)
                .map_err(input_error)?;
        }
        debug!(path = %path.display(), rows = table.len(), "Read worksheet");
        Ok(table)
    }

    /// Pad a row to the header width. Cells beyond the header must be empty.
    fn push_row(&mut self, mut cells: Vec<Cell>, line: u64) -> Result<(), String> {
        let width = self.headers.len();
        if cells.len() > width {
            if cells[width..].iter().any(|cell| !cell.is_empty()) {
                return Err(format!(
                    "row {} has {} values but the header has {} columns",
                    line,
                    cells.len(),
                    width
                ));
            }
            cells.truncate(width);
        }
        cells.resize(width, Cell::Empty);
        self.rows.push(cells);
        Ok(())
    }
}

fn spreadsheet_cell(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::text(s.as_str()),
        Data::Int(n) => Cell::Integer(*n),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Cell::Integer(*f as i64),
        other if other.is_datetime() || other.is_datetime_iso() => other
            .as_datetime()
            .and_then(|t| t.and_local_timezone(Local).earliest())
            .map(Cell::Timestamp)
            .unwrap_or_else(|| Cell::text(other.to_string())),
        other => Cell::text(other.to_string()),
    }
}

fn record_row(set: &RecordSet, record: &EntryRecord, layout: TableLayout) -> Vec<Cell> {
    let mut row = vec![
        Cell::text(record.full_path.to_string_lossy()),
        Cell::text(record.relative_path.clone()),
        Cell::text(record.basename.clone()),
        Cell::text(record.extension.clone()),
        Cell::text(record.parent_path.to_string_lossy()),
        Cell::text(record.kind.label()),
        Cell::Integer(i64::try_from(record.size_bytes).unwrap_or(i64::MAX)),
        record.created_at.into(),
        record.modified_at.into(),
        record.accessed_at.into(),
        Cell::Integer(i64::from(record.level)),
        Cell::text(record.raw_ref_token.clone()),
    ];
    if layout.fixity {
        match &record.fixity {
            Some(fixity) => {
                row.push(Cell::text(fixity.algorithm.label()));
                row.push(Cell::text(fixity.digest.clone()));
            }
            None => {
                row.push(Cell::Empty);
                row.push(Cell::Empty);
            }
        }
    }
    let parent_ref = set
        .parent_of(record)
        .map(|parent| parent.raw_ref_token.clone())
        .unwrap_or_else(|| "0".to_string());
    row.push(Cell::text(parent_ref));
    if layout.reference {
        row.push(
            record
                .final_reference
                .clone()
                .map(Cell::text)
                .unwrap_or(Cell::Empty),
        );
    }
    if layout.accession {
        row.push(record.accession_code.as_ref().map(Cell::from).unwrap_or(Cell::Empty));
    }
    row
}
