//! JSON renderer: an object keyed by row index, each row an object keyed by column.

use super::{CatalogueTable, Cell, RenderError, Renderer};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

fn cell_value(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Integer(n) => Value::from(*n),
        Cell::Timestamp(t) => Value::String(t.to_rfc3339_opts(SecondsFormat::Millis, false)),
    }
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, table: &CatalogueTable) -> Result<Vec<u8>, RenderError> {
        let mut document = Map::with_capacity(table.rows.len());
        for (index, row) in table.rows.iter().enumerate() {
            let object: Map<String, Value> = table
                .headers
                .iter()
                .zip(row)
                .map(|(header, cell)| (header.clone(), cell_value(cell)))
                .collect();
            document.insert(index.to_string(), Value::Object(object));
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        Value::Object(document).serialize(&mut serializer)?;
        Ok(out)
    }
}
