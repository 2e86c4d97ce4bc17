//! XML renderer: `<data><row><Column>value</Column>…</row>…</data>`.

use super::{CatalogueTable, RenderError, Renderer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlRenderer;

/// Column header as an XML element name: invalid characters become `_`.
pub fn element_name(header: &str) -> String {
    let mut name: String = header
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let starts_ok = name
        .chars()
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_');
    if !starts_ok {
        name.insert(0, '_');
    }
    name
}

impl Renderer for XmlRenderer {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn render(&self, table: &CatalogueTable) -> Result<Vec<u8>, RenderError> {
        let names: Vec<String> = table.headers.iter().map(|h| element_name(h)).collect();
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        writer.write_event(Event::Start(BytesStart::new("data")))?;
        for row in &table.rows {
            writer.write_event(Event::Start(BytesStart::new("row")))?;
            for (name, cell) in names.iter().zip(row) {
                if cell.is_empty() {
                    writer.write_event(Event::Empty(BytesStart::new(name.as_str())))?;
                    continue;
                }
                let text = cell.render();
                writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
            }
            writer.write_event(Event::End(BytesEnd::new("row")))?;
        }
        writer.write_event(Event::End(BytesEnd::new("data")))?;
        Ok(writer.into_inner())
    }
}
