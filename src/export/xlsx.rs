//! Excel renderer built on `rust_xlsxwriter`; the workbook is assembled in memory.

use super::{CatalogueTable, Cell, RenderError, Renderer};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxRenderer;

impl XlsxRenderer {
    fn build(&self, table: &CatalogueTable) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let datetime_format = Format::new().set_num_format(DATETIME_FORMAT);

        let worksheet = workbook.add_worksheet();
        for (col, header) in table.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, column(col)?, header, &header_format)?;
        }

        for (index, row) in table.rows.iter().enumerate() {
            let row_number = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in row.iter().enumerate() {
                let col = column(col)?;
                match cell {
                    Cell::Empty => {}
                    Cell::Text(s) => {
                        worksheet.write_string(row_number, col, s)?;
                    }
                    Cell::Integer(n) => {
                        worksheet.write_number(row_number, col, *n as f64)?;
                    }
                    Cell::Timestamp(t) => {
                        worksheet.write_datetime_with_format(
                            row_number,
                            col,
                            &t.naive_local(),
                            &datetime_format,
                        )?;
                    }
                }
            }
        }

        workbook.save_to_buffer()
    }
}

fn column(index: usize) -> Result<u16, XlsxError> {
    u16::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

impl Renderer for XlsxRenderer {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, table: &CatalogueTable) -> Result<Vec<u8>, RenderError> {
        Ok(self.build(table)?)
    }
}
