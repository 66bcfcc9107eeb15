//! CSV export
//!
//! Writes a single sheet's data extent as CSV, one record per row, using
//! each cell's rendered text. Styles and locked-column markers do not
//! survive a CSV export; the JSON document format is the one that round-trips.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use sebo_grid::Sheet;

use crate::error::IoResult;

/// Options for CSV export
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
        }
    }
}

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a sheet to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        sheet: &Sheet,
        path: P,
        options: &CsvWriteOptions,
    ) -> IoResult<()> {
        let file = File::create(path)?;
        Self::write(sheet, file, options)
    }

    /// Write a sheet to a writer
    pub fn write<W: Write>(sheet: &Sheet, writer: W, options: &CsvWriteOptions) -> IoResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .from_writer(writer);

        let last_row = sheet.last_row();
        let last_col = sheet.last_col();

        for row in 1..=last_row {
            let mut record = Vec::with_capacity(last_col as usize);
            for col in 1..=last_col {
                record.push(sheet.value_at(row, col).to_string());
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sebo_grid::CellValue;

    #[test]
    fn test_writes_data_extent() {
        let mut sheet = Sheet::new("Básico", 100, 10).unwrap();
        sheet.set_value_at(1, 1, "SKU").unwrap();
        sheet.set_value_at(1, 2, "Título").unwrap();
        sheet.set_value_at(2, 1, 12).unwrap();
        sheet.set_value_at(2, 2, "Olá, mundo").unwrap();

        let mut out = Vec::new();
        CsvWriter::write(&sheet, &mut out, &CsvWriteOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "SKU,Título\r\n12,\"Olá, mundo\"\r\n");
    }

    #[test]
    fn test_empty_sheet_writes_nothing() {
        let sheet = Sheet::new("Vazia", 10, 10).unwrap();
        let mut out = Vec::new();
        CsvWriter::write(&sheet, &mut out, &CsvWriteOptions::default()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_gap_cells_render_blank() {
        let mut sheet = Sheet::new("X", 10, 10).unwrap();
        sheet.set_value_at(1, 1, "a").unwrap();
        sheet.set_value_at(3, 3, CellValue::Number(1.5)).unwrap();

        let mut out = Vec::new();
        CsvWriter::write(&sheet, &mut out, &CsvWriteOptions::default()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "a,,\r\n,,\r\n,,1.5\r\n");
    }
}
