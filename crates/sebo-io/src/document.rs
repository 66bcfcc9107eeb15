//! Catalog document reader and writer
//!
//! A catalog document is stored as a single JSON file holding every sheet's
//! dimensions and cells (values plus bold/italic flags), the named ranges,
//! the active sheet, and the selected range. Cell positions use A1 notation
//! and dates are written as ISO `YYYY-MM-DD`, so the files diff cleanly
//! under version control.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use sebo_grid::{CellRange, CellRef, CellValue, RangeRef, Sheet, Spreadsheet, TextStyle};

use crate::error::{IoError, IoResult};

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Serialize, Deserialize)]
struct SpreadsheetDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    named_ranges: BTreeMap<String, String>,
    sheets: Vec<SheetDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SheetDoc {
    name: String,
    rows: u32,
    cols: u16,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    cells: Vec<CellDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CellDoc {
    /// Cell position in A1 notation
    at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<ValueDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "is_false")]
    bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    italic: bool,
}

/// JSON representation of a plain cell value. Dates travel in a separate
/// field so that text cells holding date-like strings stay text.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ValueDoc {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Catalog document reader
pub struct DocumentReader;

impl DocumentReader {
    /// Read a spreadsheet from a JSON document file
    pub fn read_file<P: AsRef<Path>>(path: P) -> IoResult<Spreadsheet> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a spreadsheet from a reader
    pub fn read<R: Read>(reader: R) -> IoResult<Spreadsheet> {
        let doc: SpreadsheetDoc = serde_json::from_reader(reader)?;
        Self::build(doc)
    }

    fn build(doc: SpreadsheetDoc) -> IoResult<Spreadsheet> {
        let mut ss = Spreadsheet::new();

        for sheet_doc in doc.sheets {
            let mut sheet = Sheet::new(&sheet_doc.name, sheet_doc.rows, sheet_doc.cols)?;
            for cell in sheet_doc.cells {
                let at = CellRef::parse(&cell.at)?;
                if cell.value.is_some() && cell.date.is_some() {
                    return Err(IoError::Document(format!(
                        "cell {}!{} has both a value and a date",
                        sheet_doc.name, cell.at
                    )));
                }
                let value = match (cell.value, cell.date) {
                    (_, Some(d)) => CellValue::Date(d),
                    (Some(ValueDoc::Bool(b)), _) => CellValue::Boolean(b),
                    (Some(ValueDoc::Number(n)), _) => CellValue::Number(n),
                    (Some(ValueDoc::Text(s)), _) => CellValue::Text(s),
                    (None, None) => CellValue::Empty,
                };
                sheet.set_value_at(at.row, at.col, value)?;

                let style = TextStyle::new()
                    .with_bold(cell.bold)
                    .with_italic(cell.italic);
                if !style.is_plain() {
                    sheet.set_style_at(at.row, at.col, style)?;
                }
            }
            ss.add_sheet(sheet)?;
        }

        for (name, target) in doc.named_ranges {
            ss.define_named_range(&name, RangeRef::parse(&target)?)?;
        }

        if let Some(name) = doc.active_sheet {
            let index = ss.sheet_index(&name).ok_or_else(|| {
                IoError::Document(format!("active sheet '{}' does not exist", name))
            })?;
            ss.set_active_sheet(index)?;
        }

        if let Some(sel) = doc.selection {
            ss.set_selection(CellRange::parse(&sel)?)?;
        }

        Ok(ss)
    }
}

/// Catalog document writer
pub struct DocumentWriter;

impl DocumentWriter {
    /// Write a spreadsheet to a JSON document file
    pub fn write_file<P: AsRef<Path>>(ss: &Spreadsheet, path: P) -> IoResult<()> {
        let file = File::create(path)?;
        Self::write(ss, BufWriter::new(file))
    }

    /// Write a spreadsheet to a writer
    pub fn write<W: Write>(ss: &Spreadsheet, writer: W) -> IoResult<()> {
        let doc = Self::to_doc(ss);
        serde_json::to_writer_pretty(writer, &doc)?;
        Ok(())
    }

    fn to_doc(ss: &Spreadsheet) -> SpreadsheetDoc {
        let sheets = ss
            .sheets()
            .map(|sheet| {
                let cells = sheet
                    .cells()
                    .map(|(at, cell)| {
                        let (value, date) = match &cell.value {
                            CellValue::Empty => (None, None),
                            CellValue::Boolean(b) => (Some(ValueDoc::Bool(*b)), None),
                            CellValue::Number(n) => (Some(ValueDoc::Number(*n)), None),
                            CellValue::Text(s) => (Some(ValueDoc::Text(s.clone())), None),
                            CellValue::Date(d) => (None, Some(*d)),
                        };
                        CellDoc {
                            at: at.to_a1(),
                            value,
                            date,
                            bold: cell.style.bold,
                            italic: cell.style.italic,
                        }
                    })
                    .collect();
                SheetDoc {
                    name: sheet.name().to_string(),
                    rows: sheet.row_count(),
                    cols: sheet.col_count(),
                    cells,
                }
            })
            .collect();

        SpreadsheetDoc {
            active_sheet: ss.active_sheet().map(|s| s.name().to_string()),
            selection: ss.selection().map(|sel| sel.to_a1()),
            named_ranges: ss
                .named_ranges()
                .map(|(name, target)| (name.to_string(), target.to_string()))
                .collect(),
            sheets,
        }
    }
}
