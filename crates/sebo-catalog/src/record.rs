//! One product's rows across several sheets
//!
//! A product is identified by the value of each sheet's first column (the
//! SKU). [`MultiSheetRow`] gathers the product's row from every sheet it
//! lives on, allocating a fresh row wherever the product has none yet, and
//! saves them all in one go.

use std::collections::HashMap;

use sebo_grid::{CellValue, Spreadsheet};

use crate::error::{Error, Result};
use crate::row::Row;

/// A product record spanning one row per sheet.
#[derive(Debug, Clone)]
pub struct MultiSheetRow {
    /// The identity value as rendered text
    key: String,
    /// Sheets in declaration order; save flushes in this order
    sheet_names: Vec<String>,
    /// The per-sheet rows
    rows: HashMap<String, Row>,
}

impl MultiSheetRow {
    /// Look up or allocate one row per sheet for `identity`.
    ///
    /// Per sheet, the row whose first column renders as the identity is
    /// used if it exists; otherwise the first free data row is claimed and
    /// its first column set to the identity (in cache; the grid changes on
    /// [`save`](Self::save)). Fails with [`Error::SheetFull`] when a sheet
    /// has no free data row left, and with [`Error::NoSheets`] when `sheets`
    /// is empty.
    pub fn open<V: Into<CellValue>>(
        ss: &Spreadsheet,
        identity: V,
        sheets: &[&str],
    ) -> Result<Self> {
        if sheets.is_empty() {
            return Err(Error::NoSheets);
        }
        let identity = identity.into();
        let key = identity.to_string();

        let mut sheet_names = Vec::with_capacity(sheets.len());
        let mut rows = HashMap::with_capacity(sheets.len());
        for &sheet in sheets {
            let row = match Row::find_by_key(ss, sheet, &key)? {
                Some(row) => row,
                None => {
                    let mut row = Row::find_first_empty(ss, sheet)?
                        .ok_or_else(|| Error::SheetFull(sheet.to_string()))?;
                    row.set_many(std::slice::from_ref(&identity))?;
                    tracing::debug!(
                        "Claimed row {} of sheet {:?} for {:?}",
                        row.row_no(),
                        sheet,
                        key
                    );
                    row
                }
            };
            sheet_names.push(sheet.to_string());
            rows.insert(sheet.to_string(), row);
        }

        Ok(Self {
            key,
            sheet_names,
            rows,
        })
    }

    /// The identity value as rendered text
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The record's row on `sheet`
    pub fn row(&self, sheet: &str) -> Result<&Row> {
        self.rows
            .get(sheet)
            .ok_or_else(|| sebo_grid::Error::SheetNotFound(sheet.to_string()).into())
    }

    /// Get the cached value of `column` on `sheet`
    pub fn get(&self, sheet: &str, column: &str) -> Result<&CellValue> {
        self.row(sheet)?.get(column)
    }

    /// Get the cached value of `column` on `sheet` as rendered text
    pub fn text(&self, sheet: &str, column: &str) -> Result<String> {
        self.row(sheet)?.text(column)
    }

    /// Write `value` into the cached `column` cell on `sheet`
    pub fn set<V: Into<CellValue>>(&mut self, sheet: &str, column: &str, value: V) -> Result<()> {
        let row = self
            .rows
            .get_mut(sheet)
            .ok_or_else(|| Error::from(sebo_grid::Error::SheetNotFound(sheet.to_string())))?;
        row.set(column, value)
    }

    /// True when any of the record's rows has unsaved writes
    pub fn is_dirty(&self) -> bool {
        self.rows.values().any(Row::is_dirty)
    }

    /// Flush every row back to the grid, in sheet declaration order
    pub fn save(&mut self, ss: &mut Spreadsheet) -> Result<()> {
        for sheet in &self.sheet_names {
            if let Some(row) = self.rows.get_mut(sheet) {
                row.save(ss)?;
            }
        }
        Ok(())
    }
}

/// Read a two-column named range into a key -> text map.
///
/// The first column holds keys, the second the text for each key. Rows with
/// a blank key are padding and are skipped; a duplicated key keeps its last
/// row's text.
pub fn two_column_map(ss: &Spreadsheet, name: &str) -> Result<HashMap<String, String>> {
    let target = ss
        .named_range(name)
        .ok_or_else(|| Error::NamedRangeNotFound(name.to_string()))?;
    if target.range.col_count() != 2 {
        return Err(Error::NamedRangeShape {
            name: name.to_string(),
            cols: target.range.col_count(),
        });
    }

    let sheet = ss
        .sheet_by_name(&target.sheet)
        .ok_or_else(|| sebo_grid::Error::SheetNotFound(target.sheet.clone()))?;

    let mut map = HashMap::new();
    for line in sheet.read_range(&target.range)? {
        let key = line[0].to_string();
        if key.is_empty() {
            continue;
        }
        map.insert(key, line[1].to_string());
    }
    Ok(map)
}
