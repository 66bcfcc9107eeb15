//! Header-keyed access to a single sheet row
//!
//! Catalog sheets put column labels in row 1 and one product per row below
//! it. [`Row`] loads one such row into memory and exposes its cells by
//! column label, so the sheet can be reorganized without touching code.
//! Writes go to the cache and are flushed by [`Row::save`] in a single
//! range write.

use std::collections::HashMap;

use sebo_grid::{CellRange, CellValue, MatchMode, Spreadsheet};

use crate::error::{Error, Result};

/// First data row; row 1 is the header.
pub const FIRST_DATA_ROW: u32 = 2;

/// A cached data row of one sheet, addressed by column label.
#[derive(Debug, Clone)]
pub struct Row {
    /// Sheet the row belongs to
    sheet: String,
    /// 1-based row number, always >= 2
    row_no: u32,
    /// Column labels from the header row, by offset
    header: Vec<String>,
    /// Label -> offset; first occurrence wins for duplicate labels
    index: HashMap<String, usize>,
    /// Cached cell values
    values: Vec<CellValue>,
    /// Offsets whose column is locked (italic header-to-bottom formula output)
    locked: Vec<bool>,
    /// Cache has writes the grid hasn't seen yet
    dirty: bool,
}

impl Row {
    /// Load row `row_no` of `sheet_name` into a cache.
    ///
    /// Reads the header row, the data row and the data row's text styles in
    /// three range reads. The row's width is the header's width; cells to
    /// the right of the last header label are invisible to the cache.
    pub fn load(ss: &Spreadsheet, sheet_name: &str, row_no: u32) -> Result<Self> {
        if row_no < FIRST_DATA_ROW {
            return Err(Error::ReservedRow(row_no));
        }
        let sheet = ss
            .sheet_by_name(sheet_name)
            .ok_or_else(|| sebo_grid::Error::SheetNotFound(sheet_name.to_string()))?;

        let width = sheet.last_col();
        if width == 0 {
            // Headerless sheet: an empty cache that can only report
            // ColumnNotFound
            return Ok(Self {
                sheet: sheet_name.to_string(),
                row_no,
                header: Vec::new(),
                index: HashMap::new(),
                values: Vec::new(),
                locked: Vec::new(),
                dirty: false,
            });
        }

        let header_range = CellRange::row(1, width);
        let header: Vec<String> = sheet
            .read_range(&header_range)?
            .remove(0)
            .into_iter()
            .map(|v| v.to_string())
            .collect();

        let mut index = HashMap::with_capacity(header.len());
        for (offset, label) in header.iter().enumerate() {
            index.entry(label.clone()).or_insert(offset);
        }

        let row_range = CellRange::from_indices(row_no, 1, row_no, width);
        let values = sheet.read_range(&row_range)?.remove(0);
        let locked = sheet
            .read_styles(&row_range)?
            .remove(0)
            .into_iter()
            .map(|style| style.italic)
            .collect();

        Ok(Self {
            sheet: sheet_name.to_string(),
            row_no,
            header,
            index,
            values,
            locked,
            dirty: false,
        })
    }

    /// Find the row whose first column renders exactly as `key`, scanning
    /// the data rows top to bottom.
    pub fn find_by_key(ss: &Spreadsheet, sheet_name: &str, key: &str) -> Result<Option<Self>> {
        let sheet = ss
            .sheet_by_name(sheet_name)
            .ok_or_else(|| sebo_grid::Error::SheetNotFound(sheet_name.to_string()))?;
        if sheet.row_count() < FIRST_DATA_ROW {
            return Ok(None);
        }

        let data_col = CellRange::from_indices(FIRST_DATA_ROW, 1, sheet.row_count(), 1);
        match sheet.find_text(&data_col, key, MatchMode::Exact) {
            Some(at) => Ok(Some(Self::load(ss, sheet_name, at.row)?)),
            None => Ok(None),
        }
    }

    /// Find the first data row whose first column is blank.
    pub fn find_first_empty(ss: &Spreadsheet, sheet_name: &str) -> Result<Option<Self>> {
        let sheet = ss
            .sheet_by_name(sheet_name)
            .ok_or_else(|| sebo_grid::Error::SheetNotFound(sheet_name.to_string()))?;

        for row_no in FIRST_DATA_ROW..=sheet.row_count() {
            if sheet.value_at(row_no, 1).is_empty() {
                return Ok(Some(Self::load(ss, sheet_name, row_no)?));
            }
        }
        Ok(None)
    }

    /// Name of the sheet the row belongs to
    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    /// 1-based row number
    pub fn row_no(&self) -> u32 {
        self.row_no
    }

    /// True when the cache holds writes the grid hasn't seen yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get the cached value of the `column` cell
    pub fn get(&self, column: &str) -> Result<&CellValue> {
        let offset = self.offset(column)?;
        Ok(&self.values[offset])
    }

    /// Get the cached value of the `column` cell as rendered text
    pub fn text(&self, column: &str) -> Result<String> {
        Ok(self.get(column)?.to_string())
    }

    /// True when the `column` cell is locked (formula-driven)
    pub fn is_locked(&self, column: &str) -> Result<bool> {
        let offset = self.offset(column)?;
        Ok(self.locked[offset])
    }

    /// Write `value` into the cached `column` cell.
    ///
    /// Fails with [`Error::LockedColumn`] when the column's values come from
    /// a sheet formula; hand-written values there would be overwritten or
    /// break the formula.
    pub fn set<V: Into<CellValue>>(&mut self, column: &str, value: V) -> Result<()> {
        let offset = self.offset(column)?;
        if self.locked[offset] {
            return Err(Error::LockedColumn {
                sheet: self.sheet.clone(),
                column: column.to_string(),
            });
        }
        self.values[offset] = value.into();
        self.dirty = true;
        Ok(())
    }

    /// Write values positionally from column 1, ignoring locked markers.
    ///
    /// This is how a freshly claimed row gets its identity cell filled; the
    /// locked-column blanking at save time still applies.
    pub fn set_many(&mut self, values: &[CellValue]) -> Result<()> {
        if values.len() > self.values.len() {
            return Err(Error::TooManyValues {
                sheet: self.sheet.clone(),
                given: values.len(),
                columns: self.values.len(),
            });
        }
        self.values[..values.len()].clone_from_slice(values);
        self.dirty = true;
        Ok(())
    }

    /// Flush the cache back to the grid in one range write.
    ///
    /// Locked columns are written as blanks no matter what the cache holds,
    /// leaving their formula-driven cells free to refill. No-op when the
    /// cache is clean.
    pub fn save(&mut self, ss: &mut Spreadsheet) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let width = self.values.len() as u16;
        if width == 0 {
            self.dirty = false;
            return Ok(());
        }

        let out: Vec<CellValue> = self
            .values
            .iter()
            .zip(&self.locked)
            .map(|(value, locked)| {
                if *locked {
                    CellValue::Empty
                } else {
                    value.clone()
                }
            })
            .collect();

        let sheet = ss
            .sheet_by_name_mut(&self.sheet)
            .ok_or_else(|| sebo_grid::Error::SheetNotFound(self.sheet.clone()))?;
        let range = CellRange::from_indices(self.row_no, 1, self.row_no, width);
        sheet.write_range(&range, &[out])?;

        tracing::debug!("Saved row {} of sheet {:?}", self.row_no, self.sheet);
        self.dirty = false;
        Ok(())
    }

    fn offset(&self, column: &str) -> Result<usize> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| Error::ColumnNotFound {
                sheet: self.sheet.clone(),
                column: column.to_string(),
            })
    }
}
