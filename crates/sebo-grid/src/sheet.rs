//! Sheet type: a bounded grid of cells

use std::collections::BTreeMap;

use crate::cell::{Cell, CellValue};
use crate::error::{Error, Result};
use crate::range::{CellRange, CellRef};
use crate::style::TextStyle;
use crate::{MAX_COLS, MAX_ROWS};

/// How [`Sheet::find_text`] compares cell text against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// The cell's rendered text must equal the query exactly
    Exact,
    /// The cell's rendered text must contain the query
    Contains,
}

/// A single sheet: a named grid with fixed dimensions.
///
/// Storage is sparse; cells that were never written read back as
/// [`CellValue::Empty`] with a default style. Indices are 1-based.
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Number of rows the grid holds
    rows: u32,
    /// Number of columns the grid holds
    cols: u16,
    /// Cell storage, keyed by (row, col)
    cells: BTreeMap<(u32, u16), Cell>,
}

impl Sheet {
    /// Create a new sheet with the given name and dimensions
    pub fn new<S: Into<String>>(name: S, rows: u32, cols: u16) -> Result<Self> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(Error::InvalidDimensions(rows, cols));
        }
        Ok(Self {
            name: name.into(),
            rows,
            cols,
            cells: BTreeMap::new(),
        })
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows the grid holds (not the number of filled rows)
    pub fn row_count(&self) -> u32 {
        self.rows
    }

    /// Number of columns the grid holds
    pub fn col_count(&self) -> u16 {
        self.cols
    }

    // === Cell access ===

    /// Get the stored cell at (row, col), if one exists
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a cell value by reference string (e.g. "B7")
    pub fn value(&self, a1: &str) -> Result<CellValue> {
        let at = CellRef::parse(a1)?;
        Ok(self.value_at(at.row, at.col))
    }

    /// Get a cell value by indices. Unwritten cells read as empty.
    pub fn value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells
            .get(&(row, col))
            .map(|c| c.value.clone())
            .unwrap_or(CellValue::Empty)
    }

    /// Get a cell's text style by indices. Unwritten cells read as plain.
    pub fn style_at(&self, row: u32, col: u16) -> TextStyle {
        self.cells
            .get(&(row, col))
            .map(|c| c.style)
            .unwrap_or_default()
    }

    // === Cell modification ===

    /// Set a cell value by reference string
    pub fn set_value<V: Into<CellValue>>(&mut self, a1: &str, value: V) -> Result<()> {
        let at = CellRef::parse(a1)?;
        self.set_value_at(at.row, at.col, value)
    }

    /// Set a cell value by indices.
    ///
    /// Writing an empty value keeps the cell's style; a cell that ends up
    /// with no value and no style is dropped from storage.
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        self.check_position(row, col)?;
        let value = value.into();
        match self.cells.get_mut(&(row, col)) {
            Some(cell) => {
                cell.value = value;
                if cell.is_blank() {
                    self.cells.remove(&(row, col));
                }
            }
            None => {
                if !value.is_empty() {
                    self.cells.insert((row, col), Cell::new(value));
                }
            }
        }
        Ok(())
    }

    /// Set a cell's text style by indices, keeping its value
    pub fn set_style_at(&mut self, row: u32, col: u16, style: TextStyle) -> Result<()> {
        self.check_position(row, col)?;
        match self.cells.get_mut(&(row, col)) {
            Some(cell) => {
                cell.style = style;
                if cell.is_blank() {
                    self.cells.remove(&(row, col));
                }
            }
            None => {
                if !style.is_plain() {
                    self.cells.insert((row, col), Cell::styled(CellValue::Empty, style));
                }
            }
        }
        Ok(())
    }

    // === Range operations ===

    /// Read a rectangular block of values, row by row
    pub fn read_range(&self, range: &CellRange) -> Result<Vec<Vec<CellValue>>> {
        self.check_range(range)?;
        let mut out = Vec::with_capacity(range.row_count() as usize);
        for row in range.start.row..=range.end.row {
            let mut line = Vec::with_capacity(range.col_count() as usize);
            for col in range.start.col..=range.end.col {
                line.push(self.value_at(row, col));
            }
            out.push(line);
        }
        Ok(out)
    }

    /// Read a rectangular block of text styles, row by row
    pub fn read_styles(&self, range: &CellRange) -> Result<Vec<Vec<TextStyle>>> {
        self.check_range(range)?;
        let mut out = Vec::with_capacity(range.row_count() as usize);
        for row in range.start.row..=range.end.row {
            let mut line = Vec::with_capacity(range.col_count() as usize);
            for col in range.start.col..=range.end.col {
                line.push(self.style_at(row, col));
            }
            out.push(line);
        }
        Ok(out)
    }

    /// Write a rectangular block of values; the matrix shape must match the range
    pub fn write_range(&mut self, range: &CellRange, values: &[Vec<CellValue>]) -> Result<()> {
        self.check_range(range)?;

        let want_rows = range.row_count();
        let want_cols = range.col_count();
        let shape_error = |got_cols: usize| Error::RangeShapeMismatch {
            range: range.to_string(),
            want_rows,
            want_cols,
            got_rows: values.len(),
            got_cols,
        };

        if values.len() != want_rows as usize {
            return Err(shape_error(values.first().map_or(0, Vec::len)));
        }
        for line in values {
            if line.len() != want_cols as usize {
                return Err(shape_error(line.len()));
            }
        }

        for (i, row) in (range.start.row..=range.end.row).enumerate() {
            for (j, col) in (range.start.col..=range.end.col).enumerate() {
                self.set_value_at(row, col, values[i][j].clone())?;
            }
        }
        Ok(())
    }

    // === Extents ===

    /// Last row holding a non-empty value (0 when the sheet has none)
    pub fn last_row(&self) -> u32 {
        self.cells
            .iter()
            .filter(|(_, c)| !c.value.is_empty())
            .map(|((row, _), _)| *row)
            .max()
            .unwrap_or(0)
    }

    /// Last column holding a non-empty value (0 when the sheet has none)
    pub fn last_col(&self) -> u16 {
        self.cells
            .iter()
            .filter(|(_, c)| !c.value.is_empty())
            .map(|((_, col), _)| *col)
            .max()
            .unwrap_or(0)
    }

    // === Search ===

    /// Find the first cell in `range` whose rendered text matches `query`,
    /// scanning row by row. The range is clipped to the sheet's dimensions.
    pub fn find_text(&self, range: &CellRange, query: &str, mode: MatchMode) -> Option<CellRef> {
        let end_row = range.end.row.min(self.rows);
        let end_col = range.end.col.min(self.cols);
        if range.start.row == 0 || range.start.col == 0 {
            return None;
        }

        for row in range.start.row..=end_row {
            for col in range.start.col..=end_col {
                let text = self.value_at(row, col).to_string();
                let hit = match mode {
                    MatchMode::Exact => text == query,
                    MatchMode::Contains => text.contains(query),
                };
                if hit {
                    return Some(CellRef::new(row, col));
                }
            }
        }
        None
    }

    /// Iterate over all stored cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells
            .iter()
            .map(|((row, col), cell)| (CellRef::new(*row, *col), cell))
    }

    fn check_position(&self, row: u32, col: u16) -> Result<()> {
        if row == 0 || row > self.rows {
            return Err(Error::RowOutOfBounds(row, self.rows));
        }
        if col == 0 || col > self.cols {
            return Err(Error::ColumnOutOfBounds(col, self.cols));
        }
        Ok(())
    }

    fn check_range(&self, range: &CellRange) -> Result<()> {
        if range.start.row == 0
            || range.start.col == 0
            || range.end.row > self.rows
            || range.end.col > self.cols
        {
            return Err(Error::RangeOutOfBounds(
                range.to_string(),
                self.rows,
                self.cols,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Sheet {
        Sheet::new("Teste", 10, 5).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_dimensions() {
        assert!(Sheet::new("X", 0, 5).is_err());
        assert!(Sheet::new("X", 5, 0).is_err());
        assert!(Sheet::new("X", 5, 5).is_ok());
    }

    #[test]
    fn test_set_and_get() {
        let mut s = sheet();
        s.set_value_at(2, 1, "Olá").unwrap();
        s.set_value_at(2, 2, 42).unwrap();

        assert_eq!(s.value_at(2, 1), CellValue::Text("Olá".into()));
        assert_eq!(s.value_at(2, 2), CellValue::Number(42.0));
        assert_eq!(s.value_at(3, 1), CellValue::Empty);
        assert_eq!(s.value("B2").unwrap(), CellValue::Number(42.0));
    }

    #[test]
    fn test_bounds_checks() {
        let mut s = sheet();
        assert!(s.set_value_at(0, 1, "x").is_err());
        assert!(s.set_value_at(11, 1, "x").is_err());
        assert!(s.set_value_at(1, 6, "x").is_err());
        // Reads are forgiving
        assert_eq!(s.value_at(99, 99), CellValue::Empty);
    }

    #[test]
    fn test_empty_write_keeps_style() {
        let mut s = sheet();
        s.set_value_at(2, 3, "gerado").unwrap();
        s.set_style_at(2, 3, TextStyle::new().with_italic(true)).unwrap();

        // Blanking the value must not clear the italic marker
        s.set_value_at(2, 3, CellValue::Empty).unwrap();
        assert_eq!(s.value_at(2, 3), CellValue::Empty);
        assert!(s.style_at(2, 3).italic);

        // A fully blank cell is dropped from storage
        s.set_style_at(2, 3, TextStyle::default()).unwrap();
        assert!(s.cell_at(2, 3).is_none());
    }

    #[test]
    fn test_read_write_range() {
        let mut s = sheet();
        let range = CellRange::parse("A1:C2").unwrap();
        let values = vec![
            vec!["SKU".into(), "Título".into(), "Preço".into()],
            vec![CellValue::Number(1.0), "Olá".into(), CellValue::Empty],
        ];
        s.write_range(&range, &values).unwrap();

        assert_eq!(s.read_range(&range).unwrap(), values);
        assert_eq!(s.value_at(2, 2), CellValue::Text("Olá".into()));
    }

    #[test]
    fn test_write_range_shape_mismatch() {
        let mut s = sheet();
        let range = CellRange::parse("A1:B1").unwrap();
        let too_wide = vec![vec!["a".into(), "b".into(), "c".into()]];
        let err = s.write_range(&range, &too_wide).unwrap_err();
        assert!(matches!(err, Error::RangeShapeMismatch { .. }));
    }

    #[test]
    fn test_range_out_of_bounds() {
        let s = sheet();
        let range = CellRange::parse("A1:F1").unwrap(); // 6 columns, sheet has 5
        assert!(s.read_range(&range).is_err());
    }

    #[test]
    fn test_extents() {
        let mut s = sheet();
        assert_eq!(s.last_row(), 0);
        assert_eq!(s.last_col(), 0);

        s.set_value_at(3, 2, "x").unwrap();
        s.set_value_at(7, 4, "y").unwrap();
        // Styled-but-empty cells don't extend the data extent
        s.set_style_at(9, 5, TextStyle::new().with_italic(true)).unwrap();

        assert_eq!(s.last_row(), 7);
        assert_eq!(s.last_col(), 4);
    }

    #[test]
    fn test_find_text() {
        let mut s = sheet();
        s.set_value_at(2, 1, 10).unwrap();
        s.set_value_at(3, 1, 101).unwrap();
        s.set_value_at(4, 1, "Dom Casmurro").unwrap();

        let col = CellRange::column(1, s.row_count());
        assert_eq!(
            s.find_text(&col, "101", MatchMode::Exact),
            Some(CellRef::new(3, 1))
        );
        // Contains matches "10" inside "101"... but "10" itself comes first
        assert_eq!(
            s.find_text(&col, "10", MatchMode::Contains),
            Some(CellRef::new(2, 1))
        );
        assert_eq!(
            s.find_text(&col, "Casmurro", MatchMode::Contains),
            Some(CellRef::new(4, 1))
        );
        assert_eq!(s.find_text(&col, "Quincas", MatchMode::Contains), None);
    }

    #[test]
    fn test_find_text_scan_order() {
        let mut s = sheet();
        s.set_value_at(1, 2, "alvo").unwrap();
        s.set_value_at(2, 1, "alvo").unwrap();

        let all = CellRange::from_indices(1, 1, s.row_count(), s.col_count());
        // Row-major: B1 comes before A2
        assert_eq!(
            s.find_text(&all, "alvo", MatchMode::Exact),
            Some(CellRef::new(1, 2))
        );
    }
}
