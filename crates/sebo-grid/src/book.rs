//! Spreadsheet type - the top-level document structure

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::range::{CellRange, CellRef, RangeRef};
use crate::sheet::Sheet;
use crate::MAX_SHEET_NAME_LEN;

/// A spreadsheet document: an ordered list of sheets plus document state.
///
/// The document tracks which sheet is active and, on the active sheet, an
/// optional selected range. Both travel with the document when it is saved,
/// so a "jump to" operation performed by one tool is visible to the next.
#[derive(Debug, Clone, Default)]
pub struct Spreadsheet {
    /// Sheets in document order
    sheets: Vec<Sheet>,
    /// Index of the active sheet
    active: usize,
    /// Selected range on the active sheet
    selection: Option<CellRange>,
    /// Named ranges, by name
    named_ranges: BTreeMap<String, RangeRef>,
}

impl Spreadsheet {
    /// Create an empty spreadsheet with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the spreadsheet has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Get a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Get a mutable sheet by name
    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name() == name)
    }

    /// Get the index of a sheet by name
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        self.sheets.iter().position(|s| s.name() == name)
    }

    /// Iterate over all sheets in document order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Add a sheet at the end of the document
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        self.validate_sheet_name(sheet.name())?;
        let index = self.sheets.len();
        self.sheets.push(sheet);
        Ok(index)
    }

    // === Active sheet and selection ===

    /// Get the active sheet, if the document has any sheets
    pub fn active_sheet(&self) -> Option<&Sheet> {
        self.sheets.get(self.active)
    }

    /// Get a mutable reference to the active sheet
    pub fn active_sheet_mut(&mut self) -> Option<&mut Sheet> {
        self.sheets.get_mut(self.active)
    }

    /// Get the index of the active sheet
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Make the sheet at `index` active. Switching sheets drops the selection.
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.sheets.len() {
            return Err(Error::SheetIndexOutOfBounds(index, self.sheets.len()));
        }
        if index != self.active {
            self.selection = None;
        }
        self.active = index;
        Ok(())
    }

    /// Get the selected range on the active sheet, if any
    pub fn selection(&self) -> Option<CellRange> {
        self.selection
    }

    /// Select a range on the active sheet
    pub fn set_selection(&mut self, range: CellRange) -> Result<()> {
        let sheet = self
            .sheets
            .get(self.active)
            .ok_or(Error::SheetIndexOutOfBounds(self.active, 0))?;
        if range.start.row == 0 || range.end.row > sheet.row_count() {
            return Err(Error::RowOutOfBounds(range.end.row, sheet.row_count()));
        }
        if range.start.col == 0 || range.end.col > sheet.col_count() {
            return Err(Error::ColumnOutOfBounds(range.end.col, sheet.col_count()));
        }
        self.selection = Some(range);
        Ok(())
    }

    /// Select a single cell on the active sheet
    pub fn select_cell(&mut self, at: CellRef) -> Result<()> {
        self.set_selection(CellRange::single(at))
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    // === Named ranges ===

    /// Define a named range
    ///
    /// # Example
    /// ```
    /// use sebo_grid::{RangeRef, Sheet, Spreadsheet};
    ///
    /// let mut ss = Spreadsheet::new();
    /// ss.add_sheet(Sheet::new("Textos", 10, 2).unwrap()).unwrap();
    /// ss.define_named_range("Partes", RangeRef::parse("Textos!A1:B3").unwrap())
    ///     .unwrap();
    /// ```
    pub fn define_named_range(&mut self, name: &str, target: RangeRef) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidName("empty named range name".into()));
        }
        if self.sheet_by_name(&target.sheet).is_none() {
            return Err(Error::SheetNotFound(target.sheet));
        }
        if self.named_ranges.contains_key(name) {
            return Err(Error::DuplicateNamedRange(name.into()));
        }
        self.named_ranges.insert(name.to_string(), target);
        Ok(())
    }

    /// Look up a named range
    pub fn named_range(&self, name: &str) -> Option<&RangeRef> {
        self.named_ranges.get(name)
    }

    /// Iterate over all named ranges, sorted by name
    pub fn named_ranges(&self) -> impl Iterator<Item = (&str, &RangeRef)> {
        self.named_ranges.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        // These break sheet-qualified range notation
        const INVALID_CHARS: &[char] = &['!', '\''];
        for c in INVALID_CHARS {
            if name.contains(*c) {
                return Err(Error::InvalidSheetName(format!(
                    "sheet name cannot contain '{}'",
                    c
                )));
            }
        }

        // Duplicate names (case-insensitive)
        let name_lower = name.to_lowercase();
        if self
            .sheets
            .iter()
            .any(|s| s.name().to_lowercase() == name_lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::CellRange;

    fn book() -> Spreadsheet {
        let mut ss = Spreadsheet::new();
        ss.add_sheet(Sheet::new("Básico", 10, 5).unwrap()).unwrap();
        ss.add_sheet(Sheet::new("Impressos", 10, 5).unwrap()).unwrap();
        ss
    }

    #[test]
    fn test_add_and_lookup() {
        let ss = book();
        assert_eq!(ss.sheet_count(), 2);
        assert_eq!(ss.sheet(0).unwrap().name(), "Básico");
        assert_eq!(ss.sheet_by_name("Impressos").unwrap().name(), "Impressos");
        assert_eq!(ss.sheet_index("Impressos"), Some(1));
        assert!(ss.sheet_by_name("Shopee").is_none());
    }

    #[test]
    fn test_sheet_name_validation() {
        let mut ss = book();
        assert!(matches!(
            ss.add_sheet(Sheet::new("", 5, 5).unwrap()),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(matches!(
            ss.add_sheet(Sheet::new("a!b", 5, 5).unwrap()),
            Err(Error::InvalidSheetName(_))
        ));
        assert!(matches!(
            ss.add_sheet(Sheet::new("básico", 5, 5).unwrap()),
            Err(Error::DuplicateSheetName(_))
        ));
    }

    #[test]
    fn test_active_sheet_and_selection() {
        let mut ss = book();
        assert_eq!(ss.active_sheet().unwrap().name(), "Básico");

        ss.select_cell(CellRef::new(3, 1)).unwrap();
        assert_eq!(
            ss.selection(),
            Some(CellRange::single(CellRef::new(3, 1)))
        );

        ss.set_selection(CellRange::parse("A2:A5").unwrap()).unwrap();
        assert_eq!(ss.selection(), Some(CellRange::parse("A2:A5").unwrap()));

        // Switching sheets drops the selection
        ss.set_active_sheet(1).unwrap();
        assert_eq!(ss.active_sheet().unwrap().name(), "Impressos");
        assert_eq!(ss.selection(), None);

        assert!(ss.set_active_sheet(5).is_err());
        assert!(ss.select_cell(CellRef::new(99, 1)).is_err());
        assert!(ss.set_selection(CellRange::parse("A1:F1").unwrap()).is_err());
    }

    #[test]
    fn test_selection_requires_sheets() {
        let mut ss = Spreadsheet::new();
        assert!(ss.active_sheet().is_none());
        assert!(ss.select_cell(CellRef::new(1, 1)).is_err());
    }

    #[test]
    fn test_named_ranges() {
        let mut ss = book();
        let target = RangeRef::new("Básico", CellRange::parse("A1:B3").unwrap());
        ss.define_named_range("Partes", target.clone()).unwrap();

        assert_eq!(ss.named_range("Partes"), Some(&target));
        assert!(ss.named_range("partes").is_none()); // case-sensitive
        assert!(matches!(
            ss.define_named_range("Partes", target.clone()),
            Err(Error::DuplicateNamedRange(_))
        ));

        let missing = RangeRef::new("Nada", CellRange::parse("A1").unwrap());
        assert!(matches!(
            ss.define_named_range("Outro", missing),
            Err(Error::SheetNotFound(_))
        ));
    }
}
