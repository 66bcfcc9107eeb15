//! Error types for grid operations.

use thiserror::Error;

/// Errors that can occur when manipulating a spreadsheet grid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A cell reference could not be parsed ("B7", "AA12", ...).
    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    /// A range reference could not be parsed ("A1:B3", "Textos!A1:B3", ...).
    #[error("Invalid range reference: {0}")]
    InvalidRange(String),

    /// A row index is outside the sheet's dimensions.
    #[error("Row {0} out of bounds (sheet has {1} rows)")]
    RowOutOfBounds(u32, u32),

    /// A column index is outside the sheet's dimensions.
    #[error("Column {0} out of bounds (sheet has {1} columns)")]
    ColumnOutOfBounds(u16, u16),

    /// A range does not fit inside the sheet's dimensions.
    #[error("Range {0} out of bounds (sheet is {1} rows x {2} columns)")]
    RangeOutOfBounds(String, u32, u16),

    /// A value matrix does not match the shape of the range it is written to.
    #[error("Value matrix is {got_rows}x{got_cols} but range {range} is {want_rows}x{want_cols}")]
    RangeShapeMismatch {
        range: String,
        want_rows: u32,
        want_cols: u16,
        got_rows: usize,
        got_cols: usize,
    },

    /// No sheet with the given name exists in the spreadsheet.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A sheet index is outside the spreadsheet's sheet list.
    #[error("Sheet index {0} out of bounds (spreadsheet has {1} sheets)")]
    SheetIndexOutOfBounds(usize, usize),

    /// A sheet with the same name already exists.
    #[error("Duplicate sheet name: {0}")]
    DuplicateSheetName(String),

    /// A sheet name is empty or contains characters the grid cannot address.
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// A named range with the same name already exists.
    #[error("Duplicate named range: {0}")]
    DuplicateNamedRange(String),

    /// A named range name is empty or malformed.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Sheet dimensions must be at least 1x1.
    #[error("Invalid sheet dimensions: {0} rows x {1} columns")]
    InvalidDimensions(u32, u16),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, Error>;
