//! # sebo-grid
//!
//! In-memory spreadsheet grid for the sebo catalog tools.
//!
//! This crate provides the document model the catalog logic runs against:
//! - [`CellValue`] - Cell values (text, numbers, booleans, dates)
//! - [`CellRef`], [`CellRange`], [`RangeRef`] - 1-based A1 addressing
//! - [`TextStyle`] - The bold/italic markers catalog rules read
//! - [`Sheet`], [`Spreadsheet`] - The document structures
//!
//! ## Example
//!
//! ```rust
//! use sebo_grid::{CellValue, Sheet, Spreadsheet};
//!
//! let mut ss = Spreadsheet::new();
//! ss.add_sheet(Sheet::new("Básico", 100, 10).unwrap()).unwrap();
//!
//! let sheet = ss.sheet_by_name_mut("Básico").unwrap();
//! sheet.set_value("A1", "SKU").unwrap();
//! sheet.set_value_at(2, 1, 12).unwrap();
//!
//! assert_eq!(sheet.value_at(2, 1).to_string(), "12");
//! ```

pub mod book;
pub mod cell;
pub mod error;
pub mod range;
pub mod sheet;
pub mod style;

// Re-exports for convenience
pub use book::Spreadsheet;
pub use cell::{Cell, CellValue};
pub use error::{Error, Result};
pub use range::{CellRange, CellRef, RangeRef};
pub use sheet::{MatchMode, Sheet};
pub use style::TextStyle;

/// Maximum number of rows in a sheet
pub const MAX_ROWS: u32 = 1_000_000;

/// Maximum number of columns in a sheet (A through ZZZ)
pub const MAX_COLS: u16 = 18_278;

/// Maximum length of a sheet name, in characters
pub const MAX_SHEET_NAME_LEN: usize = 100;
