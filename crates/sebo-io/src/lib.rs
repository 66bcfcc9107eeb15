//! # sebo-io
//!
//! Document persistence and CSV export for sebo catalog spreadsheets.
//!
//! Catalog documents live on disk as JSON (see [`document`]); individual
//! sheets can additionally be exported as CSV for marketplace bulk uploads.
//!
//! ## Example
//!
//! ```rust
//! use sebo_grid::{Sheet, Spreadsheet};
//! use sebo_io::{DocumentReader, DocumentWriter};
//!
//! let mut ss = Spreadsheet::new();
//! ss.add_sheet(Sheet::new("Básico", 100, 10).unwrap()).unwrap();
//!
//! let mut buf = Vec::new();
//! DocumentWriter::write(&ss, &mut buf).unwrap();
//! let reloaded = DocumentReader::read(buf.as_slice()).unwrap();
//! assert_eq!(reloaded.sheet_count(), 1);
//! ```

pub mod csv;
pub mod document;
pub mod error;

pub use crate::csv::{CsvWriteOptions, CsvWriter};
pub use document::{DocumentReader, DocumentWriter};
pub use error::{IoError, IoResult};

use std::path::Path;

use sebo_grid::Spreadsheet;

/// Extension trait adding file I/O to [`Spreadsheet`]
///
/// Dispatches on the file extension; `.json` is currently the only format
/// a whole document can be read from or saved to.
pub trait SpreadsheetExt: Sized {
    /// Open a document from a file
    fn open<P: AsRef<Path>>(path: P) -> IoResult<Self>;

    /// Save the document to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> IoResult<()>;
}

impl SpreadsheetExt for Spreadsheet {
    fn open<P: AsRef<Path>>(path: P) -> IoResult<Spreadsheet> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => DocumentReader::read_file(path),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("json") => DocumentWriter::write_file(self, path),
            _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
