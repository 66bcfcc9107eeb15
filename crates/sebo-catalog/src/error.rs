//! Error types for catalog operations.

use thiserror::Error;

/// Errors raised while working with catalog rows, records and autofill.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The first column of a selected row does not hold a valid SKU.
    #[error("no valid SKU in the first column of row {0}")]
    InvalidIdentity(u32),

    /// No empty first-column cell is left to allocate a row in.
    #[error("sheet {0} has no empty row left")]
    SheetFull(String),

    /// A column title is missing from a sheet's header row.
    #[error("sheet {sheet} has no column titled {column}")]
    ColumnNotFound { sheet: String, column: String },

    /// The column holds computed values and rejects writes.
    #[error("column {column} of sheet {sheet} is locked")]
    LockedColumn { sheet: String, column: String },

    /// The header row can never be materialized as a data row.
    #[error("row {0} is reserved for headers")]
    ReservedRow(u32),

    /// More cell values were supplied than the sheet has columns.
    #[error("sheet {sheet} has {columns} columns but {given} values were given")]
    TooManyValues {
        sheet: String,
        given: usize,
        columns: usize,
    },

    /// A record was opened over an empty list of sheets.
    #[error("a record needs at least one sheet")]
    NoSheets,

    /// A selection-driven operation found nothing selected.
    #[error("nothing is selected")]
    NoSelection,

    /// The product type is empty and no guess could be made for it.
    #[error("cannot determine the type of product {0}")]
    TypeUndetermined(u32),

    /// The declared product type has no autofill support.
    #[error("product {sku} has unsupported type {declared}")]
    TypeUnsupported { sku: u32, declared: String },

    /// A formatter rule names a transform that does not exist.
    #[error("unknown transform {0}")]
    UnknownTransform(String),

    /// A formatter rule has no sheet and the formatter has no default.
    #[error("rule for column {0} has no sheet to read from")]
    RuleWithoutSheet(String),

    /// A named range required by the catalog is not defined.
    #[error("named range {0} is not defined")]
    NamedRangeNotFound(String),

    /// A key-value named range must be exactly two columns wide.
    #[error("named range {name} is {cols} columns wide, expected 2")]
    NamedRangeShape { name: String, cols: u16 },

    /// An underlying grid operation failed.
    #[error("grid error: {0}")]
    Grid(#[from] sebo_grid::Error),
}

impl Error {
    /// Whether this error is tied to one product's data rather than to the
    /// program itself.
    ///
    /// Batched operations report data errors per product and carry on with
    /// the next one; any other error aborts the batch.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidIdentity(_)
                | Error::SheetFull(_)
                | Error::ColumnNotFound { .. }
                | Error::TypeUndetermined(_)
                | Error::TypeUnsupported { .. }
        )
    }
}

/// Convenience alias for catalog results.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_error_classification() {
        assert!(Error::InvalidIdentity(3).is_data_error());
        assert!(Error::SheetFull("Básico".into()).is_data_error());
        assert!(Error::TypeUndetermined(12).is_data_error());
        assert!(Error::TypeUnsupported {
            sku: 12,
            declared: "CD".into(),
        }
        .is_data_error());
        assert!(Error::ColumnNotFound {
            sheet: "Básico".into(),
            column: "Título".into(),
        }
        .is_data_error());

        assert!(!Error::UnknownTransform("capitalize".into()).is_data_error());
        assert!(!Error::ReservedRow(1).is_data_error());
        assert!(!Error::NoSheets.is_data_error());
        assert!(!Error::Grid(sebo_grid::Error::SheetNotFound("X".into())).is_data_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::InvalidIdentity(7).to_string(),
            "no valid SKU in the first column of row 7"
        );
        assert_eq!(
            Error::NamedRangeShape {
                name: "Partes".into(),
                cols: 3,
            }
            .to_string(),
            "named range Partes is 3 columns wide, expected 2"
        );
    }
}
