//! I/O error types

use thiserror::Error;

/// Result type for document I/O operations
pub type IoResult<T> = std::result::Result<T, IoError>;

/// Errors that can occur while reading or writing catalog documents
#[derive(Debug, Error)]
pub enum IoError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Grid error while rebuilding the document
    #[error("Grid error: {0}")]
    Grid(#[from] sebo_grid::Error),

    /// A structurally valid file that doesn't describe a valid document
    #[error("Invalid document: {0}")]
    Document(String),

    /// File extension is not one the library can handle
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}
