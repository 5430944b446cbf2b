//! Error types for the data-loader crate.
//!
//! Every failure of the dataset store is propagated to the caller unchanged;
//! nothing here is retried or translated into a partial result.

use thiserror::Error;

/// Errors that can occur while reading, validating or writing the course datasets
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader or writer rejected the data
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Row in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A required header is absent from a data file
    #[error("Missing column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// The similarity matrix is ragged or not square
    #[error("Similarity matrix must be square: row {row} has {found} values, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two document indices claim the same course id
    #[error("Course id {doc_id} is mapped to both doc_index {first} and doc_index {second}")]
    DuplicateDocId {
        doc_id: String,
        first: usize,
        second: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
