//! Error types for table loading and export.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when building, loading or exporting a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file does not exist.
    #[error("table file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Failed to read a table file.
    #[error("failed to read table {path}: {source}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write a table file.
    #[error("failed to write table {path}: {source}")]
    Write {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Malformed delimited text.
    #[error("failed to parse {path}: {source}")]
    Csv {
        /// Path to the file.
        path: PathBuf,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Malformed JSON table.
    #[error("failed to parse {path}: {source}")]
    Json {
        /// Path to the file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The file has no header row or no columns.
    #[error("table {path} is empty")]
    Empty {
        /// Path to the file.
        path: PathBuf,
    },

    /// The file extension is not a supported table format.
    #[error("unsupported table format: {path} (expected .csv, .tsv or .json)")]
    UnsupportedFormat {
        /// Path to the file.
        path: PathBuf,
    },

    /// Columns of a table have different lengths.
    #[error("column '{column}' has {found} cells, expected {expected}")]
    RaggedColumns {
        /// Name of the offending column.
        column: String,
        /// Row count of the first column.
        expected: usize,
        /// Row count of the offending column.
        found: usize,
    },

    /// Two columns share a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
}
