//! Error types for row-source and settings operations
//!
//! Provides unified error handling for page fetching, frame loading and
//! settings I/O.

use thiserror::Error;

/// Errors that can occur while loading data for the grid
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A page was requested past the end of the dataset
    #[error("Page {page} out of range ({total_rows} rows)")]
    PageOutOfRange { page: usize, total_rows: usize },

    /// No columns found in data
    #[error("No columns found")]
    NoColumns,
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
