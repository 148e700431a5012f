//! Engine contract violations

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A cell edit reached a read-only grid. The UI hides every edit
    /// affordance in that state, so this is a caller bug.
    #[error("Cannot edit a read-only grid")]
    ReadOnlyEdit,

    /// A cell edit reached a grid whose row source takes no edits
    #[error("Row source does not accept edits")]
    EditsUnsupported,

    /// A header gesture named a column that does not exist
    #[error("Column {index} out of range ({count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}

pub type GridResult<T> = Result<T, GridError>;
