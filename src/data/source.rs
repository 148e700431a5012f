//! The row-access contract the grid requires from its data source.
//!
//! The grid never awaits data. It asks for a row synchronously and accepts
//! "not loaded" as an answer; fetching happens elsewhere and shows up on a
//! later render.

use crate::data::error::DataResult;
use crate::types::Row;

/// Synchronous-lookup, asynchronously-populated row source.
///
/// `get_row` must be cheap for already-resolved indices. Returning `None`
/// means the row is not loaded yet; implementations may start a background
/// fetch as a side effect.
pub trait RowSource: Send + Sync {
    /// Number of rows in the dataset
    fn total_rows(&self) -> usize;

    /// Row at `index`, or `None` while it is not loaded
    fn get_row(&self, index: usize) -> Option<Row>;

    /// Record a committed cell edit. The source owns optimistic update and
    /// persistence.
    fn edit_cell(&self, row_index: usize, column_key: &str, new_value: String);

    /// Whether the source takes edits at all. A source without an edit
    /// handler makes every column read-only.
    fn accepts_edits(&self) -> bool {
        true
    }
}

/// Loads a contiguous range of rows. This is the asynchronous side of a row
/// cache: the host decides when it runs.
pub trait PageFetcher: Send + Sync {
    fn total_rows(&self) -> usize;

    fn fetch_rows(&self, start: usize, count: usize) -> DataResult<Vec<Row>>;
}

/// In-memory rows, used for small tables and tests
#[derive(Clone, Debug, Default)]
pub struct MemoryPages {
    rows: Vec<Row>,
}

impl MemoryPages {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl PageFetcher for MemoryPages {
    fn total_rows(&self) -> usize {
        self.rows.len()
    }

    fn fetch_rows(&self, start: usize, count: usize) -> DataResult<Vec<Row>> {
        let end = (start + count).min(self.rows.len());
        if start >= end {
            return Ok(Vec::new());
        }
        Ok(self.rows[start..end].to_vec())
    }
}
