//! Display model for a column reorder history.
//!
//! The history arrives as a JSON array of reorder payloads. Each entry is
//! shown with its 1-based step number and spreadsheet letters for the
//! source and target positions.

use crate::data::DataResult;
use crate::grid::columns::letter_for;
use crate::grid::intent::ReorderInfo;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReorderHistoryRow {
    pub number: usize,
    pub column: String,
    pub from: String,
    pub to: String,
}

/// Parse a stored history. A blank string is an empty history.
pub fn parse_reorder_history(json: &str) -> DataResult<Vec<ReorderInfo>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}

pub fn history_rows(history: &[ReorderInfo]) -> Vec<ReorderHistoryRow> {
    history
        .iter()
        .enumerate()
        .map(|(i, step)| ReorderHistoryRow {
            number: i + 1,
            column: step.column.clone(),
            from: letter_for(step.from),
            to: letter_for(step.to),
        })
        .collect()
}
