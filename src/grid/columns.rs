//! Column model builder.
//!
//! Produces the ordered column descriptors for one render: the synthetic
//! row-number column first, then one descriptor per data column in input
//! order. Descriptors are rebuilt from props on every render and never
//! outlive it.

use crate::grid::format::{CellFormatter, RenderedCell};
use crate::profile_scope;
use crate::settings::GridSettings;
use crate::types::{CellValue, ColumnType, Row, SortDirection, SortState};
use serde::Serialize;

/// Everything the builder reads for one render
#[derive(Clone, Copy, Debug)]
pub struct ColumnModelInput<'a> {
    pub columns: &'a [String],
    /// Parallel to `columns`; absent for a blank table
    pub column_types: Option<&'a [ColumnType]>,
    pub show_letter: bool,
    pub sort: &'a SortState,
    pub dragging_column_index: Option<usize>,
    pub is_read_only: bool,
    /// True only when edits can be submitted and the table has an owner
    pub editable: bool,
    pub row_number_key: &'a str,
}

/// Values the virtualization primitive compares to decide whether a column
/// header must repaint. The header renderer itself is memoized, so these
/// stand in for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RenderSignal {
    pub dragging_column_index: Option<usize>,
    pub is_sorted: bool,
    pub sort_direction: SortDirection,
    pub show_letter: bool,
}

/// Props handed to a column header
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderDescriptor {
    pub column_key: String,
    /// Declared type; `None` when types are missing or unknown
    pub column_type: Option<ColumnType>,
    pub index: usize,
    pub is_sorted: bool,
    pub sort_direction: SortDirection,
    pub show_letter: bool,
    pub is_read_only: bool,
    pub dragging_column_index: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Unique, stable identity
    pub key: String,
    pub display_name: String,
    pub column_type: ColumnType,
    /// Position among data columns; `None` for the row-number column
    pub index: Option<usize>,
    pub editable: bool,
    pub resizable: bool,
    /// Locked columns stay pinned at the left edge
    pub locked: bool,
    pub width: u32,
    pub formatter: CellFormatter,
    pub header: Option<HeaderDescriptor>,
    pub render_signal: Option<RenderSignal>,
}

impl ColumnDescriptor {
    /// Format this column's cell from a loaded row. A missing key renders as
    /// null.
    pub fn render_cell(&self, row: &Row) -> RenderedCell {
        self.formatter
            .format(row.get(&self.key).unwrap_or(&CellValue::Null))
    }

    pub fn is_row_number(&self) -> bool {
        self.index.is_none()
    }
}

/// Key for the synthetic row-number column: the reserved prefix with
/// underscores appended until no real column uses it.
pub fn row_number_key(columns: &[String]) -> String {
    let mut key = crate::constants::ROW_NUMBER_KEY_PREFIX.to_string();
    while columns.iter().any(|c| *c == key) {
        key.push('_');
    }
    key
}

/// Spreadsheet-style letter for a 0-based column index: 0 -> A, 25 -> Z,
/// 26 -> AA.
pub fn letter_for(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// Build the ordered column descriptors for one render
pub fn build_columns(
    input: &ColumnModelInput<'_>,
    settings: &GridSettings,
) -> Vec<ColumnDescriptor> {
    profile_scope!("build_columns");

    let mut descriptors = Vec::with_capacity(input.columns.len() + 1);

    descriptors.push(ColumnDescriptor {
        key: input.row_number_key.to_string(),
        display_name: String::new(),
        column_type: ColumnType::Number,
        index: None,
        editable: false,
        resizable: false,
        locked: true,
        width: settings.row_number_column_width,
        formatter: CellFormatter::RowNumber,
        header: None,
        render_signal: None,
    });

    for (index, key) in input.columns.iter().enumerate() {
        let declared = input.column_types.and_then(|types| types.get(index).copied());
        let is_sorted = input.sort.is_sorted_by(key);

        descriptors.push(ColumnDescriptor {
            key: key.clone(),
            display_name: key.clone(),
            column_type: declared.unwrap_or_default(),
            index: Some(index),
            editable: input.editable,
            resizable: true,
            locked: false,
            width: settings.data_column_width,
            formatter: CellFormatter::for_type(declared),
            header: Some(HeaderDescriptor {
                column_key: key.clone(),
                column_type: declared,
                index,
                is_sorted,
                sort_direction: input.sort.direction,
                show_letter: input.show_letter,
                is_read_only: input.is_read_only,
                dragging_column_index: input.dragging_column_index,
            }),
            render_signal: Some(RenderSignal {
                dragging_column_index: input.dragging_column_index,
                is_sorted,
                sort_direction: input.sort.direction,
                show_letter: input.show_letter,
            }),
        });
    }

    descriptors
}
