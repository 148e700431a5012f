//! Column drag state machine.
//!
//! A single explicit state replaces a bare "dragging index" flag, so the
//! grid can never be dragging two columns at once.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> DraggingColumn       (drag start on a header, not read-only)
//! DraggingColumn -> Idle       (drag end, with or without a drop)
//! ```
//!
//! A drop does not end the drag by itself; the host always follows a drop
//! with a drag-end. The drop only produces the reorder payload.

use crate::grid::ReorderInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No column is being dragged
    #[default]
    Idle,

    /// A column header is being dragged
    DraggingColumn {
        /// Position of the dragged column among data columns
        index: usize,
    },
}

impl DragState {
    /// Returns true if a column drag is active
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingColumn { .. })
    }

    /// Get the dragged column index, if any
    pub fn dragging_column_index(&self) -> Option<usize> {
        match self {
            Self::DraggingColumn { index } => Some(*index),
            Self::Idle => None,
        }
    }

    pub fn on_drag_start(&mut self, index: usize) {
        *self = Self::DraggingColumn { index };
    }

    pub fn on_drag_end(&mut self) {
        *self = Self::Idle;
    }

    /// Resolve a drop on slot `to` into the reorder payload.
    ///
    /// `to` is an insertion slot (0..=len), not a column index. Returns
    /// `None` if the source index no longer names a column.
    pub fn on_drop(&self, columns: &[String], from: usize, to: usize) -> Option<ReorderInfo> {
        let column = columns.get(from)?;
        if to > columns.len() {
            tracing::warn!(from, to, "Drop slot past the last column");
            return None;
        }
        Some(ReorderInfo {
            column: column.clone(),
            from,
            to,
        })
    }
}
