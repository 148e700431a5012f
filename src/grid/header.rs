//! Column header: letter, drop zones, name control and context menu.
//!
//! A header holds only widget-local state (hover flags and the name
//! control). Drag state belongs to the engine and arrives through
//! `HeaderDescriptor::dragging_column_index`.
//!
//! Render order: letter, left drop zone, name, context menu, right drop
//! zone. The left zone of column `i` targets slot `i`, the right zone slot
//! `i + 1`. A zone targeting the dragged column's own slot, or the slot
//! right after it, would be a no-op and is never offered.

use crate::grid::columns::{HeaderDescriptor, letter_for};
use crate::grid::intent::DropdownAction;
use crate::grid::name_edit::{EditableColumnName, NameView};
use crate::types::{ColumnType, SortDirection};
use serde::Serialize;
use serde_json::{Map, Value};

/// Which side of a header a drop zone sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DropSide {
    Left,
    Right,
}

/// Where a drag gesture started inside the header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOrigin {
    Header,
    /// Inside the active rename input; text selection, not a column drag
    RenameInput,
}

/// Accepted drag start: what the gesture carries
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragPayload {
    pub index: usize,
    /// `text/plain` data for the drag
    pub column_key: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderState {
    Idle,
    Hovered,
    Dragging,
    DropTargetLeft,
    DropTargetRight,
}

/// An insertion target offered while a drag is active
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DropZone {
    pub side: DropSide,
    pub from_index: usize,
    pub to_index: usize,
    pub is_drag_hover: bool,
}

impl DropZone {
    pub fn class(&self) -> String {
        let side = match self.side {
            DropSide::Left => "left",
            DropSide::Right => "right",
        };
        let mut class = format!("column-reorder-drop-zone align-{}", side);
        if self.is_drag_hover {
            class.push_str(" drag-hover");
        }
        class
    }
}

/// Context menu model; absent entirely for read-only grids
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnMenu {
    pub column_key: String,
    pub column_type: Option<ColumnType>,
    /// The grid's direction if this column is the sorted one, else `None`
    pub sort_direction: SortDirection,
}

impl ColumnMenu {
    /// Package a menu selection, tagging it with this column's key
    pub fn dropdown_action(
        &self,
        id_name: impl Into<String>,
        force_new_module: bool,
        mut params: Map<String, Value>,
    ) -> DropdownAction {
        params.insert("columnKey".to_string(), Value::String(self.column_key.clone()));
        DropdownAction {
            id_name: id_name.into(),
            force_new_module,
            params,
        }
    }
}

/// Render model for one header
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub letter: Option<String>,
    pub class: String,
    pub state: HeaderState,
    pub left_drop_zone: Option<DropZone>,
    pub name: NameView,
    pub menu: Option<ColumnMenu>,
    pub right_drop_zone: Option<DropZone>,
}

/// Source index for a zone targeting `to_index`, or `None` if no zone is
/// offered there.
pub fn drop_zone_source(dragging_column_index: Option<usize>, to_index: usize) -> Option<usize> {
    let from = dragging_column_index?;
    if from == to_index || from + 1 == to_index {
        return None;
    }
    Some(from)
}

#[derive(Clone, Debug)]
pub struct ColumnHeader {
    props: HeaderDescriptor,
    hovered: bool,
    left_drag_hover: bool,
    right_drag_hover: bool,
    name: EditableColumnName,
}

impl ColumnHeader {
    pub fn new(props: HeaderDescriptor) -> Self {
        let name = EditableColumnName::new(
            props.column_key.clone(),
            props.column_type,
            props.is_read_only,
        );
        Self {
            props,
            hovered: false,
            left_drag_hover: false,
            right_drag_hover: false,
            name,
        }
    }

    pub fn props(&self) -> &HeaderDescriptor {
        &self.props
    }

    pub fn set_props(&mut self, props: HeaderDescriptor) {
        self.name
            .set_props(&props.column_key, props.column_type, props.is_read_only);
        self.props = props;

        // Zones that are no longer offered lose their hover state
        if self.drop_zone(DropSide::Left).is_none() {
            self.left_drag_hover = false;
        }
        if self.drop_zone(DropSide::Right).is_none() {
            self.right_drag_hover = false;
        }
    }

    pub fn name(&self) -> &EditableColumnName {
        &self.name
    }

    pub fn name_mut(&mut self) -> &mut EditableColumnName {
        &mut self.name
    }

    pub fn mouse_enter(&mut self) {
        self.hovered = true;
    }

    pub fn mouse_leave(&mut self) {
        self.hovered = false;
    }

    /// Begin dragging this column. Rejected (no state change) for read-only
    /// grids and for drags that start inside the rename input.
    pub fn drag_start(&self, origin: DragOrigin) -> Option<DragPayload> {
        if self.props.is_read_only || origin == DragOrigin::RenameInput {
            return None;
        }
        Some(DragPayload {
            index: self.props.index,
            column_key: self.props.column_key.clone(),
        })
    }

    fn target_index(&self, side: DropSide) -> usize {
        match side {
            DropSide::Left => self.props.index,
            DropSide::Right => self.props.index + 1,
        }
    }

    fn drag_hover(&self, side: DropSide) -> bool {
        match side {
            DropSide::Left => self.left_drag_hover,
            DropSide::Right => self.right_drag_hover,
        }
    }

    fn set_drag_hover(&mut self, side: DropSide, hover: bool) {
        match side {
            DropSide::Left => self.left_drag_hover = hover,
            DropSide::Right => self.right_drag_hover = hover,
        }
    }

    pub fn drop_zone(&self, side: DropSide) -> Option<DropZone> {
        let to_index = self.target_index(side);
        let from_index = drop_zone_source(self.props.dragging_column_index, to_index)?;
        Some(DropZone {
            side,
            from_index,
            to_index,
            is_drag_hover: self.drag_hover(side),
        })
    }

    pub fn drag_enter_zone(&mut self, side: DropSide) {
        if self.drop_zone(side).is_some() {
            self.set_drag_hover(side, true);
        }
    }

    pub fn drag_leave_zone(&mut self, side: DropSide) {
        self.set_drag_hover(side, false);
    }

    /// Whether a drop is allowed over this zone
    pub fn drag_over_zone(&self, side: DropSide) -> bool {
        self.drop_zone(side).is_some()
    }

    /// Drop on a zone: `(from_index, to_index)` for the reorder protocol
    pub fn drop_on_zone(&mut self, side: DropSide) -> Option<(usize, usize)> {
        let zone = self.drop_zone(side)?;
        self.set_drag_hover(side, false);
        Some((zone.from_index, zone.to_index))
    }

    pub fn state(&self) -> HeaderState {
        if self.props.dragging_column_index == Some(self.props.index) {
            HeaderState::Dragging
        } else if self.left_drag_hover {
            HeaderState::DropTargetLeft
        } else if self.right_drag_hover {
            HeaderState::DropTargetRight
        } else if self.hovered {
            HeaderState::Hovered
        } else {
            HeaderState::Idle
        }
    }

    pub fn context_menu(&self) -> Option<ColumnMenu> {
        if self.props.is_read_only {
            return None;
        }
        Some(ColumnMenu {
            column_key: self.props.column_key.clone(),
            column_type: self.props.column_type,
            sort_direction: if self.props.is_sorted {
                self.props.sort_direction
            } else {
                SortDirection::None
            },
        })
    }

    /// The menu's "rename" entry
    pub fn rename_from_menu(&mut self) -> bool {
        self.name.enter_edit_mode()
    }

    pub fn view(&self) -> HeaderView {
        let mut class = "data-grid-column-header".to_string();
        if self.state() == HeaderState::Dragging {
            class.push_str(" dragging");
        }

        HeaderView {
            letter: self.props.show_letter.then(|| letter_for(self.props.index)),
            class,
            state: self.state(),
            left_drop_zone: self.drop_zone(DropSide::Left),
            name: self.name.view(),
            menu: self.context_menu(),
            right_drop_zone: self.drop_zone(DropSide::Right),
        }
    }
}
