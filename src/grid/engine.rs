//! Grid engine: owns interaction state and turns gestures into intents.
//!
//! ## Ownership
//!
//! The engine owns everything mutable about the grid: drag state, the
//! refresh key, viewport dimensions and the header widgets. Column order,
//! names, types and sort state are never mutated locally; they come back
//! from the owner through `set_props` after an intent has been applied.
//!
//! ## Refresh key
//!
//! The virtualization primitive caches per-column header output keyed by
//! the header renderer alone. When the ordered `(key, type)` list, the sort
//! column, the sort direction or the letter flag changes, the refresh key
//! is bumped and the headers are rebuilt from scratch, which the primitive
//! treats as a remount.

use crate::data::RowSource;
use crate::grid::columns::{
    ColumnDescriptor, ColumnModelInput, HeaderDescriptor, build_columns, row_number_key,
};
use crate::grid::error::{GridError, GridResult};
use crate::grid::header::{ColumnHeader, DragOrigin, DragPayload, DropSide, HeaderView};
use crate::grid::intent::{GridActions, ModuleAction, RenameInfo};
use crate::grid::name_edit::NameKey;
use crate::input::{ContainerMeasure, DragState, ResizeBus, ResizeSubscription, Viewport};
use crate::profile_scope;
use crate::settings::GridSettings;
use crate::types::{ColumnType, Row, SortState};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Inputs from the owning view
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridProps {
    pub total_rows: usize,
    pub columns: Vec<String>,
    /// Parallel to `columns`; absent for a blank table
    pub column_types: Option<Vec<ColumnType>>,
    pub is_read_only: bool,
    /// Owning module; `None` for a blank table, which is always read-only
    pub module_id: Option<u64>,
    /// Upstream data version. A change tells the row source its rows are
    /// stale; the engine only reports it.
    pub last_relevant_delta_id: Option<u64>,
    pub sort: SortState,
    pub show_letter: bool,
}

impl GridProps {
    fn column_type(&self, index: usize) -> Option<ColumnType> {
        self.column_types
            .as_ref()
            .and_then(|types| types.get(index).copied())
    }
}

/// What a `set_props` call changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropsChange {
    pub refresh_key_bumped: bool,
    /// The delta version moved; the row source should drop cached rows
    pub delta_changed: bool,
}

/// Values whose change forces a remount of the rendering primitive
#[derive(Clone, Debug, PartialEq, Eq)]
struct RefreshInputs {
    columns: Vec<(String, Option<ColumnType>)>,
    sort: SortState,
    show_letter: bool,
}

impl RefreshInputs {
    fn of(props: &GridProps) -> Self {
        Self {
            columns: props
                .columns
                .iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), props.column_type(i)))
                .collect(),
            sort: props.sort.clone(),
            show_letter: props.show_letter,
        }
    }
}

/// A committed edit from the rendering primitive.
///
/// `updated` maps column keys to new values. The primitive can report a
/// range of rows; only single-cell edits are supported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowsUpdate {
    pub from_row: usize,
    pub to_row: usize,
    pub updated: Vec<(String, String)>,
}

/// Everything the rendering primitive needs for one pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridFrame {
    pub columns: Vec<ColumnDescriptor>,
    pub headers: Vec<HeaderView>,
    pub rows_count: usize,
    pub min_width: f32,
    pub min_height: f32,
    pub header_row_height: u32,
    pub enable_cell_select: bool,
    pub refresh_key: u64,
}

pub struct DataGrid {
    source: Arc<dyn RowSource>,
    actions: Arc<dyn GridActions>,
    settings: GridSettings,
    props: GridProps,
    row_number_key: String,
    drag: DragState,
    refresh_key: u64,
    viewport: Viewport,
    container: Option<Arc<dyn ContainerMeasure>>,
    resize: Option<ResizeSubscription>,
    headers: Vec<ColumnHeader>,
}

impl DataGrid {
    pub fn new(
        source: Arc<dyn RowSource>,
        actions: Arc<dyn GridActions>,
        settings: GridSettings,
        props: GridProps,
    ) -> Self {
        let mut grid = Self {
            source,
            actions,
            viewport: Viewport::initial(settings.min_viewport_dimension),
            settings,
            row_number_key: row_number_key(&props.columns),
            props,
            drag: DragState::default(),
            refresh_key: 0,
            container: None,
            resize: None,
            headers: Vec::new(),
        };
        grid.sync_headers();
        grid
    }

    // ========================================================================
    // Props and derived state
    // ========================================================================

    pub fn set_props(&mut self, props: GridProps) -> PropsChange {
        let refresh = RefreshInputs::of(&props) != RefreshInputs::of(&self.props);
        let delta_changed = props.last_relevant_delta_id != self.props.last_relevant_delta_id;

        self.row_number_key = row_number_key(&props.columns);
        self.props = props;

        if refresh {
            self.refresh_key += 1;
            self.headers.clear();
            debug!(refresh_key = self.refresh_key, "Column inputs changed, refresh key bumped");
        }

        // A drag can't outlive its column
        if self
            .drag
            .dragging_column_index()
            .is_some_and(|i| i >= self.props.columns.len())
        {
            self.drag.on_drag_end();
        }

        self.sync_headers();

        PropsChange {
            refresh_key_bumped: refresh,
            delta_changed,
        }
    }

    pub fn props(&self) -> &GridProps {
        &self.props
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn refresh_key(&self) -> u64 {
        self.refresh_key
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn row_number_key(&self) -> &str {
        &self.row_number_key
    }

    /// Read-only as seen by the user: explicitly, or because the table has
    /// no owner
    pub fn is_read_only(&self) -> bool {
        self.props.is_read_only || self.props.module_id.is_none()
    }

    /// Whether data cells accept edits
    pub fn is_editable(&self) -> bool {
        self.source.accepts_edits() && self.props.module_id.is_some() && !self.props.is_read_only
    }

    /// Column descriptors for the current props and drag state
    pub fn columns(&self) -> Vec<ColumnDescriptor> {
        let input = ColumnModelInput {
            columns: &self.props.columns,
            column_types: self.props.column_types.as_deref(),
            show_letter: self.props.show_letter,
            sort: &self.props.sort,
            dragging_column_index: self.drag.dragging_column_index(),
            is_read_only: self.is_read_only(),
            editable: self.is_editable(),
            row_number_key: &self.row_number_key,
        };
        build_columns(&input, &self.settings)
    }

    fn sync_headers(&mut self) {
        let descriptors: Vec<HeaderDescriptor> =
            self.columns().into_iter().filter_map(|c| c.header).collect();

        if self.headers.len() != descriptors.len() {
            self.headers = descriptors.into_iter().map(ColumnHeader::new).collect();
            return;
        }
        for (header, props) in self.headers.iter_mut().zip(descriptors) {
            header.set_props(props);
        }
    }

    /// Render pass. `None` for an empty dataset: no viewport, no headers.
    pub fn render(&self) -> Option<GridFrame> {
        profile_scope!("grid_render");

        if self.props.total_rows == 0 {
            return None;
        }

        let (min_width, min_height) = self.viewport.min_size(self.settings.grid_border);

        Some(GridFrame {
            columns: self.columns(),
            headers: self.headers.iter().map(ColumnHeader::view).collect(),
            rows_count: self.props.total_rows,
            min_width,
            min_height,
            header_row_height: self.settings.header_row_height(self.props.show_letter),
            enable_cell_select: self.is_editable(),
            refresh_key: self.refresh_key,
        })
    }

    pub fn header_view(&self, index: usize) -> Option<HeaderView> {
        self.headers.get(index).map(ColumnHeader::view)
    }

    // ========================================================================
    // Rows
    // ========================================================================

    /// Row accessor for the rendering primitive. "Not loaded" propagates
    /// unchanged; a loaded row gets its 1-based number under the synthetic
    /// key.
    pub fn get_row(&self, index: usize) -> Option<Row> {
        let mut row = self.source.get_row(index)?;
        row.insert(self.row_number_key.clone(), (index + 1) as i64);
        Some(row)
    }

    /// Forward a committed cell edit to the row source
    pub fn rows_updated(&self, update: RowsUpdate) -> GridResult<()> {
        if self.is_read_only() {
            error!(row = update.from_row, "Edit reached a read-only grid");
            return Err(GridError::ReadOnlyEdit);
        }
        if !self.source.accepts_edits() {
            error!(row = update.from_row, "Edit reached a row source without edit support");
            return Err(GridError::EditsUnsupported);
        }

        if update.from_row != update.to_row {
            warn!(
                from_row = update.from_row,
                to_row = update.to_row,
                "More than one row changed at a time; only the first row is applied"
            );
        }
        if update.updated.len() > 1 {
            warn!(cells = update.updated.len(), "Multi-cell edit; only the first cell is applied");
        }

        let Some((column_key, new_value)) = update.updated.into_iter().next() else {
            warn!(row = update.from_row, "Edit without a changed cell");
            return Ok(());
        };

        debug!(row = update.from_row, column = %column_key, "Cell edited");
        self.source.edit_cell(update.from_row, &column_key, new_value);
        Ok(())
    }

    // ========================================================================
    // Header gestures
    // ========================================================================

    fn header_mut(&mut self, index: usize) -> GridResult<&mut ColumnHeader> {
        let count = self.headers.len();
        self.headers
            .get_mut(index)
            .ok_or(GridError::ColumnOutOfRange { index, count })
    }

    pub fn header_mouse_enter(&mut self, index: usize) -> GridResult<()> {
        self.header_mut(index)?.mouse_enter();
        Ok(())
    }

    pub fn header_mouse_leave(&mut self, index: usize) -> GridResult<()> {
        self.header_mut(index)?.mouse_leave();
        Ok(())
    }

    /// Start dragging column `index`. `Ok(None)` means the drag was
    /// rejected and the host should cancel the native gesture.
    pub fn drag_start(
        &mut self,
        index: usize,
        origin: DragOrigin,
    ) -> GridResult<Option<DragPayload>> {
        let payload = self.header_mut(index)?.drag_start(origin);
        if payload.is_some() {
            self.drag.on_drag_start(index);
            self.sync_headers();
            debug!(index, "Column drag started");
        }
        Ok(payload)
    }

    /// End of a drag gesture, dropped or aborted. Always clears drag state.
    pub fn drag_end(&mut self) {
        self.drag.on_drag_end();
        self.sync_headers();
    }

    pub fn drop_zone_enter(&mut self, index: usize, side: DropSide) -> GridResult<()> {
        self.header_mut(index)?.drag_enter_zone(side);
        Ok(())
    }

    pub fn drop_zone_leave(&mut self, index: usize, side: DropSide) -> GridResult<()> {
        self.header_mut(index)?.drag_leave_zone(side);
        Ok(())
    }

    /// Whether the zone accepts a drop
    pub fn drop_zone_over(&mut self, index: usize, side: DropSide) -> GridResult<bool> {
        Ok(self.header_mut(index)?.drag_over_zone(side))
    }

    /// Drop on a zone. Returns true if a reorder intent was emitted.
    pub fn drop_on_zone(&mut self, index: usize, side: DropSide) -> GridResult<bool> {
        let Some((from, to)) = self.header_mut(index)?.drop_on_zone(side) else {
            return Ok(false);
        };
        let Some(info) = self.drag.on_drop(&self.props.columns, from, to) else {
            return Ok(false);
        };

        debug!(column = %info.column, from, to, "Column reorder requested");
        self.actions
            .reorder_columns(ModuleAction::reorder(self.props.module_id, info));
        Ok(true)
    }

    // ========================================================================
    // Name control and context menu
    // ========================================================================

    fn emit_rename(&self, rename: Option<RenameInfo>) -> bool {
        let Some(info) = rename else {
            return false;
        };
        debug!(prev = %info.prev_name, new = %info.new_name, "Column rename requested");
        self.actions
            .rename_column(ModuleAction::rename(self.props.module_id, info));
        true
    }

    /// Click on a column name. Returns true if edit mode was entered.
    pub fn name_click(&mut self, index: usize) -> GridResult<bool> {
        Ok(self.header_mut(index)?.name_mut().enter_edit_mode())
    }

    pub fn name_input(&mut self, index: usize, text: impl Into<String>) -> GridResult<()> {
        self.header_mut(index)?.name_mut().input_change(text);
        Ok(())
    }

    /// True once after edit mode was entered: focus the input, select all
    pub fn take_name_focus_request(&mut self, index: usize) -> GridResult<bool> {
        Ok(self.header_mut(index)?.name_mut().take_focus_request())
    }

    /// Blur of the name input. Returns true if a rename intent was emitted.
    pub fn name_blur(&mut self, index: usize) -> GridResult<bool> {
        let rename = self.header_mut(index)?.name_mut().blur();
        Ok(self.emit_rename(rename))
    }

    pub fn name_key_down(&mut self, index: usize, key: NameKey) -> GridResult<bool> {
        let rename = self.header_mut(index)?.name_mut().key_down(key);
        Ok(self.emit_rename(rename))
    }

    /// The context menu's "rename" entry
    pub fn menu_rename(&mut self, index: usize) -> GridResult<bool> {
        Ok(self.header_mut(index)?.rename_from_menu())
    }

    /// Forward a context-menu selection. Returns false when the column has
    /// no menu (read-only grid).
    pub fn menu_action(
        &mut self,
        index: usize,
        id_name: &str,
        force_new_module: bool,
        params: Map<String, Value>,
    ) -> GridResult<bool> {
        let Some(menu) = self.header_mut(index)?.context_menu() else {
            return Ok(false);
        };
        self.actions
            .set_dropdown_action(menu.dropdown_action(id_name, force_new_module, params));
        Ok(true)
    }

    // ========================================================================
    // Mount and sizing
    // ========================================================================

    /// Attach to a container: measure once and subscribe to window resizes
    pub fn mount(&mut self, container: Arc<dyn ContainerMeasure>, bus: &ResizeBus) {
        self.container = Some(container);
        self.resize = Some(bus.subscribe(Duration::from_millis(self.settings.resize_debounce_ms)));
        self.measure();
    }

    /// Release the resize subscription and the container
    pub fn unmount(&mut self) {
        self.resize = None;
        self.container = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.container.is_some()
    }

    /// Poll the debounced resize subscription; re-measures when it fires.
    /// Returns true if the viewport was re-measured.
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        let fired = self.resize.as_ref().is_some_and(|sub| sub.poll(now));
        if fired {
            self.measure();
        }
        fired
    }

    /// Measure the container. Without a container, or while it reports no
    /// size, the previous dimensions stay.
    pub fn measure(&mut self) {
        let Some((width, height)) = self.container.as_ref().and_then(|c| c.measure()) else {
            return;
        };
        self.viewport =
            Viewport::from_measured(width, height, self.settings.min_viewport_dimension);
    }
}
