//! Unit tests for the grid engine: rendering, rows, edits, sizing.

use crate::helpers::{FixedSource, GridBuilder, text_rows};
use datagrid::grid::{GridError, RowsUpdate};
use datagrid::input::{ContainerMeasure, ResizeBus};
use datagrid::types::{CellValue, ColumnType, SortDirection, SortState};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct FakeContainer {
    size: Mutex<Option<(f32, f32)>>,
}

impl FakeContainer {
    fn new(size: Option<(f32, f32)>) -> Arc<Self> {
        Arc::new(Self {
            size: Mutex::new(size),
        })
    }
}

impl ContainerMeasure for FakeContainer {
    fn measure(&self) -> Option<(f32, f32)> {
        *self.size.lock()
    }
}

fn edit(row: usize, key: &str, value: &str) -> RowsUpdate {
    RowsUpdate {
        from_row: row,
        to_row: row,
        updated: vec![(key.to_string(), value.to_string())],
    }
}

// ============================================================================
// Render
// ============================================================================

#[test]
fn test_empty_dataset_renders_nothing() {
    let (grid, _, _) = GridBuilder::new(&["a"])
        .with_source(FixedSource::new(Vec::new()))
        .build();
    assert!(grid.render().is_none());
}

#[test]
fn test_render_frame() {
    let (grid, _, _) = GridBuilder::new(&["a", "b"]).build();
    let frame = grid.render().unwrap();

    assert_eq!(frame.columns.len(), 3);
    assert_eq!(frame.headers.len(), 2);
    assert_eq!(frame.rows_count, 5);
    assert_eq!(frame.header_row_height, 68);
    assert!(frame.enable_cell_select);
    assert_eq!(frame.refresh_key, 0);
    // Unmeasured: the floor minus the border
    assert_eq!((frame.min_width, frame.min_height), (98.0, 98.0));
    assert_eq!(frame.headers[1].letter.as_deref(), Some("B"));
}

#[test]
fn test_header_height_without_letters() {
    let mut builder = GridBuilder::new(&["a"]);
    builder.props.show_letter = false;
    let (grid, _, _) = builder.build();
    let frame = grid.render().unwrap();
    assert_eq!(frame.header_row_height, 50);
    assert!(frame.headers[0].letter.is_none());
}

#[test]
fn test_blank_table_is_read_only() {
    let (grid, _, _) = GridBuilder::new(&["a"]).blank().build();
    assert!(grid.is_read_only());
    assert!(!grid.is_editable());

    let frame = grid.render().unwrap();
    assert!(!frame.enable_cell_select);
    assert!(frame.columns.iter().all(|c| !c.editable));
    assert!(frame.headers[0].menu.is_none());
}

#[test]
fn test_source_without_edits_disables_editing() {
    let mut source = FixedSource::new(text_rows(&["a"], 2));
    source.read_only = true;
    let (grid, _, _) = GridBuilder::new(&["a"]).with_source(source).build();
    assert!(!grid.is_read_only());
    assert!(!grid.is_editable());
    // Headers stay interactive
    assert!(grid.header_view(0).unwrap().menu.is_some());
}

#[test]
fn test_edit_on_source_without_edits_names_the_source() {
    let mut source = FixedSource::new(text_rows(&["a"], 2));
    source.read_only = true;
    let (grid, source, _) = GridBuilder::new(&["a"]).with_source(source).build();
    assert_eq!(grid.rows_updated(edit(0, "a", "x")), Err(GridError::EditsUnsupported));
    assert!(source.edits.lock().is_empty());
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_get_row_prepends_row_number() {
    let (grid, _, _) = GridBuilder::new(&["a"]).build();
    let row = grid.get_row(2).unwrap();
    assert_eq!(row.get("rn_"), Some(&CellValue::Number(3.0)));
    assert_eq!(row.get("a"), Some(&CellValue::text("a2")));

    let frame = grid.render().unwrap();
    let rendered = frame.columns[0].render_cell(&row);
    assert_eq!(rendered.text(), Some("3"));
    assert_eq!(rendered.class(), Some("row-number row-number-1"));
}

#[test]
fn test_get_row_propagates_not_loaded() {
    let mut source = FixedSource::new(text_rows(&["a"], 3));
    source.not_loaded.insert(1);
    let (grid, _, _) = GridBuilder::new(&["a"]).with_source(source).build();
    assert!(grid.get_row(0).is_some());
    assert!(grid.get_row(1).is_none());
}

// ============================================================================
// Edits
// ============================================================================

#[test]
fn test_single_cell_edit_forwarded() {
    let (grid, source, _) = GridBuilder::new(&["a", "b"]).build();
    grid.rows_updated(edit(3, "b", "new")).unwrap();
    assert_eq!(*source.edits.lock(), vec![(3, "b".to_string(), "new".to_string())]);
}

#[test]
fn test_edit_on_read_only_grid_fails() {
    let (grid, source, _) = GridBuilder::new(&["a"]).read_only().build();
    assert_eq!(grid.rows_updated(edit(0, "a", "x")), Err(GridError::ReadOnlyEdit));
    assert!(source.edits.lock().is_empty());

    let (blank, _, _) = GridBuilder::new(&["a"]).blank().build();
    assert_eq!(blank.rows_updated(edit(0, "a", "x")), Err(GridError::ReadOnlyEdit));
}

#[test]
fn test_multi_row_edit_applies_first_row_only() {
    let (grid, source, _) = GridBuilder::new(&["a"]).build();
    grid.rows_updated(RowsUpdate {
        from_row: 1,
        to_row: 3,
        updated: vec![("a".into(), "fill".into())],
    })
    .unwrap();
    assert_eq!(*source.edits.lock(), vec![(1, "a".to_string(), "fill".to_string())]);
}

#[test]
fn test_empty_edit_is_a_no_op() {
    let (grid, source, _) = GridBuilder::new(&["a"]).build();
    grid.rows_updated(RowsUpdate::default()).unwrap();
    assert!(source.edits.lock().is_empty());
}

// ============================================================================
// Refresh key
// ============================================================================

#[test]
fn test_refresh_key_bumps_on_relevant_changes() {
    let (mut grid, _, _) = GridBuilder::new(&["a", "b"]).build();
    let base = grid.props().clone();

    let mut sorted = base.clone();
    sorted.sort = SortState::new("a", SortDirection::Ascending);
    assert!(grid.set_props(sorted.clone()).refresh_key_bumped);
    assert_eq!(grid.refresh_key(), 1);

    let mut descending = sorted.clone();
    descending.sort.direction = SortDirection::Descending;
    assert!(grid.set_props(descending.clone()).refresh_key_bumped);

    let mut retyped = descending.clone();
    retyped.column_types = Some(vec![ColumnType::Number, ColumnType::Text]);
    assert!(grid.set_props(retyped.clone()).refresh_key_bumped);

    let mut letters_off = retyped.clone();
    letters_off.show_letter = false;
    assert!(grid.set_props(letters_off.clone()).refresh_key_bumped);
    assert_eq!(grid.refresh_key(), 4);
}

#[test]
fn test_unrelated_changes_keep_refresh_key() {
    let (mut grid, _, _) = GridBuilder::new(&["a", "b"]).build();
    let mut props = grid.props().clone();
    props.total_rows = 4;
    props.last_relevant_delta_id = Some(2);
    props.is_read_only = true;

    let change = grid.set_props(props);
    assert!(!change.refresh_key_bumped);
    assert!(change.delta_changed);
    assert_eq!(grid.refresh_key(), 0);
}

// ============================================================================
// Sizing
// ============================================================================

#[test]
fn test_mount_measures_container() {
    let (mut grid, _, _) = GridBuilder::new(&["a"]).build();
    let bus = ResizeBus::new();
    let container = FakeContainer::new(Some((602.0, 402.0)));

    grid.mount(container.clone(), &bus);
    assert!(grid.is_mounted());
    assert_eq!((grid.viewport().width, grid.viewport().height), (602.0, 402.0));
    let frame = grid.render().unwrap();
    assert_eq!((frame.min_width, frame.min_height), (600.0, 400.0));
    assert_eq!(bus.subscriber_count(), 1);
}

#[test]
fn test_resize_is_debounced_and_floored() {
    let (mut grid, _, _) = GridBuilder::new(&["a"]).build();
    let bus = ResizeBus::new();
    let container = FakeContainer::new(Some((602.0, 402.0)));
    grid.mount(container.clone(), &bus);

    let t0 = Instant::now();
    *container.size.lock() = Some((50.0, 302.0));
    bus.notify_resize(t0);
    assert!(!grid.poll_resize(t0 + Duration::from_millis(10)));
    assert_eq!(grid.viewport().width, 602.0);

    assert!(grid.poll_resize(t0 + Duration::from_millis(50)));
    assert_eq!((grid.viewport().width, grid.viewport().height), (100.0, 302.0));

    // The floor applies to the measured size, the border comes off after
    let frame = grid.render().unwrap();
    assert_eq!((frame.min_width, frame.min_height), (98.0, 300.0));
}

#[test]
fn test_unmount_releases_subscription() {
    let (mut grid, _, _) = GridBuilder::new(&["a"]).build();
    let bus = ResizeBus::new();
    grid.mount(FakeContainer::new(Some((300.0, 300.0))), &bus);

    grid.unmount();
    assert!(!grid.is_mounted());
    assert_eq!(bus.subscriber_count(), 0);

    let t0 = Instant::now();
    bus.notify_resize(t0);
    assert!(!grid.poll_resize(t0 + Duration::from_secs(1)));
}

#[test]
fn test_detached_container_keeps_dimensions() {
    let (mut grid, _, _) = GridBuilder::new(&["a"]).build();
    let bus = ResizeBus::new();
    let container = FakeContainer::new(Some((402.0, 202.0)));
    grid.mount(container.clone(), &bus);

    *container.size.lock() = None;
    grid.measure();
    assert_eq!((grid.viewport().width, grid.viewport().height), (402.0, 202.0));
}
