//! Drag-reorder, rename and context-menu workflows.

use crate::helpers::GridBuilder;
use datagrid::grid::{
    ActionParams, DragOrigin, DropSide, HeaderState, NameKey, NameView, RenameInfo, ReorderInfo,
};
use datagrid::input::DragState;
use datagrid::types::{ColumnType, SortDirection, SortState};
use serde_json::{Map, Value, json};

#[test]
fn test_drag_and_drop_emits_one_reorder() {
    let (mut grid, _, actions) = GridBuilder::new(&["a", "b", "c", "d"]).build();

    let payload = grid.drag_start(1, DragOrigin::Header).unwrap().unwrap();
    assert_eq!(payload.column_key, "b");
    assert_eq!(grid.drag_state(), DragState::DraggingColumn { index: 1 });
    assert_eq!(grid.header_view(1).unwrap().state, HeaderState::Dragging);

    // Hover the right zone of "d" (slot 4)
    grid.drop_zone_enter(3, DropSide::Right).unwrap();
    assert!(grid.drop_zone_over(3, DropSide::Right).unwrap());
    assert_eq!(grid.header_view(3).unwrap().state, HeaderState::DropTargetRight);

    assert!(grid.drop_on_zone(3, DropSide::Right).unwrap());
    grid.drag_end();

    let reorders = actions.reorders.lock();
    assert_eq!(reorders.len(), 1);
    assert_eq!(reorders[0].module_id, Some(42));
    assert_eq!(reorders[0].action_id, "reorder-columns");
    assert!(!reorders[0].force_new_module);
    assert_eq!(
        reorders[0].params,
        ActionParams::ReorderColumns(ReorderInfo {
            column: "b".into(),
            from: 1,
            to: 4
        })
    );

    // Local order is untouched until the owner sends new props
    assert_eq!(grid.props().columns, vec!["a", "b", "c", "d"]);
    assert_eq!(grid.drag_state(), DragState::Idle);
    for i in 0..4 {
        let view = grid.header_view(i).unwrap();
        assert!(view.left_drop_zone.is_none() && view.right_drop_zone.is_none());
    }
}

#[test]
fn test_aborted_drag_clears_state() {
    let (mut grid, _, actions) = GridBuilder::new(&["a", "b", "c"]).build();
    grid.drag_start(0, DragOrigin::Header).unwrap();
    grid.drop_zone_enter(2, DropSide::Left).unwrap();
    grid.drop_zone_leave(2, DropSide::Left).unwrap();
    grid.drag_end();

    assert_eq!(grid.drag_state(), DragState::Idle);
    assert!(actions.reorders.lock().is_empty());
    assert_eq!(grid.header_view(2).unwrap().state, HeaderState::Idle);
}

#[test]
fn test_drag_rejected_when_read_only_or_from_rename_input() {
    let (mut grid, _, _) = GridBuilder::new(&["a", "b"]).read_only().build();
    assert_eq!(grid.drag_start(0, DragOrigin::Header).unwrap(), None);
    assert_eq!(grid.drag_state(), DragState::Idle);

    let (mut grid, _, _) = GridBuilder::new(&["a", "b"]).build();
    assert_eq!(grid.drag_start(0, DragOrigin::RenameInput).unwrap(), None);
    assert_eq!(grid.drag_state(), DragState::Idle);
}

#[test]
fn test_rename_commit_on_enter() {
    let (mut grid, _, actions) = GridBuilder::new(&["price"]).build();

    assert!(grid.name_click(0).unwrap());
    assert!(grid.take_name_focus_request(0).unwrap());
    grid.name_input(0, "cost").unwrap();
    assert_eq!(
        grid.header_view(0).unwrap().name,
        NameView::Editing {
            input_name: "new-column-key",
            input_class: "column-key-input",
            value: "cost".into(),
        }
    );

    assert!(grid.name_key_down(0, NameKey::Enter).unwrap());
    // The blur that follows Enter emits nothing more
    assert!(!grid.name_blur(0).unwrap());

    let renames = actions.renames.lock();
    assert_eq!(renames.len(), 1);
    assert_eq!(renames[0].action_id, "rename-columns");
    assert_eq!(
        renames[0].params,
        ActionParams::RenameColumns(RenameInfo {
            prev_name: "price".into(),
            new_name: "cost".into()
        })
    );
}

#[test]
fn test_rename_escape_and_unchanged_emit_nothing() {
    let (mut grid, _, actions) = GridBuilder::new(&["price"]).build();

    grid.name_click(0).unwrap();
    grid.name_input(0, "other").unwrap();
    assert!(!grid.name_key_down(0, NameKey::Escape).unwrap());
    match grid.header_view(0).unwrap().name {
        NameView::Display { value, .. } => assert_eq!(value, "price"),
        other => panic!("expected display mode, got {:?}", other),
    }

    grid.name_click(0).unwrap();
    assert!(!grid.name_blur(0).unwrap());
    assert!(actions.renames.lock().is_empty());
}

#[test]
fn test_read_only_name_never_edits() {
    let (mut grid, _, _) = GridBuilder::new(&["price"]).read_only().build();
    assert!(!grid.name_click(0).unwrap());
    assert!(!grid.menu_rename(0).unwrap());
}

#[test]
fn test_menu_rename_enters_edit_mode() {
    let (mut grid, _, _) = GridBuilder::new(&["price"]).build();
    assert!(grid.menu_rename(0).unwrap());
    assert!(matches!(grid.header_view(0).unwrap().name, NameView::Editing { .. }));
}

#[test]
fn test_menu_action_carries_column_key() {
    let mut builder = GridBuilder::new(&["a", "b"]);
    builder.props.sort = SortState::new("b", SortDirection::Descending);
    let (mut grid, _, actions) = builder.build();

    let menu = grid.header_view(1).unwrap().menu.unwrap();
    assert_eq!(menu.sort_direction, SortDirection::Descending);
    assert_eq!(
        grid.header_view(0).unwrap().menu.unwrap().sort_direction,
        SortDirection::None
    );

    let mut params = Map::new();
    params.insert("sortDirection".into(), Value::from(1));
    assert!(grid.menu_action(1, "sort-from-table", false, params).unwrap());

    let dropdowns = actions.dropdowns.lock();
    assert_eq!(dropdowns.len(), 1);
    assert_eq!(dropdowns[0].id_name, "sort-from-table");
    assert_eq!(
        Value::Object(dropdowns[0].params.clone()),
        json!({"sortDirection": 1, "columnKey": "b"})
    );
}

#[test]
fn test_menu_action_on_read_only_grid_is_ignored() {
    let (mut grid, _, actions) = GridBuilder::new(&["a"]).read_only().build();
    assert!(!grid.menu_action(0, "duplicate-column", true, Map::new()).unwrap());
    assert!(actions.dropdowns.lock().is_empty());
}

#[test]
fn test_gesture_on_missing_column_is_an_error() {
    let (mut grid, _, _) = GridBuilder::new(&["a"]).build();
    assert!(grid.name_click(3).is_err());
    assert!(grid.drop_on_zone(1, DropSide::Left).is_err());
}

#[test]
fn test_new_column_order_remounts_headers() {
    let (mut grid, _, _) = GridBuilder::new(&["a", "b"]).build();
    grid.name_click(0).unwrap();
    grid.name_input(0, "draft").unwrap();

    let mut props = grid.props().clone();
    props.columns = vec!["b".into(), "a".into()];
    props.column_types = Some(vec![ColumnType::Text, ColumnType::Number]);
    assert!(grid.set_props(props).refresh_key_bumped);

    // Fresh widgets: the in-progress edit is gone
    let view = grid.header_view(0).unwrap();
    assert!(matches!(view.name, NameView::Display { ref value, .. } if value == "b"));
    match grid.header_view(1).unwrap().name {
        NameView::Display { type_label, .. } => assert_eq!(type_label, Some("number")),
        other => panic!("expected display mode, got {:?}", other),
    }
}

#[test]
fn test_header_view_snapshot() {
    let (mut grid, _, _) = GridBuilder::new(&["a", "b", "c"]).build();
    grid.drag_start(0, DragOrigin::Header).unwrap();
    insta::assert_json_snapshot!(grid.header_view(2).unwrap(), @r#"
    {
      "letter": "C",
      "class": "data-grid-column-header",
      "state": "idle",
      "left_drop_zone": {
        "side": "left",
        "from_index": 0,
        "to_index": 2,
        "is_drag_hover": false
      },
      "name": {
        "mode": "display",
        "class": "column-key",
        "value": "c",
        "type_class": "column-type",
        "type_label": "text"
      },
      "menu": {
        "column_key": "c",
        "column_type": "text",
        "sort_direction": "none"
      },
      "right_drop_zone": {
        "side": "right",
        "from_index": 0,
        "to_index": 3,
        "is_drag_hover": false
      }
    }
    "#);
}
