//! Keyboard navigation tests
//!
//! Key presses run through `action_for_key` and `Grid::apply`: plain moves,
//! range extension, Ctrl jumps, growth on overflow and the hooks fired
//! along the way.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::cell::RefCell;
use std::rc::Rc;

use gridcore::selection::{ClampDirection, GrowthRequest};
use gridcore::viewer::action_for_key;
use gridcore::{CellCoords, Grid, GridEvent, GridSettings, LayerKind};

/// Press `key` and return the highlight afterwards.
fn press(grid: &mut Grid, key: &str, ctrl: bool, shift: bool) -> CellCoords {
    let action = action_for_key(key, ctrl, shift).expect("key is mapped");
    grid.apply(action);
    grid.selected_range().expect("selection").highlight
}

fn record_events(grid: &mut Grid) -> Rc<RefCell<Vec<GridEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.add_hook(move |event| sink.borrow_mut().push(*event));
    events
}

fn at(row: isize, col: isize) -> CellCoords {
    CellCoords::new(row, col)
}

// ============================================================================
// Arrows and extension
// ============================================================================

#[test]
fn test_arrow_moves() {
    let mut grid = Grid::new(5, 5, GridSettings::default());
    assert!(grid.select_cell(at(2, 2)));

    assert_eq!(press(&mut grid, "ArrowDown", false, false), at(3, 2));
    assert_eq!(press(&mut grid, "ArrowRight", false, false), at(3, 3));
    assert_eq!(press(&mut grid, "ArrowUp", false, false), at(2, 3));
    assert_eq!(press(&mut grid, "ArrowLeft", false, false), at(2, 2));
}

#[test]
fn test_move_collapses_range() {
    let mut grid = Grid::new(5, 5, GridSettings::default());
    assert!(grid.select_range(at(0, 0), at(2, 2)));

    press(&mut grid, "ArrowDown", false, false);
    let range = grid.selected_range().unwrap();
    assert!(range.is_single());
    assert_eq!(range.highlight, at(1, 0));
}

#[test]
fn test_shift_arrow_extends() {
    let mut grid = Grid::new(5, 5, GridSettings::default());
    assert!(grid.select_cell(at(1, 1)));

    press(&mut grid, "ArrowRight", false, true);
    press(&mut grid, "ArrowDown", false, true);

    let range = grid.selected_range().unwrap();
    assert_eq!(range.highlight, at(1, 1));
    assert_eq!(range.from, at(1, 1));
    assert_eq!(range.to, at(2, 2));
}

#[test]
fn test_unmapped_key() {
    assert_eq!(action_for_key("a", false, false), None);
    assert_eq!(action_for_key("Escape", true, true), None);
}

// ============================================================================
// Ctrl jumps
// ============================================================================

#[test]
fn test_ctrl_arrows_jump_to_edges() {
    let mut grid = Grid::new(3, 5, GridSettings::default());

    assert!(grid.select_cell(at(1, 3)));
    assert_eq!(press(&mut grid, "ArrowLeft", true, false), at(1, 0));
    assert_eq!(press(&mut grid, "ArrowRight", true, false), at(1, 4));
    assert_eq!(press(&mut grid, "ArrowDown", true, false), at(2, 4));
    assert_eq!(press(&mut grid, "ArrowUp", true, false), at(0, 4));
}

#[test]
fn test_ctrl_left_skips_hidden_first_column() {
    let mut grid = Grid::new(3, 5, GridSettings::default());
    let columns = grid.column_mapper_mut();
    columns
        .register_layer("hidden", LayerKind::Hiding, false)
        .unwrap();
    columns.hide_visual("hidden", 0, true).unwrap();

    assert!(grid.select_cell(at(1, 3)));
    assert_eq!(press(&mut grid, "ArrowLeft", true, false), at(1, 1));
}

#[test]
fn test_ctrl_left_in_header_row() {
    let settings = GridSettings {
        navigable_headers: true,
        col_headers: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 5, settings);

    assert!(grid.select_cell(at(-1, 3)));
    assert_eq!(press(&mut grid, "ArrowLeft", true, false), at(-1, 0));
}

#[test]
fn test_ctrl_left_reaches_row_header_only_from_header_row() {
    let settings = GridSettings {
        navigable_headers: true,
        col_headers: 1,
        row_headers: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 5, settings);

    assert!(grid.select_cell(at(-1, 3)));
    assert_eq!(press(&mut grid, "ArrowLeft", true, false), at(-1, -1));

    assert!(grid.select_cell(at(1, 3)));
    assert_eq!(press(&mut grid, "ArrowLeft", true, false), at(1, 0));
}

#[test]
fn test_ctrl_shift_extends_to_edge() {
    let mut grid = Grid::new(3, 5, GridSettings::default());
    assert!(grid.select_cell(at(1, 1)));

    press(&mut grid, "ArrowRight", true, true);
    let range = grid.selected_range().unwrap();
    assert_eq!(range.highlight, at(1, 1));
    assert_eq!(range.to, at(1, 4));
}

#[test]
fn test_ctrl_home_and_end() {
    let mut grid = Grid::new(3, 5, GridSettings::default());
    assert!(grid.select_cell(at(1, 2)));

    assert_eq!(press(&mut grid, "End", true, false), at(2, 4));
    assert_eq!(press(&mut grid, "Home", true, false), at(0, 0));
    assert_eq!(press(&mut grid, "End", false, false), at(0, 4));
    assert_eq!(press(&mut grid, "Home", false, false), at(0, 0));
}

// ============================================================================
// Growth
// ============================================================================

#[test]
fn test_enter_on_last_row_grows() {
    let settings = GridSettings {
        min_spare_rows: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 3, settings);
    let events = record_events(&mut grid);
    assert!(grid.select_cell(at(2, 0)));

    let action = action_for_key("Enter", false, false).unwrap();
    let moved = grid.apply(action).unwrap();

    assert_eq!(moved.coords, at(3, 0));
    assert_eq!(moved.growth, Some(GrowthRequest::Rows { at: 3 }));
    assert_eq!(grid.row_mapper().count_physical(), 4);

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], GridEvent::BeforeTransformStart { .. }));
    assert_eq!(events[1], GridEvent::InsertRowRequire { at: 3 });
    assert!(matches!(
        events[2],
        GridEvent::AfterTransformStart {
            coords: CellCoords { row: 3, col: 0 },
            ..
        }
    ));
}

#[test]
fn test_no_row_growth_with_bottom_fixed_rows() {
    let settings = GridSettings {
        min_spare_rows: 1,
        fixed_rows_bottom: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 3, settings);
    assert!(grid.select_cell(at(2, 0)));

    let moved = grid.transform_start(1, 0, true).unwrap();
    assert_eq!(moved.coords, at(2, 0));
    assert_eq!(moved.row_dir, ClampDirection::End);
    assert_eq!(moved.growth, None);
    assert_eq!(grid.row_mapper().count_physical(), 3);
}

#[test]
fn test_tab_on_last_column_grows() {
    let settings = GridSettings {
        min_spare_cols: 1,
        auto_wrap_row: true,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 3, settings);
    let events = record_events(&mut grid);
    assert!(grid.select_cell(at(0, 2)));

    let moved = grid.transform_start(0, 1, true).unwrap();
    assert_eq!(moved.coords, at(0, 3));
    assert_eq!(moved.growth, Some(GrowthRequest::Columns { at: 3 }));
    assert_eq!(moved.row_wrap, None);
    assert_eq!(grid.column_mapper().count_physical(), 4);
    assert!(events
        .borrow()
        .contains(&GridEvent::InsertColRequire { at: 3 }));
}

#[test]
fn test_growth_respects_hidden_rows() {
    let settings = GridSettings {
        min_spare_rows: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 3, settings);
    let rows = grid.row_mapper_mut();
    rows.register_layer("hidden", LayerKind::Hiding, false)
        .unwrap();
    rows.hide_visual("hidden", 1, true).unwrap();
    assert!(grid.select_cell(at(2, 0)));

    // Two renderable rows; the new one lands at renderable 2, visual 3
    let moved = grid.transform_start(1, 0, true).unwrap();
    assert_eq!(moved.growth, Some(GrowthRequest::Rows { at: 2 }));
    assert_eq!(moved.coords, at(3, 0));
}

// ============================================================================
// Hooks
// ============================================================================

#[test]
fn test_hooks_run_in_registration_order() {
    let mut grid = Grid::new(3, 3, GridSettings::default());
    let order = Rc::new(RefCell::new(Vec::new()));
    for label in ["first", "second"] {
        let sink = Rc::clone(&order);
        grid.add_hook(move |_| sink.borrow_mut().push(label));
    }
    assert_eq!(grid.hooks_mut().len(), 2);
    assert!(grid.select_cell(at(0, 0)));

    grid.transform_start(1, 0, false);
    assert_eq!(*order.borrow(), vec!["first", "second", "first", "second"]);

    grid.hooks_mut().clear();
    grid.transform_start(1, 0, false);
    assert_eq!(order.borrow().len(), 4);
}

#[test]
fn test_row_wrap_event_precedes_after_hook() {
    let settings = GridSettings {
        auto_wrap_row: true,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(3, 3, settings);
    let events = record_events(&mut grid);
    assert!(grid.select_cell(at(0, 2)));

    assert_eq!(press(&mut grid, "ArrowRight", false, false), at(1, 0));

    let events = events.borrow();
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        GridEvent::RowWrap {
            enabled: true,
            flipped: false,
            coords: at(1, 0)
        }
    );
    assert!(matches!(events[2], GridEvent::AfterTransformStart { .. }));
}

#[test]
fn test_extend_fires_end_hooks() {
    let mut grid = Grid::new(3, 3, GridSettings::default());
    let events = record_events(&mut grid);
    assert!(grid.select_cell(at(0, 0)));

    press(&mut grid, "ArrowDown", false, true);

    let events = events.borrow();
    assert_eq!(
        events[0],
        GridEvent::BeforeTransformEnd {
            delta: at(1, 0)
        }
    );
    assert!(matches!(
        events[1],
        GridEvent::AfterTransformEnd {
            coords: CellCoords { row: 1, col: 0 },
            ..
        }
    ));
}
