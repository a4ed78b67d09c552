//! Selection transformation tests
//!
//! Relative highlight movement over a real `Grid`: wrap, clamp, hidden
//! indexes, navigable headers and range-end movement.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use test_case::test_case;

use gridcore::selection::{ClampDirection, RowWrap, Transformation};
use gridcore::{CellCoords, Grid, GridSettings, LayerKind, SelectionRange};

fn grid_5x5(settings: GridSettings) -> Grid {
    Grid::new(5, 5, settings)
}

fn wrap_rows() -> GridSettings {
    GridSettings {
        auto_wrap_row: true,
        ..GridSettings::default()
    }
}

fn wrap_cols() -> GridSettings {
    GridSettings {
        auto_wrap_col: true,
        ..GridSettings::default()
    }
}

fn with_headers(navigable: bool) -> GridSettings {
    GridSettings {
        navigable_headers: navigable,
        row_headers: 1,
        col_headers: 1,
        ..GridSettings::default()
    }
}

fn move_from(grid: &Grid, start: (isize, isize), delta: (isize, isize)) -> gridcore::selection::Transformed {
    let range = SelectionRange::single(CellCoords::new(start.0, start.1));
    Transformation::new(&range, grid).transform_start(delta.0, delta.1, false)
}

fn hide_rows(grid: &mut Grid, visual: &[usize]) {
    let mapper = grid.row_mapper_mut();
    mapper
        .register_layer("hidden", LayerKind::Hiding, false)
        .unwrap();
    for &row in visual {
        mapper.hide_visual("hidden", row, true).unwrap();
    }
}

// ============================================================================
// Wrapping
// ============================================================================

#[test_case((0, 4), (0, 1), (1, 0) ; "right at row end continues on next row")]
#[test_case((1, 0), (0, -1), (0, 4) ; "left at row start continues on previous row")]
#[test_case((4, 4), (0, 1), (0, 0) ; "right at table end flips to table start")]
#[test_case((0, 0), (0, -1), (4, 4) ; "left at table start flips to table end")]
#[test_case((2, 2), (0, 1), (2, 3) ; "inside the row no wrap")]
fn test_row_wrap(start: (isize, isize), delta: (isize, isize), expected: (isize, isize)) {
    let grid = grid_5x5(wrap_rows());
    let moved = move_from(&grid, start, delta);
    assert_eq!(moved.coords, CellCoords::new(expected.0, expected.1));
    assert_eq!(moved.row_dir, ClampDirection::None);
    assert_eq!(moved.col_dir, ClampDirection::None);
}

#[test]
fn test_row_wrap_reports_flip() {
    let grid = grid_5x5(wrap_rows());

    let inner = move_from(&grid, (0, 4), (0, 1));
    assert_eq!(
        inner.row_wrap,
        Some(RowWrap {
            enabled: true,
            flipped: false
        })
    );

    let outer = move_from(&grid, (4, 4), (0, 1));
    assert_eq!(
        outer.row_wrap,
        Some(RowWrap {
            enabled: true,
            flipped: true
        })
    );

    let none = move_from(&grid, (2, 2), (0, 1));
    assert_eq!(none.row_wrap, None);
}

#[test_case((4, 0), (1, 0), (0, 1) ; "down at column end continues on next column")]
#[test_case((0, 1), (-1, 0), (4, 0) ; "up at column start continues on previous column")]
#[test_case((4, 4), (1, 0), (0, 0) ; "down at table end flips to table start")]
fn test_column_wrap(start: (isize, isize), delta: (isize, isize), expected: (isize, isize)) {
    let grid = grid_5x5(wrap_cols());
    let moved = move_from(&grid, start, delta);
    assert_eq!(moved.coords, CellCoords::new(expected.0, expected.1));
    assert_eq!(moved.row_wrap, None);
}

// ============================================================================
// Clamping
// ============================================================================

#[test_case((0, 4), (0, 1), ClampDirection::None, ClampDirection::End ; "right edge")]
#[test_case((0, 0), (0, -1), ClampDirection::None, ClampDirection::Start ; "left edge")]
#[test_case((4, 2), (1, 0), ClampDirection::End, ClampDirection::None ; "bottom edge")]
#[test_case((0, 2), (-1, 0), ClampDirection::Start, ClampDirection::None ; "top edge")]
#[test_case((0, 0), (-3, -3), ClampDirection::Start, ClampDirection::Start ; "corner")]
fn test_clamp_without_wrap(
    start: (isize, isize),
    delta: (isize, isize),
    row_dir: ClampDirection,
    col_dir: ClampDirection,
) {
    let grid = grid_5x5(GridSettings::default());
    let moved = move_from(&grid, start, delta);
    assert_eq!(moved.coords, CellCoords::new(start.0, start.1));
    assert_eq!(moved.row_dir, row_dir);
    assert_eq!(moved.col_dir, col_dir);
}

#[test]
fn test_refused_row_wrap_is_reported() {
    let grid = grid_5x5(GridSettings::default());
    let moved = move_from(&grid, (0, 4), (0, 1));
    assert_eq!(
        moved.row_wrap,
        Some(RowWrap {
            enabled: false,
            flipped: false
        })
    );
}

#[test]
fn test_large_delta_clamps_to_last() {
    let grid = grid_5x5(GridSettings::default());
    let moved = move_from(&grid, (1, 1), (100, 0));
    assert_eq!(moved.coords, CellCoords::new(4, 1));
    assert_eq!(moved.row_dir.signum(), 1);
}

#[test]
fn test_no_growth_without_create_missing() {
    let settings = GridSettings {
        min_spare_rows: 1,
        ..GridSettings::default()
    };
    let grid = grid_5x5(settings);
    let moved = move_from(&grid, (4, 0), (1, 0));
    assert_eq!(moved.growth, None);
    assert_eq!(moved.coords, CellCoords::new(4, 0));
}

// ============================================================================
// Hidden indexes
// ============================================================================

#[test]
fn test_moves_skip_hidden_rows() {
    let mut grid = grid_5x5(GridSettings::default());
    hide_rows(&mut grid, &[2]);

    let down = move_from(&grid, (1, 0), (1, 0));
    assert_eq!(down.coords, CellCoords::new(3, 0));
    let up = move_from(&grid, (3, 0), (-1, 0));
    assert_eq!(up.coords, CellCoords::new(1, 0));
}

#[test]
fn test_hidden_highlight_does_not_move() {
    let mut grid = grid_5x5(GridSettings::default());
    hide_rows(&mut grid, &[1]);

    let moved = move_from(&grid, (1, 1), (1, 0));
    assert_eq!(moved.coords, CellCoords::new(1, 1));
    assert!(!moved.row_dir.is_clamped());
}

#[test]
fn test_all_rows_hidden_does_not_move() {
    let mut grid = Grid::new(3, 3, GridSettings::default());
    hide_rows(&mut grid, &[0, 1, 2]);

    let moved = move_from(&grid, (0, 0), (0, 1));
    assert_eq!(moved.coords, CellCoords::new(0, 0));
}

#[test]
fn test_empty_grid_does_not_move() {
    let grid = Grid::new(0, 5, wrap_rows());
    let moved = move_from(&grid, (0, 0), (0, 1));
    assert_eq!(moved.coords, CellCoords::new(0, 0));
    assert_eq!(moved.row_wrap, None);
}

#[test]
fn test_column_header_stays_put_without_rows() {
    let settings = GridSettings {
        navigable_headers: true,
        col_headers: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(0, 5, settings);
    assert!(grid.select_cell(CellCoords::new(-1, 2)));

    let moved = grid.transform_start(1, 0, false).unwrap();
    assert_eq!(moved.coords, CellCoords::new(-1, 2));
    assert_eq!(moved.row_dir, ClampDirection::End);
}

#[test]
fn test_row_header_stays_put_without_columns() {
    let settings = GridSettings {
        navigable_headers: true,
        row_headers: 1,
        ..GridSettings::default()
    };
    let mut grid = Grid::new(5, 0, settings);
    assert!(grid.select_cell(CellCoords::new(2, -1)));

    let moved = grid.transform_start(0, 1, false).unwrap();
    assert_eq!(moved.coords, CellCoords::new(2, -1));
    assert_eq!(moved.col_dir, ClampDirection::End);
    assert_eq!(moved.row_dir, ClampDirection::None);
}

// ============================================================================
// Headers
// ============================================================================

#[test_case((0, 0), (-1, 0), (-1, 0) ; "up into the column header")]
#[test_case((0, 0), (0, -1), (0, -1) ; "left into the row header")]
#[test_case((-1, -1), (-1, 0), (-1, -1) ; "corner clamps")]
#[test_case((-1, 2), (1, 0), (0, 2) ; "down out of the column header")]
fn test_navigable_headers(start: (isize, isize), delta: (isize, isize), expected: (isize, isize)) {
    let grid = Grid::new(3, 3, with_headers(true));
    let moved = move_from(&grid, start, delta);
    assert_eq!(moved.coords, CellCoords::new(expected.0, expected.1));
}

#[test]
fn test_headers_not_navigable() {
    let grid = Grid::new(3, 3, with_headers(false));
    let moved = move_from(&grid, (0, 0), (-1, 0));
    assert_eq!(moved.coords, CellCoords::new(0, 0));
    assert_eq!(moved.row_dir, ClampDirection::Start);
}

#[test]
fn test_header_selection_lands_on_data_when_not_navigable() {
    let mut grid = grid_5x5(with_headers(false));

    assert!(grid.select_cell(CellCoords::new(-1, 2)));
    assert_eq!(grid.selected_range().unwrap().highlight, CellCoords::new(0, 2));

    let moved = grid.transform_start(0, 1, false).unwrap();
    assert_eq!(moved.coords, CellCoords::new(0, 3));
    assert_eq!(moved.row_dir, ClampDirection::None);
    assert_eq!(moved.col_dir, ClampDirection::None);
}

#[test]
fn test_header_range_end_lands_on_data_when_not_navigable() {
    let mut grid = grid_5x5(with_headers(false));
    assert!(grid.select_range(CellCoords::new(-1, 2), CellCoords::new(-1, 3)));

    let moved = grid.transform_end(0, 1).unwrap();
    assert_eq!(moved.coords, CellCoords::new(0, 4));
    assert_eq!(moved.row_dir, ClampDirection::None);
    assert_eq!(grid.selected_range().unwrap().from, CellCoords::new(0, 2));
}

#[test]
fn test_header_selection_skips_hidden_first_row() {
    let mut grid = grid_5x5(with_headers(false));
    hide_rows(&mut grid, &[0]);

    assert!(grid.select_cell(CellCoords::new(-1, 1)));
    assert_eq!(grid.selected_range().unwrap().highlight, CellCoords::new(1, 1));
}

#[test]
fn test_header_selection_rejected_without_renderable_rows() {
    let mut grid = Grid::new(2, 3, with_headers(false));
    hide_rows(&mut grid, &[0, 1]);

    assert!(!grid.select_cell(CellCoords::new(-1, 1)));
    assert!(!grid.is_selected());
}

#[test]
fn test_row_wrap_through_header_column() {
    let settings = GridSettings {
        auto_wrap_row: true,
        ..with_headers(true)
    };
    let grid = Grid::new(3, 3, settings);
    // Last column wraps onto the header column of the next row
    let moved = move_from(&grid, (0, 2), (0, 1));
    assert_eq!(moved.coords, CellCoords::new(1, -1));
}

// ============================================================================
// Range end
// ============================================================================

#[test]
fn test_transform_end_keeps_from() {
    let mut grid = grid_5x5(GridSettings::default());
    assert!(grid.select_range(CellCoords::new(1, 1), CellCoords::new(2, 2)));

    let moved = grid.transform_end(0, 1).unwrap();
    assert_eq!(moved.coords, CellCoords::new(2, 3));

    let range = grid.selected_range().unwrap();
    assert_eq!(range.from, CellCoords::new(1, 1));
    assert_eq!(range.highlight, CellCoords::new(1, 1));
    assert_eq!(range.to, CellCoords::new(2, 3));
}

#[test]
fn test_transform_end_clamps_without_wrap() {
    let mut grid = grid_5x5(wrap_rows());
    assert!(grid.select_range(CellCoords::new(0, 3), CellCoords::new(0, 4)));

    let moved = grid.transform_end(0, 1).unwrap();
    assert_eq!(moved.coords, CellCoords::new(0, 4));
    assert_eq!(moved.col_dir, ClampDirection::End);
    assert_eq!(moved.row_wrap, None);
}

#[test]
fn test_transform_end_skips_hidden() {
    let mut grid = grid_5x5(GridSettings::default());
    hide_rows(&mut grid, &[3]);
    assert!(grid.select_range(CellCoords::new(1, 0), CellCoords::new(2, 0)));

    let moved = grid.transform_end(1, 0).unwrap();
    assert_eq!(moved.coords, CellCoords::new(4, 0));
}
