//! Ctrl+arrow jumps to the edges of the table.
//!
//! Each jump keeps one axis of the highlight and moves the other to the
//! first or last renderable index. Header rows jump to the outermost header
//! column (and header columns to the outermost header row) when headers are
//! navigable.

use super::TransformationOptions;
use crate::types::{to_signed, CellCoords};

/// Ctrl+Left: first renderable column of the highlight's row.
pub fn most_start_in_row<O: TransformationOptions + ?Sized>(
    options: &O,
    highlight: CellCoords,
) -> CellCoords {
    let first = options.renderable_to_visual_column(0);
    let header = outermost_header(options, options.count_row_headers());
    let col = match (header, first) {
        (Some(header), _) if highlight.row < 0 => Some(header),
        (header, None) => header,
        (_, first) => first,
    };
    col.map_or(highlight, |col| options.create_cell_coords(highlight.row, col))
}

/// Ctrl+Right: last renderable column of the highlight's row.
pub fn most_end_in_row<O: TransformationOptions + ?Sized>(
    options: &O,
    highlight: CellCoords,
) -> CellCoords {
    last_renderable(options.count_renderable_columns())
        .and_then(|last| options.renderable_to_visual_column(last))
        .map_or(highlight, |col| options.create_cell_coords(highlight.row, col))
}

/// Ctrl+Up: first renderable row of the highlight's column.
pub fn most_top_in_column<O: TransformationOptions + ?Sized>(
    options: &O,
    highlight: CellCoords,
) -> CellCoords {
    let first = options.renderable_to_visual_row(0);
    let header = outermost_header(options, options.count_col_headers());
    let row = match (header, first) {
        (Some(header), _) if highlight.col < 0 => Some(header),
        (header, None) => header,
        (_, first) => first,
    };
    row.map_or(highlight, |row| options.create_cell_coords(row, highlight.col))
}

/// Ctrl+Down: last renderable row of the highlight's column.
pub fn most_bottom_in_column<O: TransformationOptions + ?Sized>(
    options: &O,
    highlight: CellCoords,
) -> CellCoords {
    last_renderable(options.count_renderable_rows())
        .and_then(|last| options.renderable_to_visual_row(last))
        .map_or(highlight, |row| options.create_cell_coords(row, highlight.col))
}

fn outermost_header<O: TransformationOptions + ?Sized>(options: &O, headers: usize) -> Option<isize> {
    (options.navigable_headers() && headers > 0).then(|| -to_signed(headers))
}

fn last_renderable(count: usize) -> Option<isize> {
    count.checked_sub(1).map(to_signed)
}
