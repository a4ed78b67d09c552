//! Relative movement of the highlight and of the range end.
//!
//! Movement is computed on a zero-based table: navigable headers become the
//! leading rows/columns, so wrap and clamp never special-case them.

use tracing::trace;

use super::{ClampDirection, GrowthRequest, RowWrap, TransformationOptions, Transformed};
use crate::types::{to_signed, CellCoords, SelectionRange};

/// Moves coordinates of one selection range according to the grid options.
#[derive(Debug)]
pub struct Transformation<'a, O: TransformationOptions + ?Sized> {
    range: &'a SelectionRange,
    options: &'a O,
}

impl<'a, O: TransformationOptions + ?Sized> Transformation<'a, O> {
    pub fn new(range: &'a SelectionRange, options: &'a O) -> Self {
        Self { range, options }
    }

    /// Move the highlight by the given delta.
    ///
    /// Overflow past the last row either requests a new row (`create_missing`
    /// with spare rows configured and no bottom-fixed rows) or wraps onto the
    /// next column when `autoWrapCol` is on; overflow past the last column
    /// either requests a new column or wraps onto the next row when
    /// `autoWrapRow` is on. Whatever is still outside the table is clamped and
    /// the edge reported.
    pub fn transform_start(&self, row_delta: isize, col_delta: isize, create_missing: bool) -> Transformed {
        let highlight = self.range.highlight;
        let Some(renderable) = self.options.visual_to_renderable_coords(highlight) else {
            trace!(?highlight, "highlight is not renderable");
            return Transformed::unchanged(highlight);
        };

        let frame = Frame::new(self.options);
        let delta = self.options.create_cell_coords(row_delta, col_delta);
        let start = frame.to_zero_based(renderable);
        let mut raw = CellCoords::new(start.row + delta.row, start.col + delta.col);
        let mut growth = None;
        let mut row_wrap = None;

        if raw.row >= frame.height {
            if create_missing && self.options.min_spare_rows() > 0 && self.options.fixed_rows_bottom() == 0 {
                growth = Some(GrowthRequest::Rows {
                    at: self.options.count_renderable_rows(),
                });
            } else if self.options.auto_wrap_col() {
                let next_col = raw.col + 1;
                raw.row -= frame.height;
                raw.col = if next_col >= frame.width {
                    next_col - frame.width
                } else {
                    next_col
                };
            }
        } else if raw.row < 0 && self.options.auto_wrap_col() {
            let previous_col = raw.col - 1;
            raw.row += frame.height;
            raw.col = if previous_col < 0 {
                frame.width + previous_col
            } else {
                previous_col
            };
        }

        if raw.col >= frame.width {
            if create_missing && self.options.min_spare_cols() > 0 {
                growth = growth.or(Some(GrowthRequest::Columns {
                    at: self.options.count_renderable_columns(),
                }));
            } else {
                let next_row = raw.row + 1;
                let wrap = RowWrap {
                    enabled: self.options.auto_wrap_row(),
                    flipped: next_row >= frame.height,
                };
                if wrap.enabled {
                    raw.row = if wrap.flipped {
                        next_row - frame.height
                    } else {
                        next_row
                    };
                    raw.col -= frame.width;
                }
                row_wrap = Some(wrap);
            }
        } else if raw.col < 0 {
            let previous_row = raw.row - 1;
            let wrap = RowWrap {
                enabled: self.options.auto_wrap_row(),
                flipped: previous_row < 0,
            };
            if wrap.enabled {
                raw.row = if wrap.flipped {
                    frame.height + previous_row
                } else {
                    previous_row
                };
                raw.col += frame.width;
            }
            row_wrap = Some(wrap);
        }

        let (row_dir, col_dir) = frame.clamp(&mut raw);
        let Some(coords) = self.to_visual(&frame, raw) else {
            return Transformed::unchanged(highlight);
        };
        trace!(row_delta, col_delta, ?coords, ?row_dir, ?col_dir, "transform start");

        Transformed {
            coords,
            row_dir,
            col_dir,
            growth,
            row_wrap,
        }
    }

    /// Move the range end (`to`) by the given delta, keeping `from`.
    ///
    /// No wrap and no growth: the result is clamped to the table. An axis
    /// with a zero delta keeps its current `to` value.
    pub fn transform_end(&self, row_delta: isize, col_delta: isize) -> Transformed {
        let to = self.range.to;
        if self
            .options
            .visual_to_renderable_coords(self.range.highlight)
            .is_none()
        {
            return Transformed::unchanged(to);
        }
        let Some(renderable) = self.options.visual_to_renderable_coords(to) else {
            return Transformed::unchanged(to);
        };

        let frame = Frame::new(self.options);
        let delta = self.options.create_cell_coords(row_delta, col_delta);
        let start = frame.to_zero_based(renderable);
        let mut raw = CellCoords::new(start.row + delta.row, start.col + delta.col);
        let (row_dir, col_dir) = frame.clamp(&mut raw);
        let Some(moved) = self.to_visual(&frame, raw) else {
            return Transformed::unchanged(to);
        };

        let mut coords = to;
        match (delta.row, delta.col) {
            (0, col) if col != 0 => coords.col = moved.col,
            (row, 0) if row != 0 => coords.row = moved.row,
            _ => coords = moved,
        }
        trace!(row_delta, col_delta, ?coords, ?row_dir, ?col_dir, "transform end");

        Transformed {
            coords,
            row_dir,
            col_dir,
            growth: None,
            row_wrap: None,
        }
    }

    fn to_visual(&self, frame: &Frame, zero_based: CellCoords) -> Option<CellCoords> {
        self.options
            .renderable_to_visual_coords(frame.to_renderable(zero_based))
    }
}

/// Table extent with navigable headers folded in as leading indexes.
#[derive(Debug, Clone, Copy)]
struct Frame {
    offset_x: isize,
    offset_y: isize,
    width: isize,
    height: isize,
}

impl Frame {
    fn new<O: TransformationOptions + ?Sized>(options: &O) -> Self {
        let (offset_x, offset_y) = if options.navigable_headers() {
            (
                to_signed(options.count_row_headers()),
                to_signed(options.count_col_headers()),
            )
        } else {
            (0, 0)
        };

        Self {
            offset_x,
            offset_y,
            width: offset_x.saturating_add(to_signed(options.count_renderable_columns())),
            height: offset_y.saturating_add(to_signed(options.count_renderable_rows())),
        }
    }

    fn to_zero_based(self, renderable: CellCoords) -> CellCoords {
        CellCoords::new(renderable.row + self.offset_y, renderable.col + self.offset_x)
    }

    fn to_renderable(self, zero_based: CellCoords) -> CellCoords {
        CellCoords::new(zero_based.row - self.offset_y, zero_based.col - self.offset_x)
    }

    fn clamp(self, coords: &mut CellCoords) -> (ClampDirection, ClampDirection) {
        (
            clamp_index(&mut coords.row, self.height),
            clamp_index(&mut coords.col, self.width),
        )
    }
}

fn clamp_index(index: &mut isize, len: isize) -> ClampDirection {
    if *index < 0 {
        *index = 0;
        ClampDirection::Start
    } else if *index > 0 && *index >= len {
        *index = len - 1;
        ClampDirection::End
    } else {
        ClampDirection::None
    }
}
