//! Keyboard-driven selection movement.
//!
//! The transformer is a pure function of the current [`SelectionRange`], a
//! delta and the grid configuration exposed through [`TransformationOptions`].
//! It never mutates anything: growth and wrap are reported in the returned
//! [`Transformed`] value and the owner of the selection acts on them.

mod jumps;
mod transformation;

use serde::{Deserialize, Serialize};

use crate::types::CellCoords;

pub use jumps::{most_bottom_in_column, most_end_in_row, most_start_in_row, most_top_in_column};
pub use transformation::Transformation;

/// Grid facts the transformer needs. Coordinates are visual; negative
/// indexes address headers and pass through conversions unchanged.
pub trait TransformationOptions {
    fn count_renderable_rows(&self) -> usize;
    fn count_renderable_columns(&self) -> usize;
    fn count_row_headers(&self) -> usize;
    fn count_col_headers(&self) -> usize;
    fn navigable_headers(&self) -> bool;
    fn auto_wrap_row(&self) -> bool;
    fn auto_wrap_col(&self) -> bool;
    fn fixed_rows_bottom(&self) -> usize;
    fn min_spare_rows(&self) -> usize;
    fn min_spare_cols(&self) -> usize;

    /// `None` when the row is hidden or trimmed.
    fn visual_to_renderable_row(&self, row: isize) -> Option<isize>;
    fn visual_to_renderable_column(&self, col: isize) -> Option<isize>;
    /// `None` when the row is past the renderable range.
    fn renderable_to_visual_row(&self, row: isize) -> Option<isize>;
    fn renderable_to_visual_column(&self, col: isize) -> Option<isize>;

    /// Visual to renderable on both axes; `None` when either axis is hidden
    /// or trimmed.
    fn visual_to_renderable_coords(&self, coords: CellCoords) -> Option<CellCoords> {
        Some(self.create_cell_coords(
            self.visual_to_renderable_row(coords.row)?,
            self.visual_to_renderable_column(coords.col)?,
        ))
    }

    /// Renderable to visual on both axes; `None` when either axis is out of range.
    fn renderable_to_visual_coords(&self, coords: CellCoords) -> Option<CellCoords> {
        Some(self.create_cell_coords(
            self.renderable_to_visual_row(coords.row)?,
            self.renderable_to_visual_column(coords.col)?,
        ))
    }

    fn create_cell_coords(&self, row: isize, col: isize) -> CellCoords {
        CellCoords::new(row, col)
    }
}

/// Which edge of the table a movement was clamped against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClampDirection {
    /// Stopped at the first row/column
    Start,
    #[default]
    None,
    /// Stopped at the last row/column
    End,
}

impl ClampDirection {
    /// -1, 0 or +1.
    pub fn signum(self) -> i8 {
        match self {
            Self::Start => -1,
            Self::None => 0,
            Self::End => 1,
        }
    }

    pub fn is_clamped(self) -> bool {
        self != Self::None
    }
}

/// Request to append a row or column before the move can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "axis", rename_all = "camelCase")]
pub enum GrowthRequest {
    /// Insert a row at `at` (the current renderable row count)
    Rows { at: usize },
    /// Insert a column at `at` (the current renderable column count)
    Columns { at: usize },
}

/// Column overflow carried (or refused) onto an adjacent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowWrap {
    /// The wrap was applied (`autoWrapRow` on)
    pub enabled: bool,
    /// The wrap crossed the table end and came back round to the other side
    pub flipped: bool,
}

/// Result of a single transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformed {
    /// Resulting visual coordinates
    pub coords: CellCoords,
    pub row_dir: ClampDirection,
    pub col_dir: ClampDirection,
    pub growth: Option<GrowthRequest>,
    pub row_wrap: Option<RowWrap>,
}

impl Transformed {
    /// No movement: `coords` unchanged, nothing clamped.
    pub fn unchanged(coords: CellCoords) -> Self {
        Self {
            coords,
            row_dir: ClampDirection::None,
            col_dir: ClampDirection::None,
            growth: None,
            row_wrap: None,
        }
    }
}
