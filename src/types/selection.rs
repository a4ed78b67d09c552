use serde::{Deserialize, Serialize};

use super::CellCoords;

/// Type of selection, derived from which corners sit in headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionType {
    /// Standard cell selection (default)
    #[default]
    CellRange,
    /// Entire row(s) selected, started from a row header
    RowRange,
    /// Entire column(s) selected, started from a column header
    ColumnRange,
    /// All cells selected (corner header)
    All,
}

/// A selection range: the focused `highlight` plus the `from`/`to` corners.
///
/// The highlight always lies inside or on the boundary of the rectangle
/// spanned by `from` and `to`. Constructors and mutators restore the
/// invariant by moving the highlight onto `from` when it would escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub highlight: CellCoords,
    pub from: CellCoords,
    pub to: CellCoords,
}

impl SelectionRange {
    pub fn new(highlight: CellCoords, from: CellCoords, to: CellCoords) -> Self {
        let mut range = Self {
            highlight,
            from,
            to,
        };
        range.restore_highlight();
        range
    }

    /// A single-cell range.
    pub fn single(coords: CellCoords) -> Self {
        Self {
            highlight: coords,
            from: coords,
            to: coords,
        }
    }

    /// Range spanning `from`..`to` with the highlight on `from`.
    pub fn spanning(from: CellCoords, to: CellCoords) -> Self {
        Self {
            highlight: from,
            from,
            to,
        }
    }

    /// Get normalized bounds (min_row, min_col, max_row, max_col)
    pub fn bounds(&self) -> (isize, isize, isize, isize) {
        (
            self.from.row.min(self.to.row),
            self.from.col.min(self.to.col),
            self.from.row.max(self.to.row),
            self.from.col.max(self.to.col),
        )
    }

    pub fn top_start_corner(&self) -> CellCoords {
        let (min_row, min_col, _, _) = self.bounds();
        CellCoords::new(min_row, min_col)
    }

    pub fn bottom_end_corner(&self) -> CellCoords {
        let (_, _, max_row, max_col) = self.bounds();
        CellCoords::new(max_row, max_col)
    }

    pub fn includes(&self, coords: &CellCoords) -> bool {
        let (min_row, min_col, max_row, max_col) = self.bounds();
        (min_row..=max_row).contains(&coords.row) && (min_col..=max_col).contains(&coords.col)
    }

    pub fn is_single(&self) -> bool {
        self.from == self.to
    }

    /// Moves the `to` corner, keeping `from` and, when still covered, the highlight.
    pub fn set_to(&mut self, to: CellCoords) {
        self.to = to;
        self.restore_highlight();
    }

    /// Classifies the range by which of its corners address headers.
    pub fn kind(&self) -> SelectionType {
        let row_header = self.from.col < 0 || self.to.col < 0;
        let col_header = self.from.row < 0 || self.to.row < 0;

        match (row_header, col_header) {
            (true, true) => SelectionType::All,
            (true, false) => SelectionType::RowRange,
            (false, true) => SelectionType::ColumnRange,
            (false, false) => SelectionType::CellRange,
        }
    }

    fn restore_highlight(&mut self) {
        if !self.includes(&self.highlight) {
            self.highlight = self.from;
        }
    }
}
