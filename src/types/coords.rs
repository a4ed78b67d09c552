use serde::{Deserialize, Serialize};

/// Row/column extent used to validate coordinates.
///
/// Header counts describe how many header rows (above the data) and header
/// columns (before the data) exist. Header cells are addressed with negative
/// indexes: row `-1` is the column-header row nearest to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSize {
    pub count_rows: usize,
    pub count_cols: usize,
    pub count_row_headers: usize,
    pub count_col_headers: usize,
}

/// A (row, column) pair in visual coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellCoords {
    pub row: isize,
    pub col: isize,
}

impl CellCoords {
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Checks whether the coordinates point at a cell or header inside `size`.
    pub fn is_valid(&self, size: &GridSize) -> bool {
        let min_row = -to_signed(size.count_col_headers);
        let min_col = -to_signed(size.count_row_headers);

        self.row >= min_row
            && self.col >= min_col
            && self.row < to_signed(size.count_rows)
            && self.col < to_signed(size.count_cols)
    }

    /// True when either axis points into a header.
    pub fn is_header(&self) -> bool {
        self.row < 0 || self.col < 0
    }

    /// True when both axes point into the data area.
    pub fn is_cell(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    /// True for the top-start corner header.
    pub fn is_corner(&self) -> bool {
        self.row < 0 && self.col < 0
    }

    /// Clamps header indexes to the first data row/column.
    pub fn normalize(self) -> Self {
        Self {
            row: self.row.max(0),
            col: self.col.max(0),
        }
    }

    pub fn is_south_east_of(&self, other: &Self) -> bool {
        self.row >= other.row && self.col >= other.col
    }

    pub fn is_north_west_of(&self, other: &Self) -> bool {
        self.row <= other.row && self.col <= other.col
    }

    pub fn is_south_west_of(&self, other: &Self) -> bool {
        self.row >= other.row && self.col <= other.col
    }

    pub fn is_north_east_of(&self, other: &Self) -> bool {
        self.row <= other.row && self.col >= other.col
    }

    /// Row index when it addresses data (non-negative).
    pub fn data_row(&self) -> Option<usize> {
        usize::try_from(self.row).ok()
    }

    /// Column index when it addresses data (non-negative).
    pub fn data_col(&self) -> Option<usize> {
        usize::try_from(self.col).ok()
    }
}

impl From<(isize, isize)> for CellCoords {
    fn from((row, col): (isize, isize)) -> Self {
        Self { row, col }
    }
}

/// Converts an index or count to the signed coordinate space.
pub(crate) fn to_signed(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn size() -> GridSize {
        GridSize {
            count_rows: 10,
            count_cols: 20,
            count_row_headers: 1,
            count_col_headers: 2,
        }
    }

    #[test]
    fn test_is_valid_includes_headers() {
        let size = size();
        assert!(CellCoords::new(0, 0).is_valid(&size));
        assert!(CellCoords::new(9, 19).is_valid(&size));
        assert!(CellCoords::new(-2, -1).is_valid(&size));
        assert!(!CellCoords::new(-3, 0).is_valid(&size));
        assert!(!CellCoords::new(0, -2).is_valid(&size));
        assert!(!CellCoords::new(10, 0).is_valid(&size));
        assert!(!CellCoords::new(0, 20).is_valid(&size));
    }

    #[test]
    fn test_is_valid_empty_grid() {
        let size = GridSize::default();
        assert!(!CellCoords::new(0, 0).is_valid(&size));
    }

    #[test]
    fn test_header_classification() {
        assert!(CellCoords::new(-1, 3).is_header());
        assert!(!CellCoords::new(-1, 3).is_corner());
        assert!(CellCoords::new(-1, -1).is_corner());
        assert!(CellCoords::new(2, 3).is_cell());
        assert_eq!(CellCoords::new(-1, -4).normalize(), CellCoords::new(0, 0));
    }

    #[test]
    fn test_directional_predicates() {
        let a = CellCoords::new(1, 1);
        let b = CellCoords::new(3, 4);
        assert!(b.is_south_east_of(&a));
        assert!(a.is_north_west_of(&b));
        assert!(!a.is_south_west_of(&b));
        assert!(CellCoords::new(3, 0).is_south_west_of(&a));
        assert!(CellCoords::new(0, 3).is_north_east_of(&a));
    }
}
