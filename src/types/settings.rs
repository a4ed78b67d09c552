use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Default row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 23.0;

/// Default column width in pixels
pub const DEFAULT_COL_WIDTH: f32 = 50.0;

/// Grid configuration consumed by the selection transformer, the focus
/// coordinator and the viewport.
///
/// Deserialises from camelCase JSON. Header options accept either a flag
/// (`"rowHeaders": true` means one header column) or an explicit count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSettings {
    /// Headers take part in keyboard navigation as negative coordinates
    pub navigable_headers: bool,
    /// Moving past the last column continues on the next row
    pub auto_wrap_row: bool,
    /// Moving past the last row continues on the next column
    pub auto_wrap_col: bool,
    /// Tab/Shift+Tab move the selection instead of leaving the grid
    pub tab_navigation: bool,
    /// Number of row header columns (left of the data)
    #[serde(deserialize_with = "header_count")]
    pub row_headers: usize,
    /// Number of column header rows (above the data)
    #[serde(deserialize_with = "header_count")]
    pub col_headers: usize,
    /// Leading rows that never scroll
    pub fixed_rows_top: usize,
    /// Trailing rows pinned to the bottom; blocks row growth while non-zero
    pub fixed_rows_bottom: usize,
    /// Leading columns that never scroll
    pub fixed_columns_start: usize,
    /// Spare rows kept at the end; enables row growth on overflow
    pub min_spare_rows: usize,
    /// Spare columns kept at the end; enables column growth on overflow
    pub min_spare_cols: usize,
    /// Row height used when no explicit height is known
    pub default_row_height: f32,
    /// Column width used when no explicit width is known
    pub default_col_width: f32,
    /// Extra pixels rendered beyond each viewport edge
    pub render_overscan: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            navigable_headers: false,
            auto_wrap_row: false,
            auto_wrap_col: false,
            tab_navigation: true,
            row_headers: 0,
            col_headers: 0,
            fixed_rows_top: 0,
            fixed_rows_bottom: 0,
            fixed_columns_start: 0,
            min_spare_rows: 0,
            min_spare_cols: 0,
            default_row_height: DEFAULT_ROW_HEIGHT,
            default_col_width: DEFAULT_COL_WIDTH,
            render_overscan: 0.0,
        }
    }
}

impl GridSettings {
    /// Parse settings from a JSON object. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Row header count as seen by navigation (0 unless headers are navigable).
    pub fn navigable_row_headers(&self) -> usize {
        if self.navigable_headers {
            self.row_headers
        } else {
            0
        }
    }

    /// Column header count as seen by navigation (0 unless headers are navigable).
    pub fn navigable_col_headers(&self) -> usize {
        if self.navigable_headers {
            self.col_headers
        } else {
            0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HeaderCount {
    Flag(bool),
    Count(usize),
}

fn header_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match HeaderCount::deserialize(deserializer)? {
        HeaderCount::Flag(true) => 1,
        HeaderCount::Flag(false) => 0,
        HeaderCount::Count(n) => n,
    })
}
