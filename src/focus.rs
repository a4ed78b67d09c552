//! Keyboard focus handoff between the grid and the surrounding page.
//!
//! Tab/Shift+Tab normally move the selection. The coordinator decides when
//! they should instead leave the grid, and which cell to select when focus
//! comes back from the element above or below the grid.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grid::Grid;
use crate::selection::{TransformationOptions, Transformed};
use crate::types::{to_signed, CellCoords};

/// What the host should do with the key press after the grid handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FocusDecision {
    /// Keep focus; the key press is consumed
    Stay,
    /// Let the browser move focus to the next/previous focusable element
    Release,
}

/// Top-start cell, or the outermost headers when they are navigable.
///
/// `None` when the grid has nothing to select on some axis.
pub fn most_top_start_position(grid: &Grid) -> Option<CellCoords> {
    let col_headers = grid.settings().navigable_col_headers();
    let row_headers = grid.settings().navigable_row_headers();
    let row = if col_headers > 0 {
        -to_signed(col_headers)
    } else {
        grid.renderable_to_visual_row(0)?
    };
    let col = if row_headers > 0 {
        -to_signed(row_headers)
    } else {
        grid.renderable_to_visual_column(0)?
    };
    Some(grid.create_cell_coords(row, col))
}

/// Bottom-end cell. An axis without renderable indexes falls back to its
/// innermost header when headers are navigable.
pub fn most_bottom_end_position(grid: &Grid) -> Option<CellCoords> {
    let row = last_index(
        grid.count_renderable_rows(),
        grid.settings().navigable_col_headers() > 0,
    )?;
    let col = last_index(
        grid.count_renderable_columns(),
        grid.settings().navigable_row_headers() > 0,
    )?;
    Some(grid.create_cell_coords(
        grid.renderable_to_visual_row(row).unwrap_or(row),
        grid.renderable_to_visual_column(col).unwrap_or(col),
    ))
}

fn last_index(count: usize, header_fallback: bool) -> Option<isize> {
    match count.checked_sub(1) {
        Some(last) => Some(to_signed(last)),
        None => header_fallback.then_some(-1),
    }
}

/// Remembers where the selection was when focus left the grid.
#[derive(Debug, Clone, Default)]
pub struct FocusCoordinator {
    recent: Option<CellCoords>,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinates restored on the next focus entry, if any.
    pub fn recent(&self) -> Option<CellCoords> {
        self.recent
    }

    /// Record the grid's current highlight for the next focus entry.
    pub fn remember(&mut self, grid: &Grid) {
        if let Some(range) = grid.selected_range() {
            self.recent = Some(range.highlight);
        }
    }

    /// Focus arrived from the element before the grid.
    pub fn focus_from_above(&mut self, grid: &mut Grid) -> Option<CellCoords> {
        let coords = self.recent.or_else(|| most_top_start_position(grid))?;
        debug!(?coords, "focus entered from above");
        grid.select_cell(coords).then_some(coords)
    }

    /// Focus arrived from the element after the grid.
    pub fn focus_from_below(&mut self, grid: &mut Grid) -> Option<CellCoords> {
        let coords = self.recent.or_else(|| most_bottom_end_position(grid))?;
        debug!(?coords, "focus entered from below");
        grid.select_cell(coords).then_some(coords)
    }

    /// Decide what a Tab/Shift+Tab press that produced `transformed` means.
    ///
    /// Releases focus when Tab navigation is off, nothing is selected, a row
    /// wrap flipped past the table end with `autoWrapRow`, or a row wrap was
    /// needed while `autoWrapRow` is off. Released grids are deselected. With
    /// spare columns configured the grid always keeps focus (Tab grows it).
    pub fn after_tab(
        &mut self,
        grid: &mut Grid,
        transformed: Option<&Transformed>,
        shift: bool,
    ) -> FocusDecision {
        if grid.settings().min_spare_cols > 0 {
            self.remember(grid);
            return FocusDecision::Stay;
        }

        let auto_wrap_row = grid.settings().auto_wrap_row;
        let wrap = transformed.and_then(|t| t.row_wrap);
        let wrapped = wrap.is_some();
        let flipped = wrap.is_some_and(|w| w.flipped);
        let wrapped_out = auto_wrap_row && wrapped && flipped;

        if !grid.settings().tab_navigation || !grid.is_selected() || wrapped_out || (!auto_wrap_row && wrapped) {
            if wrapped_out {
                self.recent = if shift {
                    most_top_start_position(grid)
                } else {
                    most_bottom_end_position(grid)
                };
            } else if grid.settings().tab_navigation {
                self.remember(grid);
            }
            debug!(wrapped, flipped, "releasing focus to the page");
            grid.deselect();
            return FocusDecision::Release;
        }

        self.remember(grid);
        FocusDecision::Stay
    }

    /// Full Tab/Shift+Tab handling: move the selection (when Tab navigation
    /// is on) and decide whether focus stays.
    pub fn handle_tab(&mut self, grid: &mut Grid, shift: bool) -> (Option<Transformed>, FocusDecision) {
        let moves = grid.settings().tab_navigation || grid.settings().min_spare_cols > 0;
        let transformed = if moves {
            grid.transform_start(0, if shift { -1 } else { 1 }, true)
        } else {
            None
        };
        let decision = self.after_tab(grid, transformed.as_ref(), shift);
        (transformed, decision)
    }
}
