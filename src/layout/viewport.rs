//! Viewport scroll state and scroll-follow.

use serde::{Deserialize, Serialize};

use super::{AxisLayout, ViewportCalculator};
use crate::types::Axis;

/// Where a scrolled-to index should end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScrollSnap {
    /// Scroll only as far as needed to show the whole index
    #[default]
    Auto,
    /// Align the index with the start of the scrollable pane
    Start,
    /// Align the index with the end of the scrollable pane
    End,
}

/// Viewport state - represents the visible area of the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Horizontal scroll position in sheet coordinates
    pub scroll_x: f32,
    /// Vertical scroll position in sheet coordinates
    pub scroll_y: f32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Viewport {
    /// Create a new viewport with default values
    pub fn new() -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width: 800.0,
            height: 600.0,
        }
    }

    /// Window over the rows for the current scroll position.
    pub fn row_calculator<'a>(&self, rows: &'a AxisLayout, overscan: f32) -> ViewportCalculator<'a> {
        ViewportCalculator::new(rows, Axis::Row, self.height, self.scroll_y, overscan)
    }

    /// Window over the columns for the current scroll position.
    pub fn column_calculator<'a>(
        &self,
        columns: &'a AxisLayout,
        overscan: f32,
    ) -> ViewportCalculator<'a> {
        ViewportCalculator::new(columns, Axis::Column, self.width, self.scroll_x, overscan)
    }

    /// Clamp scroll position to valid range.
    ///
    /// Scroll positions are relative to the frozen region: the minimum scroll
    /// is the frozen size, the maximum shows the end of the content.
    pub fn clamp_scroll(&mut self, rows: &AxisLayout, columns: &AxisLayout) {
        self.scroll_x = clamp_axis(self.scroll_x, self.width, columns);
        self.scroll_y = clamp_axis(self.scroll_y, self.height, rows);
    }

    /// Scroll by delta amounts
    pub fn scroll_by(&mut self, delta_x: f32, delta_y: f32, rows: &AxisLayout, columns: &AxisLayout) {
        self.scroll_x += delta_x;
        self.scroll_y += delta_y;
        self.clamp_scroll(rows, columns);
    }

    /// Set absolute scroll position
    pub fn set_scroll(&mut self, x: f32, y: f32, rows: &AxisLayout, columns: &AxisLayout) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp_scroll(rows, columns);
    }

    /// Resize the viewport
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Scroll so that the given renderable row/column is fully visible.
    ///
    /// `None` leaves that axis alone. Frozen indexes never cause a scroll.
    /// Returns whether the scroll position changed.
    pub fn scroll_to_cell(
        &mut self,
        rows: &AxisLayout,
        columns: &AxisLayout,
        row: Option<usize>,
        col: Option<usize>,
        snap: ScrollSnap,
    ) -> bool {
        let (old_x, old_y) = (self.scroll_x, self.scroll_y);
        if let Some(row) = row {
            self.scroll_y = scroll_target(rows, row, self.scroll_y, self.height, snap);
        }
        if let Some(col) = col {
            self.scroll_x = scroll_target(columns, col, self.scroll_x, self.width, snap);
        }
        self.clamp_scroll(rows, columns);

        (self.scroll_x - old_x).abs() > f32::EPSILON || (self.scroll_y - old_y).abs() > f32::EPSILON
    }
}

fn clamp_axis(scroll: f32, container: f32, layout: &AxisLayout) -> f32 {
    let frozen = layout.frozen_size();
    let scrollable = layout.total_size() - frozen;
    let visible = container - frozen;
    let max = frozen + (scrollable - visible).max(0.0);
    scroll.clamp(frozen, max.max(frozen))
}

fn scroll_target(layout: &AxisLayout, index: usize, scroll: f32, container: f32, snap: ScrollSnap) -> f32 {
    if index < layout.frozen_count() || index >= layout.count() {
        return scroll;
    }
    let extent = (container - layout.frozen_size()).max(0.0);
    let start = layout.position(index);
    let end = layout.end(index);

    match snap {
        ScrollSnap::Start => start,
        ScrollSnap::End => end - extent,
        ScrollSnap::Auto => {
            if start < scroll {
                start
            } else if end > scroll + extent {
                end - extent
            } else {
                scroll
            }
        }
    }
}
