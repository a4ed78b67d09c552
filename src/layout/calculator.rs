//! Viewport calculator for one axis.
//!
//! Created per draw cycle from the current scroll offset and container size;
//! nothing is kept across draws. Construction is O(log n) over a prebuilt
//! [`AxisLayout`], and every predicate afterwards is O(1).
//!
//! Offsets are in sheet coordinates. Frozen leading indexes are pinned to the
//! start of the container; the scrollable pane shows
//! `[scroll_offset, scroll_offset + container_size - frozen_size)`, and the
//! scroll offset never drops below the frozen size.

use super::trimming::{visible_rect, VisibleRectProvider};
use super::AxisLayout;
use crate::types::Axis;

/// Inclusive range of renderable indexes.
pub type IndexRange = (usize, usize);

/// Calculated viewport window of one axis.
#[derive(Debug, Clone)]
pub struct ViewportCalculator<'a> {
    layout: &'a AxisLayout,
    axis: Axis,
    container_size: f32,
    /// First visible sheet offset of the scrollable pane
    view_start: f32,
    rendered: Option<IndexRange>,
    fully_visible: Option<IndexRange>,
    partially_visible: Option<IndexRange>,
}

impl<'a> ViewportCalculator<'a> {
    /// Calculate the window for `layout` seen through a container of
    /// `container_size` pixels scrolled to `scroll_offset`, rendering
    /// `overscan` extra pixels past both edges.
    pub fn new(
        layout: &'a AxisLayout,
        axis: Axis,
        container_size: f32,
        scroll_offset: f32,
        overscan: f32,
    ) -> Self {
        let frozen_size = layout.frozen_size();
        let frozen = layout.frozen_count();
        let view_start = scroll_offset.max(frozen_size);
        let view_end = view_start + (container_size - frozen_size).max(0.0);

        let mut calculator = Self {
            layout,
            axis,
            container_size,
            view_start,
            rendered: None,
            fully_visible: None,
            partially_visible: None,
        };
        if container_size <= 0.0 || view_end <= view_start {
            return calculator;
        }

        let overscan = overscan.max(0.0);
        calculator.rendered = non_empty(
            layout.first_ending_after(view_start - overscan).max(frozen),
            layout.count_starting_before(view_end + overscan),
        );
        calculator.partially_visible = non_empty(
            layout.first_ending_after(view_start).max(frozen),
            layout.count_starting_before(view_end),
        );
        calculator.fully_visible = non_empty(
            layout.count_starting_before(view_start).max(frozen),
            layout.count_ending_at_or_before(view_end),
        );
        calculator
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// First scrollable index to materialise (frozen indexes excluded).
    pub fn first_rendered_index(&self) -> Option<usize> {
        self.rendered.map(|(first, _)| first)
    }

    /// Last scrollable index to materialise (frozen indexes excluded).
    pub fn last_rendered_index(&self) -> Option<usize> {
        self.rendered.map(|(_, last)| last)
    }

    pub fn rendered_range(&self) -> Option<IndexRange> {
        self.rendered
    }

    /// Frozen indexes, rendered regardless of scroll while the container has size.
    pub fn frozen_range(&self) -> Option<IndexRange> {
        if self.container_size <= 0.0 {
            return None;
        }
        non_empty(0, self.layout.frozen_count())
    }

    /// Frozen plus scrollable indexes to render, in order.
    pub fn rendered_indexes(&self) -> impl Iterator<Item = usize> {
        let frozen = self.frozen_range().map(|(first, last)| first..last + 1);
        let rendered = self.rendered.map(|(first, last)| first..last + 1);
        frozen.into_iter().flatten().chain(rendered.into_iter().flatten())
    }

    pub fn rendered_count(&self) -> usize {
        self.rendered_indexes().count()
    }

    pub fn first_fully_visible_index(&self) -> Option<usize> {
        self.fully_visible.map(|(first, _)| first)
    }

    pub fn last_fully_visible_index(&self) -> Option<usize> {
        self.fully_visible.map(|(_, last)| last)
    }

    pub fn first_partially_visible_index(&self) -> Option<usize> {
        self.partially_visible.map(|(first, _)| first)
    }

    pub fn last_partially_visible_index(&self) -> Option<usize> {
        self.partially_visible.map(|(_, last)| last)
    }

    /// Both edges of `index` lie inside the container (no overscan).
    pub fn is_index_fully_visible(&self, index: usize) -> bool {
        let Some((start, end)) = self.screen_span(index) else {
            return false;
        };
        let (pane_start, pane_end) = self.pane_span(index);
        start >= pane_start && end <= pane_end
    }

    /// Any part of `index` lies inside the container (no overscan).
    pub fn is_index_partially_visible(&self, index: usize) -> bool {
        let Some((start, end)) = self.screen_span(index) else {
            return false;
        };
        let (pane_start, pane_end) = self.pane_span(index);
        start < pane_end && end > pane_start
    }

    /// Partial visibility measured against what the page actually shows:
    /// the grid's box intersected with every clipping ancestor.
    pub fn is_index_visible_in_trimming_container(
        &self,
        index: usize,
        provider: &dyn VisibleRectProvider,
    ) -> bool {
        if !self.is_index_partially_visible(index) {
            return false;
        }
        let Some(visible) = visible_rect(provider) else {
            return false;
        };
        let Some((start, end)) = self.screen_span(index) else {
            return false;
        };
        let (grid_start, _) = provider.grid_rect().span(self.axis);
        let (visible_start, visible_end) = visible.span(self.axis);

        grid_start + start < visible_end && grid_start + end > visible_start
    }

    /// Offset of `index` from the start of the container, as drawn.
    pub fn screen_offset(&self, index: usize) -> Option<f32> {
        self.screen_span(index).map(|(start, _)| start)
    }

    fn screen_span(&self, index: usize) -> Option<(f32, f32)> {
        if self.container_size <= 0.0 || index >= self.layout.count() {
            return None;
        }
        let position = self.layout.position(index);
        let end = self.layout.end(index);
        if index < self.layout.frozen_count() {
            Some((position, end))
        } else {
            let shift = self.layout.frozen_size() - self.view_start;
            Some((position + shift, end + shift))
        }
    }

    /// Screen span of the pane `index` is drawn in.
    fn pane_span(&self, index: usize) -> (f32, f32) {
        let frozen_size = self.layout.frozen_size().min(self.container_size);
        if index < self.layout.frozen_count() {
            (0.0, self.container_size)
        } else {
            (frozen_size, self.container_size)
        }
    }
}

fn non_empty(first: usize, end_exclusive: usize) -> Option<IndexRange> {
    (first < end_exclusive).then(|| (first, end_exclusive - 1))
}
