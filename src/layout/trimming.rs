//! Visibility inside the trimming container.
//!
//! A grid embedded in a page may be clipped by scrollable ancestors or by the
//! window itself, so its own box overstates what the user can see. The
//! embedding environment supplies the rectangles; this module intersects them.

use serde::{Deserialize, Serialize};

use crate::types::Axis;

/// Axis-aligned rectangle in page (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn has_area(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Overlapping area; `None` when it is empty (zero-area counts as empty).
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let rect = Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };
        rect.has_area().then_some(rect)
    }

    /// Leading and trailing edge along `axis` (rows run vertically).
    pub fn span(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Row => (self.top, self.bottom),
            Axis::Column => (self.left, self.right),
        }
    }
}

/// Geometry supplied by the embedding environment.
pub trait VisibleRectProvider {
    /// Bounding box of the grid's own scroll container.
    fn grid_rect(&self) -> Rect;

    /// Clipping rectangles of the ancestors, innermost first. The last entry
    /// is normally the window.
    fn ancestor_rects(&self) -> Vec<Rect>;
}

/// Fixed rectangles, for hosts that already know their geometry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaticRects {
    pub grid: Rect,
    pub ancestors: Vec<Rect>,
}

impl VisibleRectProvider for StaticRects {
    fn grid_rect(&self) -> Rect {
        self.grid
    }

    fn ancestor_rects(&self) -> Vec<Rect> {
        self.ancestors.clone()
    }
}

/// Walk the ancestor chain and intersect every box with the grid's own.
///
/// `None` means nothing of the grid is on screen: either some ancestor is
/// entirely off screen or the chain clips the grid to zero area.
pub fn visible_rect(provider: &dyn VisibleRectProvider) -> Option<Rect> {
    let grid = provider.grid_rect();
    if !grid.has_area() {
        return None;
    }
    provider
        .ancestor_rects()
        .iter()
        .try_fold(grid, |visible, ancestor| visible.intersect(ancestor))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let touching = Rect::new(100.0, 0.0, 10.0, 10.0);
        assert_eq!(a.intersect(&touching), None);
    }

    #[test]
    fn test_visible_rect_walks_chain() {
        let rects = StaticRects {
            grid: Rect::new(0.0, 0.0, 500.0, 300.0),
            ancestors: vec![
                Rect::new(0.0, 0.0, 400.0, 1000.0),
                Rect::new(-100.0, 100.0, 2000.0, 1000.0),
            ],
        };
        assert_eq!(
            visible_rect(&rects),
            Some(Rect::new(0.0, 100.0, 400.0, 200.0))
        );
    }

    #[test]
    fn test_offscreen_ancestor_hides_grid() {
        let rects = StaticRects {
            grid: Rect::new(0.0, 0.0, 500.0, 300.0),
            ancestors: vec![
                Rect::new(0.0, 0.0, 500.0, 300.0),
                // Window scrolled past the grid
                Rect::new(0.0, 400.0, 1000.0, 800.0),
            ],
        };
        assert_eq!(visible_rect(&rects), None);
    }
}
