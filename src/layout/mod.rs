//! Layout engine: per-axis positions, viewport windows and scrolling.
//!
//! This module handles:
//! - Pre-computing index positions from sizes (prefix sums)
//! - Calculating which renderable indexes to materialise for a scroll position
//! - Full/partial visibility, including clipping by the page (trimming container)
//! - Managing viewport state (scroll position, scroll-follow)

mod axis_layout;
mod calculator;
mod trimming;
mod viewport;

pub use axis_layout::AxisLayout;
pub use calculator::{IndexRange, ViewportCalculator};
pub use trimming::{visible_rect, Rect, StaticRects, VisibleRectProvider};
pub use viewport::{ScrollSnap, Viewport};
