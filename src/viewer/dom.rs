//! Trimming-container geometry read from the live DOM.

use web_sys::{Element, Window};

use crate::layout::{Rect, VisibleRectProvider};

/// Reads the grid element's box and every clipping ancestor up to the window.
#[derive(Debug, Clone)]
pub struct DomRectProvider {
    element: Element,
}

impl DomRectProvider {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_rect(rect: &web_sys::DomRect) -> Rect {
    Rect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        right: rect.right() as f32,
        bottom: rect.bottom() as f32,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn window_rect(window: &Window) -> Option<Rect> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Rect::new(0.0, 0.0, width as f32, height as f32))
}

/// Only ancestors that hide overflow clip the grid.
fn clips(window: &Window, element: &Element) -> bool {
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return false;
    };
    ["overflow", "overflow-x", "overflow-y"].iter().any(|property| {
        style
            .get_property_value(property)
            .is_ok_and(|value| value != "visible" && !value.is_empty())
    })
}

impl VisibleRectProvider for DomRectProvider {
    fn grid_rect(&self) -> Rect {
        to_rect(&self.element.get_bounding_client_rect())
    }

    fn ancestor_rects(&self) -> Vec<Rect> {
        let Some(window) = web_sys::window() else {
            return Vec::new();
        };
        let mut rects = Vec::new();
        let mut current = self.element.parent_element();
        while let Some(ancestor) = current {
            if clips(&window, &ancestor) {
                rects.push(to_rect(&ancestor.get_bounding_client_rect()));
            }
            current = ancestor.parent_element();
        }
        if let Some(viewport) = window_rect(&window) {
            rects.push(viewport);
        }
        rects
    }
}
