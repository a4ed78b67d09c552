//! Browser-facing surface: keyboard mapping, the `GridView` facade exported
//! to JavaScript, and DOM geometry for the trimming container.
//!
//! `GridView` owns a [`Grid`], its scroll [`Viewport`] and the
//! [`FocusCoordinator`]. The host forwards key presses and scroll/resize
//! events; the view answers with which rows and columns to draw.

#[cfg(target_arch = "wasm32")]
mod dom;
mod keyboard;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRectProvider;
pub use keyboard::{action_for_key, JumpTarget, NavAction};

use tracing::debug;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::types::SelectionRange;

use crate::focus::{FocusCoordinator, FocusDecision};
use crate::grid::Grid;
use crate::layout::{ScrollSnap, Viewport};
use crate::selection::Transformed;
use crate::types::{CellCoords, GridSettings};

/// The grid view exported to JavaScript
#[wasm_bindgen]
pub struct GridView {
    grid: Grid,
    viewport: Viewport,
    focus: FocusCoordinator,
    /// Keyboard focus is inside the grid
    listening: bool,
    #[cfg(target_arch = "wasm32")]
    container: Option<web_sys::Element>,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Create a view over `rows` × `cols` cells. `settings` is a plain object
    /// with camelCase keys; `undefined` keeps the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, settings: JsValue) -> Result<GridView, JsValue> {
        console_error_panic_hook::set_once();

        let settings: GridSettings = if settings.is_undefined() || settings.is_null() {
            GridSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings)?
        };
        Ok(Self::with_settings(rows as usize, cols as usize, settings))
    }

    /// Element whose ancestors clip the grid on the page.
    pub fn attach(&mut self, container: web_sys::Element) {
        self.container = Some(container);
    }

    /// Current selection as `{ highlight, from, to }`, or `null`.
    pub fn selection(&self) -> Result<JsValue, JsValue> {
        let range: Option<SelectionRange> = self.grid.selected_range();
        Ok(serde_wasm_bindgen::to_value(&range)?)
    }

    /// Whether the visual cell is actually on screen once page scroll and
    /// clipping ancestors are taken into account.
    pub fn is_cell_visible_in_page(&self, row: u32, col: u32) -> bool {
        let Some(container) = &self.container else {
            return false;
        };
        let provider = DomRectProvider::new(container.clone());
        let rows = self.grid.row_layout();
        let columns = self.grid.column_layout();
        let overscan = self.grid.settings().render_overscan;
        let row_calc = self.viewport.row_calculator(&rows, overscan);
        let col_calc = self.viewport.column_calculator(&columns, overscan);

        let renderable_row = self.grid.row_mapper().visual_to_renderable(row as usize);
        let renderable_col = self.grid.column_mapper().visual_to_renderable(col as usize);
        match (renderable_row, renderable_col) {
            (Some(r), Some(c)) => {
                row_calc.is_index_visible_in_trimming_container(r, &provider)
                    && col_calc.is_index_visible_in_trimming_container(c, &provider)
            }
            _ => false,
        }
    }
}

// ============================================================================
// Shared API
// ============================================================================

#[wasm_bindgen]
impl GridView {
    /// Handle a key press while the grid has focus.
    ///
    /// Returns `true` when the grid consumed the key (the host should call
    /// `preventDefault`), `false` when the browser should handle it, which
    /// for Tab means moving focus out of the grid.
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        if !self.listening {
            return false;
        }
        if key == "Tab" && !ctrl {
            let (transformed, decision) = self.focus.handle_tab(&mut self.grid, shift);
            if decision == FocusDecision::Release {
                self.listening = false;
                return false;
            }
            let flipped = transformed
                .and_then(|t| t.row_wrap)
                .is_some_and(|wrap| wrap.flipped);
            if !flipped {
                self.scroll_to_selection(transformed.as_ref());
            }
            return true;
        }

        let Some(action) = action_for_key(key, ctrl, shift) else {
            return false;
        };
        let transformed = self.grid.apply(action);
        self.focus.remember(&self.grid);
        self.scroll_to_selection(transformed.as_ref());
        transformed.is_some()
    }

    /// Select a visual cell; negative indexes address headers.
    pub fn select_cell(&mut self, row: i32, col: i32) -> bool {
        let (Ok(row), Ok(col)) = (isize::try_from(row), isize::try_from(col)) else {
            return false;
        };
        let selected = self.grid.select_cell(CellCoords::new(row, col));
        if selected {
            self.listening = true;
            self.focus.remember(&self.grid);
        }
        selected
    }

    pub fn deselect(&mut self) {
        self.grid.deselect();
    }

    /// Focus arrived from the element before the grid (Tab from above).
    pub fn focus_from_above(&mut self) -> bool {
        self.listening = true;
        self.focus.focus_from_above(&mut self.grid).is_some()
    }

    /// Focus arrived from the element after the grid (Shift+Tab from below).
    pub fn focus_from_below(&mut self) -> bool {
        self.listening = true;
        self.focus.focus_from_below(&mut self.grid).is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Hide or show a visual row.
    pub fn set_row_hidden(&mut self, visual: u32, hidden: bool) -> bool {
        Self::set_hidden(self.grid.row_mapper_mut(), visual, hidden)
    }

    /// Hide or show a visual column.
    pub fn set_column_hidden(&mut self, visual: u32, hidden: bool) -> bool {
        Self::set_hidden(self.grid.column_mapper_mut(), visual, hidden)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport.resize(width, height);
        let (rows, columns) = (self.grid.row_layout(), self.grid.column_layout());
        self.viewport.clamp_scroll(&rows, &columns);
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        let (rows, columns) = (self.grid.row_layout(), self.grid.column_layout());
        self.viewport.set_scroll(x, y, &rows, &columns);
    }

    pub fn scroll_x(&self) -> f32 {
        self.viewport.scroll_x
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    /// Visual indexes of the rows to draw (frozen rows first).
    pub fn rendered_rows(&self) -> Vec<u32> {
        let rows = self.grid.row_layout();
        let calc = self
            .viewport
            .row_calculator(&rows, self.grid.settings().render_overscan);
        let mapper = self.grid.row_mapper();
        calc.rendered_indexes()
            .filter_map(|r| mapper.renderable_to_visual(r))
            .filter_map(|v| u32::try_from(v).ok())
            .collect()
    }

    /// Visual indexes of the columns to draw (frozen columns first).
    pub fn rendered_columns(&self) -> Vec<u32> {
        let columns = self.grid.column_layout();
        let calc = self
            .viewport
            .column_calculator(&columns, self.grid.settings().render_overscan);
        let mapper = self.grid.column_mapper();
        calc.rendered_indexes()
            .filter_map(|c| mapper.renderable_to_visual(c))
            .filter_map(|v| u32::try_from(v).ok())
            .collect()
    }
}

// ============================================================================
// Native / internal API
// ============================================================================

impl GridView {
    /// Create a view without going through JavaScript values.
    pub fn with_settings(rows: usize, cols: usize, settings: GridSettings) -> Self {
        Self {
            grid: Grid::new(rows, cols, settings),
            viewport: Viewport::new(),
            focus: FocusCoordinator::new(),
            listening: false,
            #[cfg(target_arch = "wasm32")]
            container: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn set_hidden(mapper: &mut crate::index_mapper::IndexMapper, visual: u32, hidden: bool) -> bool {
        const HIDDEN_LAYER: &str = "hidden";
        if !mapper.has_layer(HIDDEN_LAYER)
            && mapper
                .register_layer(HIDDEN_LAYER, crate::index_mapper::LayerKind::Hiding, false)
                .is_err()
        {
            return false;
        }
        mapper.hide_visual(HIDDEN_LAYER, visual as usize, hidden).is_ok()
    }

    /// Scroll-follow: keep the highlight fully visible after a move.
    fn scroll_to_selection(&mut self, transformed: Option<&Transformed>) {
        let Some(coords) = transformed.map(|t| t.coords) else {
            return;
        };
        let row = coords
            .data_row()
            .and_then(|r| self.grid.row_mapper().visual_to_renderable(r));
        let col = coords
            .data_col()
            .and_then(|c| self.grid.column_mapper().visual_to_renderable(c));
        let (rows, columns) = (self.grid.row_layout(), self.grid.column_layout());
        if self
            .viewport
            .scroll_to_cell(&rows, &columns, row, col, ScrollSnap::Auto)
        {
            debug!(
                scroll_x = self.viewport.scroll_x,
                scroll_y = self.viewport.scroll_y,
                "scrolled to selection"
            );
        }
    }
}
