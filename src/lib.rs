//! gridcore - coordinate, viewport and selection core of a data grid
//!
//! The pieces a spreadsheet-style grid needs before anything is drawn:
//! - Index mapping between physical, visual and renderable indexes per axis
//!   (trimming, hiding and ordering layers)
//! - Viewport calculation: which rows/columns to render for a scroll offset,
//!   frozen panes, full/partial visibility, page clipping
//! - Keyboard selection movement with wrap, clamp, header navigation and growth
//! - Focus handoff between the grid and the page on Tab/Shift+Tab
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridcore';
//! await init();
//! const view = new GridView(1000, 26, { rowHeaders: true, autoWrapRow: true });
//! view.resize(800, 600);
//! view.select_cell(0, 0);
//! if (view.key_down(event.key, event.ctrlKey, event.shiftKey)) event.preventDefault();
//! const rows = view.rendered_rows();
//! ```

pub mod error;
pub mod focus;
pub mod grid;
pub mod index_mapper;
pub mod layout;
pub mod selection;
pub mod types;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main entry points
pub use error::{GridError, Result};
pub use grid::{Grid, GridEvent, LocalHooks};
pub use index_mapper::{IndexMapper, LayerKind, LayerValues};
pub use viewer::GridView;

pub use types::*;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
