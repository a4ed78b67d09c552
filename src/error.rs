//! Structured error types for gridcore.
//!
//! Coordinate movement never fails; errors are reserved for malformed layer
//! state handed to an [`IndexMapper`](crate::index_mapper::IndexMapper) and for
//! configuration that cannot be decoded.

use crate::types::Axis;

/// All errors that can occur while mapping indexes or loading settings.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A layer with this name is already registered on the axis.
    #[error("{axis} layer `{name}` is already registered")]
    LayerExists { axis: Axis, name: String },

    /// No layer with this name is registered on the axis.
    #[error("{axis} layer `{name}` is not registered")]
    UnknownLayer { axis: Axis, name: String },

    /// Layer values do not cover every physical index of the axis.
    #[error("{axis} layer `{name}` holds {actual} values, expected {expected}")]
    LayerLength {
        axis: Axis,
        name: String,
        expected: usize,
        actual: usize,
    },

    /// An ordering layer points past the end of the sequence it permutes.
    #[error("{axis} layer `{name}` references position {position} outside 0..{len}")]
    LayerOutOfBounds {
        axis: Axis,
        name: String,
        position: usize,
        len: usize,
    },

    /// A value of the wrong kind was written to a layer.
    #[error("{axis} layer `{name}` is a {kind} layer")]
    LayerKind {
        axis: Axis,
        name: String,
        kind: &'static str,
    },

    /// Index outside the physical or visual range of the axis.
    #[error("{axis} index {index} is outside 0..{len}")]
    IndexOutOfBounds { axis: Axis, index: usize, len: usize },

    /// Settings JSON could not be decoded.
    #[error("Invalid settings: {0}")]
    Config(#[from] serde_json::Error),

    /// Catch-all for string errors raised at the WASM boundary.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

impl From<String> for GridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for GridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
