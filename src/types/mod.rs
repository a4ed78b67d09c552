//! Data types shared by the index mapper, viewport and selection modules.

mod axis;
mod coords;
mod selection;
mod settings;

pub use axis::*;
pub(crate) use coords::to_signed;
pub use coords::{CellCoords, GridSize};
pub use selection::*;
pub use settings::*;
