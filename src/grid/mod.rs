//! 3D cell grid and its socket state

mod cell;
#[allow(clippy::module_inception)]
mod grid;

pub use cell::{Cell, PlacedBlock};
pub use grid::{Grid, GridConfig};
