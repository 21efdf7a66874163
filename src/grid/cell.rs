//! Grid cell state

use crate::catalog::SocketSet;
use crate::rotation::Rotation;

/// A block committed to a cell: catalog index, the rotation it was placed
/// with, and its socket labels after that rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBlock {
    pub block: usize,
    pub rotation: Rotation,
    pub sockets: SocketSet,
}

/// One cell of the grid.
///
/// `sockets` holds the effective socket value per face: the authoritative
/// values the placement validator reads. For an occupied cell these start as
/// the placed block's rotated sockets; for an empty cell each face mirrors
/// the adjacent occupied neighbor's facing socket (or the ground label on the
/// Down face of a ground-configured y=0 cell).
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub placed: Option<PlacedBlock>,
    pub sockets: SocketSet,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.placed.is_some()
    }
}
