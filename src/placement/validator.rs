//! Socket-level placement validation
//!
//! Checks a candidate (block, rotation, position) against grid state: bounds,
//! occupancy, neighbor socket compatibility and downward support. Horizontal
//! and upward faces tolerate open air (an empty or out-of-bounds neighbor is
//! no constraint); a non-empty Down face must be supported by ground or an
//! occupied cell below. That asymmetry keeps structures from floating while
//! leaving side faces open at structure boundaries.

use crate::catalog::{BlockCatalog, BlockDefinition, Direction, SocketCompatibilityTable};
use crate::grid::Grid;
use crate::rotation::Rotation;
use glam::IVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How `find_valid_rotation` orders its attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationOrder {
    /// Always start from 0 degrees
    #[default]
    Fixed,
    /// Start from a uniformly random rotation, then proceed in +90 steps
    RandomStart,
}

/// Read-only view over the state a placement check needs
pub struct PlacementValidator<'a> {
    grid: &'a Grid,
    catalog: &'a BlockCatalog,
    compat: &'a SocketCompatibilityTable,
}

impl<'a> PlacementValidator<'a> {
    pub fn new(
        grid: &'a Grid,
        catalog: &'a BlockCatalog,
        compat: &'a SocketCompatibilityTable,
    ) -> Self {
        PlacementValidator {
            grid,
            catalog,
            compat,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.grid
    }

    /// True if `block` rotated by `rotation` may be committed at `position`
    pub fn can_place(&self, block: &BlockDefinition, position: IVec3, rotation: Rotation) -> bool {
        if !self.grid.in_bounds(position) || self.grid.is_occupied(position) {
            return false;
        }

        let sockets = block.sockets.rotated(rotation);
        for direction in Direction::ALL {
            let socket = sockets.get(direction);
            if socket.is_none() {
                continue;
            }

            if direction == Direction::Down {
                if !self.has_support(position, socket) {
                    return false;
                }
                continue;
            }

            let neighbor = position + direction.offset();
            // Out of bounds is an open boundary: no constraint
            let Some(cell) = self.grid.cell(neighbor) else {
                continue;
            };
            if !cell.is_occupied() {
                continue;
            }
            let facing = cell.sockets.get(direction.opposite());
            // An empty effective socket on an occupied neighbor is a wildcard
            if facing.is_none() {
                continue;
            }
            if !self.compat.are_compatible(socket, facing) {
                return false;
            }
        }
        true
    }

    /// Support check for a non-empty Down socket: ground at y=0, or a
    /// compatible occupied cell directly below. Open air below is a hard
    /// rejection, unlike the other five faces.
    fn has_support(&self, position: IVec3, down_socket: &crate::catalog::SocketLabel) -> bool {
        if position.y == 0 {
            return match self.grid.ground_socket(position) {
                Some(ground) => self.compat.are_compatible(down_socket, ground),
                None => false,
            };
        }

        let below = position + Direction::Down.offset();
        let Some(cell) = self.grid.cell(below) else {
            return false;
        };
        if !cell.is_occupied() {
            return false;
        }
        let up = cell.sockets.get(Direction::Up);
        !up.is_none() && self.compat.are_compatible(down_socket, up)
    }

    /// First rotation for which `can_place` succeeds. With `try_all` false
    /// only the starting rotation is attempted; `order` picks the start.
    pub fn find_valid_rotation<R: Rng>(
        &self,
        block: &BlockDefinition,
        position: IVec3,
        try_all: bool,
        order: RotationOrder,
        rng: &mut R,
    ) -> Option<Rotation> {
        let mut rotation = match order {
            RotationOrder::Fixed => Rotation::R0,
            RotationOrder::RandomStart => Rotation::ALL[rng.gen_range(0..4)],
        };
        let attempts = if try_all { 4 } else { 1 };
        for _ in 0..attempts {
            if self.can_place(block, position, rotation) {
                return Some(rotation);
            }
            rotation = rotation.next();
        }
        None
    }

    /// Every (catalog index, rotation) pair valid at `position`, across the
    /// whole catalog and all four rotations, in catalog order.
    pub fn valid_placements(&self, position: IVec3) -> Vec<(usize, Rotation)> {
        let mut placements = Vec::new();
        for (index, block) in self.catalog.all().iter().enumerate() {
            for rotation in Rotation::ALL {
                if self.can_place(block, position, rotation) {
                    placements.push((index, rotation));
                }
            }
        }
        placements
    }
}
