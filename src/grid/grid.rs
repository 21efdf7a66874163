//! The 3D placement grid
//!
//! Fixed-size array of cells with a per-column ground configuration for the
//! y=0 layer. Placing or clearing a block keeps the effective socket values
//! of the cell and all in-bounds neighbors bidirectionally mirrored: a cell's
//! socket facing a neighbor always equals that neighbor's socket facing back.

use crate::catalog::{Direction, SocketLabel, SocketSet};
use crate::error::{ForgeError, ForgeResult};
use crate::grid::{Cell, PlacedBlock};
use crate::rotation::Rotation;
use glam::{IVec3, Vec2};
use serde::{Deserialize, Serialize};

/// Static grid setup: dimensions, ground columns and the ground socket label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub dimensions: IVec3,
    /// (x, z) columns whose y=0 cell has ground support
    #[serde(default)]
    pub ground_columns: Vec<[i32; 2]>,
    /// Give every column ground support, ignoring `ground_columns`
    #[serde(default)]
    pub full_ground: bool,
    /// Socket label exposed on the Down face of ground-configured y=0 cells
    pub ground_label: SocketLabel,
}

impl GridConfig {
    /// The common authoring case: every column has ground support
    pub fn with_full_ground(dimensions: IVec3, ground_label: SocketLabel) -> Self {
        GridConfig {
            dimensions,
            ground_columns: Vec::new(),
            full_ground: true,
            ground_label,
        }
    }
}

/// Dx * Dy * Dz cells, created once and never resized
#[derive(Debug, Clone)]
pub struct Grid {
    dimensions: IVec3,
    cells: Vec<Cell>,
    /// Per-(x,z) ground flag, indexed x + dimensions.x * z
    ground: Vec<bool>,
    ground_label: SocketLabel,
}

impl Grid {
    pub fn new(config: &GridConfig) -> ForgeResult<Self> {
        let dims = config.dimensions;
        if dims.x <= 0 || dims.y <= 0 || dims.z <= 0 {
            return Err(ForgeError::InvalidDimensions(dims));
        }

        let cell_count = (dims.x * dims.y * dims.z) as usize;
        let column_count = (dims.x * dims.z) as usize;
        let mut ground = vec![config.full_ground; column_count];
        if !config.full_ground {
            for &[x, z] in &config.ground_columns {
                if x >= 0 && x < dims.x && z >= 0 && z < dims.z {
                    ground[(x + dims.x * z) as usize] = true;
                }
            }
        }

        let mut grid = Grid {
            dimensions: dims,
            cells: vec![Cell::default(); cell_count],
            ground,
            ground_label: config.ground_label.clone(),
        };

        // Ground-configured y=0 cells expose the ground label on their Down face
        if !grid.ground_label.is_none() {
            for z in 0..dims.z {
                for x in 0..dims.x {
                    let position = IVec3::new(x, 0, z);
                    if grid.has_ground(x, z) {
                        let label = grid.ground_label.clone();
                        let index = grid.index(position);
                        grid.cells[index].sockets.set(Direction::Down, label);
                    }
                }
            }
        }

        Ok(grid)
    }

    pub fn dimensions(&self) -> IVec3 {
        self.dimensions
    }

    pub fn in_bounds(&self, position: IVec3) -> bool {
        position.x >= 0
            && position.x < self.dimensions.x
            && position.y >= 0
            && position.y < self.dimensions.y
            && position.z >= 0
            && position.z < self.dimensions.z
    }

    fn index(&self, position: IVec3) -> usize {
        debug_assert!(self.in_bounds(position));
        (position.x + self.dimensions.x * (position.y + self.dimensions.y * position.z)) as usize
    }

    fn position_of(&self, index: usize) -> IVec3 {
        let i = index as i32;
        let x = i % self.dimensions.x;
        let y = (i / self.dimensions.x) % self.dimensions.y;
        let z = i / (self.dimensions.x * self.dimensions.y);
        IVec3::new(x, y, z)
    }

    pub fn cell(&self, position: IVec3) -> Option<&Cell> {
        if self.in_bounds(position) {
            Some(&self.cells[self.index(position)])
        } else {
            None
        }
    }

    pub fn is_occupied(&self, position: IVec3) -> bool {
        self.cell(position).map_or(false, Cell::is_occupied)
    }

    pub fn has_ground(&self, x: i32, z: i32) -> bool {
        if x < 0 || x >= self.dimensions.x || z < 0 || z >= self.dimensions.z {
            return false;
        }
        self.ground[(x + self.dimensions.x * z) as usize]
    }

    /// The ground socket supporting `position`, if any: present only at y=0,
    /// on ground-configured columns, with a non-empty ground label.
    pub fn ground_socket(&self, position: IVec3) -> Option<&SocketLabel> {
        if position.y == 0
            && self.has_ground(position.x, position.z)
            && !self.ground_label.is_none()
        {
            Some(&self.ground_label)
        } else {
            None
        }
    }

    /// Commit a block to a cell. `sockets` must be the block's rotated socket
    /// set. The block's outward-facing sockets are mirrored onto every
    /// in-bounds neighbor's slot facing back toward this cell.
    ///
    /// Returns false (leaving the grid untouched) if the position is out of
    /// bounds or already occupied.
    pub fn place(
        &mut self,
        position: IVec3,
        block: usize,
        rotation: Rotation,
        sockets: SocketSet,
    ) -> bool {
        if !self.in_bounds(position) {
            return false;
        }
        let index = self.index(position);
        if self.cells[index].is_occupied() {
            return false;
        }

        for direction in Direction::ALL {
            let neighbor = position + direction.offset();
            if !self.in_bounds(neighbor) {
                continue;
            }
            let outward = sockets.get(direction).clone();
            let neighbor_index = self.index(neighbor);
            self.cells[neighbor_index]
                .sockets
                .set(direction.opposite(), outward);
        }

        self.cells[index].sockets = sockets.clone();
        self.cells[index].placed = Some(PlacedBlock {
            block,
            rotation,
            sockets,
        });
        true
    }

    /// Remove the block at `position`, restoring this cell's effective
    /// sockets from ground config and occupied neighbors, and restoring every
    /// neighbor's slot facing this cell. Returns the removed block, or None
    /// if the cell was empty or out of bounds.
    pub fn clear(&mut self, position: IVec3) -> Option<PlacedBlock> {
        if !self.in_bounds(position) {
            return None;
        }
        let index = self.index(position);
        let removed = self.cells[index].placed.take()?;

        let mut sockets = SocketSet::empty();
        if let Some(ground) = self.ground_socket(position) {
            sockets.set(Direction::Down, ground.clone());
        }
        for direction in Direction::ALL {
            let neighbor = position + direction.offset();
            if !self.in_bounds(neighbor) {
                continue;
            }
            let neighbor_index = self.index(neighbor);
            if let Some(placed) = &self.cells[neighbor_index].placed {
                // Inherit the neighbor's outward socket facing this cell
                sockets.set(direction, placed.sockets.get(direction.opposite()).clone());
            }
        }
        self.cells[index].sockets = sockets;

        for direction in Direction::ALL {
            let neighbor = position + direction.offset();
            if !self.in_bounds(neighbor) {
                continue;
            }
            let neighbor_index = self.index(neighbor);
            // An occupied neighbor gets its own placed socket back; an empty
            // neighbor's slot facing an empty cell holds no value.
            let restored = match &self.cells[neighbor_index].placed {
                Some(placed) => placed.sockets.get(direction.opposite()).clone(),
                None => SocketLabel::none(),
            };
            self.cells[neighbor_index]
                .sockets
                .set(direction.opposite(), restored);
        }

        Some(removed)
    }

    /// All committed placements, for reading back the final structure
    pub fn occupied(&self) -> impl Iterator<Item = (IVec3, &PlacedBlock)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.placed.as_ref().map(|p| (self.position_of(i), p)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Center of the grid on the horizontal plane, in cell coordinates
    pub fn center_xz(&self) -> Vec2 {
        Vec2::new(
            (self.dimensions.x - 1) as f32 * 0.5,
            (self.dimensions.z - 1) as f32 * 0.5,
        )
    }

    /// Horizontal distance from the center to the farthest column
    pub fn max_horizontal_distance(&self) -> f32 {
        self.center_xz().distance(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_sockets() -> SocketSet {
        SocketSet::new(
            SocketLabel::from("open"),
            SocketLabel::from("floor"),
            SocketLabel::none(),
            SocketLabel::none(),
            SocketLabel::from("wall"),
            SocketLabel::from("wall"),
        )
    }

    fn test_grid() -> Grid {
        let config = GridConfig::with_full_ground(IVec3::new(3, 2, 3), SocketLabel::from("ground"));
        Grid::new(&config).unwrap()
    }

    #[test]
    fn test_rejects_nonpositive_dimensions() {
        let config = GridConfig::with_full_ground(IVec3::new(3, 0, 3), SocketLabel::from("ground"));
        assert!(matches!(
            Grid::new(&config),
            Err(ForgeError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_ground_socket_only_at_configured_columns() {
        let config = GridConfig {
            dimensions: IVec3::new(2, 2, 2),
            ground_columns: vec![[0, 0]],
            full_ground: false,
            ground_label: SocketLabel::from("ground"),
        };
        let grid = Grid::new(&config).unwrap();

        assert!(grid.ground_socket(IVec3::new(0, 0, 0)).is_some());
        assert!(grid.ground_socket(IVec3::new(1, 0, 0)).is_none());
        assert!(grid.ground_socket(IVec3::new(0, 1, 0)).is_none());

        let cell = grid.cell(IVec3::new(0, 0, 0)).unwrap();
        assert_eq!(cell.sockets.get(Direction::Down).as_str(), "ground");
    }

    #[test]
    fn test_place_mirrors_sockets_onto_neighbors() {
        let mut grid = test_grid();
        let position = IVec3::new(1, 0, 1);
        assert!(grid.place(position, 0, Rotation::R0, wall_sockets()));

        // Right face "wall" lands on the right neighbor's Left slot
        let right = grid.cell(IVec3::new(2, 0, 1)).unwrap();
        assert_eq!(right.sockets.get(Direction::Left).as_str(), "wall");

        // Up face "open" lands on the cell above's Down slot
        let above = grid.cell(IVec3::new(1, 1, 1)).unwrap();
        assert_eq!(above.sockets.get(Direction::Down).as_str(), "open");

        // Empty front face mirrors as empty
        let front = grid.cell(IVec3::new(1, 0, 2)).unwrap();
        assert!(front.sockets.get(Direction::Back).is_none());
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_bounds() {
        let mut grid = test_grid();
        let position = IVec3::new(1, 0, 1);
        assert!(grid.place(position, 0, Rotation::R0, wall_sockets()));
        assert!(!grid.place(position, 1, Rotation::R0, wall_sockets()));
        assert!(!grid.place(IVec3::new(3, 0, 1), 0, Rotation::R0, wall_sockets()));
    }

    #[test]
    fn test_clear_restores_prior_state() {
        let mut grid = test_grid();
        let position = IVec3::new(1, 0, 1);

        let before: Vec<SocketSet> = Direction::ALL
            .iter()
            .filter_map(|d| grid.cell(position + d.offset()).map(|c| c.sockets.clone()))
            .collect();

        grid.place(position, 0, Rotation::R0, wall_sockets());
        let removed = grid.clear(position).unwrap();
        assert_eq!(removed.block, 0);

        assert!(!grid.is_occupied(position));
        let after: Vec<SocketSet> = Direction::ALL
            .iter()
            .filter_map(|d| grid.cell(position + d.offset()).map(|c| c.sockets.clone()))
            .collect();
        assert_eq!(before, after);

        // Ground label returns to the cleared cell's Down face
        let cell = grid.cell(position).unwrap();
        assert_eq!(cell.sockets.get(Direction::Down).as_str(), "ground");

        // Clearing again is a no-op
        assert!(grid.clear(position).is_none());
    }

    #[test]
    fn test_clear_inherits_from_occupied_neighbors() {
        let mut grid = test_grid();
        let a = IVec3::new(0, 0, 1);
        let b = IVec3::new(1, 0, 1);
        grid.place(a, 0, Rotation::R0, wall_sockets());
        grid.place(b, 0, Rotation::R0, wall_sockets());

        grid.clear(b);
        let cell = grid.cell(b).unwrap();
        // b's Left slot mirrors a's Right face
        assert_eq!(cell.sockets.get(Direction::Left).as_str(), "wall");
        // a's own sockets are restored to its placed values
        let a_cell = grid.cell(a).unwrap();
        assert_eq!(a_cell.sockets.get(Direction::Right).as_str(), "wall");
    }

    #[test]
    fn test_mirroring_invariant_between_occupied_cells() {
        let mut grid = test_grid();
        let a = IVec3::new(0, 0, 1);
        let b = IVec3::new(1, 0, 1);
        grid.place(a, 0, Rotation::R0, wall_sockets());
        grid.place(b, 1, Rotation::R0, wall_sockets());

        let a_facing_b = grid.cell(a).unwrap().sockets.get(Direction::Right);
        let b_facing_a = grid.cell(b).unwrap().sockets.get(Direction::Left);
        assert_eq!(a_facing_b, b_facing_a);
    }

    #[test]
    fn test_occupied_iterator() {
        let mut grid = test_grid();
        grid.place(IVec3::new(1, 0, 1), 7, Rotation::R90, wall_sockets());
        let placements: Vec<_> = grid.occupied().collect();
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].0, IVec3::new(1, 0, 1));
        assert_eq!(placements[0].1.block, 7);
        assert_eq!(placements[0].1.rotation, Rotation::R90);
    }

    #[test]
    fn test_center_and_max_distance() {
        let grid = test_grid();
        assert_eq!(grid.center_xz(), Vec2::new(1.0, 1.0));
        assert!((grid.max_horizontal_distance() - 2.0_f32.sqrt()).abs() < 1e-6);
    }
}
