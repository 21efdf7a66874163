//! Frontier-expansion structure generator
//!
//! Starting from a seed block, the generator repeatedly expands a frontier of
//! empty neighbor cells and tries to fill each one with a socket-valid,
//! rule-approved, weight-selected block. Cells proven unfillable are memoized
//! so they are never attempted twice. The run ends when the frontier is empty
//! or the iteration cap is reached; a capped run is a partial structure, not
//! an error.
//!
//! One generation run owns its grid, rules and random source exclusively, so
//! the whole loop is single-threaded and synchronous. Callers that want
//! pacing (e.g. step-by-step visualization) drive `step()` or the `steps()`
//! iterator instead of `run()`.

mod sink;

pub use sink::{NullSink, PlacementSink, RecordingSink};

use crate::catalog::{BlockCatalog, Direction, SocketCompatibilityTable};
use crate::error::{ForgeError, ForgeResult};
use crate::grid::{Grid, GridConfig, PlacedBlock};
use crate::placement::{PlacementQuery, PlacementValidator, RotationOrder, RuleSet};
use crate::rotation::Rotation;
use crate::style::{choose_weighted, normalized_distance, normalized_height, BuildingStyle};
use glam::IVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

fn default_max_iterations() -> u32 {
    100
}

/// Per-run generator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Name of the block seeded at `seed_position`
    pub seed_block: String,
    pub seed_position: IVec3,
    /// Preferred seed rotation; other rotations are tried if it fails
    #[serde(default)]
    pub seed_rotation: Rotation,
    /// Cap on expand/fill cycles; reaching it ends the run with a partial
    /// structure
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub rotation_order: RotationOrder,
    /// Fixed RNG seed for reproducible runs; None draws from entropy
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Caller-facing summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Expand/fill cycles executed
    pub iterations: u32,
    /// Blocks committed, the seed included
    pub placed: u32,
    /// Cells proven unfillable
    pub invalid_cells: u32,
    /// True when the run ended at the iteration cap
    pub capped: bool,
}

/// One committed placement, as yielded by `step()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedStep {
    pub position: IVec3,
    /// Catalog index of the placed block
    pub block: usize,
    pub rotation: Rotation,
}

/// Frontier-expansion generator. Owns every piece of mutable run state; no
/// cross-run shared data.
pub struct Generator {
    grid: Grid,
    catalog: BlockCatalog,
    compat: SocketCompatibilityTable,
    style: BuildingStyle,
    rules: RuleSet,
    config: GeneratorConfig,
    sink: Box<dyn PlacementSink>,
    rng: StdRng,

    current: Vec<IVec3>,
    pending: VecDeque<IVec3>,
    invalid: FxHashSet<IVec3>,
    iterations: u32,
    placed: u32,
    seeded: bool,
    finished: bool,
    capped: bool,
}

impl Generator {
    /// Validates the whole setup; any configuration problem refuses to start
    /// the run.
    pub fn new(
        grid_config: &GridConfig,
        catalog: BlockCatalog,
        compat: SocketCompatibilityTable,
        style: BuildingStyle,
        rules: RuleSet,
        config: GeneratorConfig,
    ) -> ForgeResult<Self> {
        let grid = Grid::new(grid_config)?;
        if catalog.is_empty() {
            return Err(ForgeError::EmptyCatalog);
        }
        if catalog.index_of(&config.seed_block).is_none() {
            return Err(ForgeError::UnknownBlock(config.seed_block.clone()));
        }
        if !grid.in_bounds(config.seed_position) {
            return Err(ForgeError::SeedOutOfBounds(config.seed_position));
        }

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Generator {
            grid,
            catalog,
            compat,
            style,
            rules,
            config,
            sink: Box::new(NullSink),
            rng,
            current: Vec::new(),
            pending: VecDeque::new(),
            invalid: FxHashSet::default(),
            iterations: 0,
            placed: 0,
            seeded: false,
            finished: false,
            capped: false,
        })
    }

    /// Replace the default no-op sink
    pub fn with_sink(mut self, sink: Box<dyn PlacementSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Remove a committed block and notify the sink. The cell's effective
    /// sockets are restored from ground and occupied neighbors, so it is
    /// placeable again. Returns the removed block, or None if the cell was
    /// empty or out of bounds.
    pub fn clear(&mut self, position: IVec3) -> Option<PlacedBlock> {
        let removed = self.grid.clear(position)?;
        self.sink.clear(position);
        self.placed = self.placed.saturating_sub(1);
        log::trace!("cleared {}", position);
        Some(removed)
    }

    pub fn catalog(&self) -> &BlockCatalog {
        &self.catalog
    }

    /// Cells proven unfillable so far
    pub fn invalid_cells(&self) -> impl Iterator<Item = IVec3> + '_ {
        self.invalid.iter().copied()
    }

    pub fn report(&self) -> GenerationReport {
        GenerationReport {
            iterations: self.iterations,
            placed: self.placed,
            invalid_cells: self.invalid.len() as u32,
            capped: self.capped,
        }
    }

    /// Drive generation to completion
    pub fn run(&mut self) -> ForgeResult<GenerationReport> {
        while self.step()?.is_some() {}
        let report = self.report();
        log::info!(
            "generation finished: {} placed, {} invalid, {} iterations{}",
            report.placed,
            report.invalid_cells,
            report.iterations,
            if report.capped { " (capped)" } else { "" }
        );
        Ok(report)
    }

    /// Advance to the next committed placement. Returns Ok(None) once the
    /// run is over (frontier exhausted or cap reached). The first call
    /// performs the seed placement; a seed failure is fatal and surfaces as
    /// an error, unlike ordinary unfillable cells.
    pub fn step(&mut self) -> ForgeResult<Option<PlacedStep>> {
        if self.finished {
            return Ok(None);
        }
        if !self.seeded {
            let step = self.place_seed()?;
            return Ok(Some(step));
        }

        loop {
            while let Some(position) = self.pending.pop_front() {
                if self.invalid.contains(&position) || self.grid.is_occupied(position) {
                    continue;
                }
                match self.try_fill(position) {
                    Some(step) => return Ok(Some(step)),
                    None => {
                        log::trace!("no valid block for {}, marking invalid", position);
                        self.invalid.insert(position);
                    }
                }
            }

            // Frontier pass complete; expand the next wave
            if self.current.is_empty() {
                self.finished = true;
                return Ok(None);
            }
            if self.iterations >= self.config.max_iterations {
                log::warn!(
                    "iteration cap {} reached with {} cells still active",
                    self.config.max_iterations,
                    self.current.len()
                );
                self.capped = true;
                self.finished = true;
                return Ok(None);
            }
            self.iterations += 1;
            let frontier = self.expand_frontier();
            log::debug!(
                "iteration {}: frontier of {} cells",
                self.iterations,
                frontier.len()
            );
            self.pending.extend(frontier.iter().copied());
            self.current = frontier;
        }
    }

    /// Resumable view over the run, one committed placement per item
    pub fn steps(&mut self) -> Steps<'_> {
        Steps { generator: self }
    }

    fn place_seed(&mut self) -> ForgeResult<PlacedStep> {
        let position = self.config.seed_position;
        let index = self
            .catalog
            .index_of(&self.config.seed_block)
            .ok_or_else(|| ForgeError::UnknownBlock(self.config.seed_block.clone()))?;

        let rotation = {
            let validator = PlacementValidator::new(&self.grid, &self.catalog, &self.compat);
            let block = &self.catalog.all()[index];
            if validator.can_place(block, position, self.config.seed_rotation) {
                Some(self.config.seed_rotation)
            } else {
                validator.find_valid_rotation(
                    block,
                    position,
                    true,
                    self.config.rotation_order,
                    &mut self.rng,
                )
            }
        };
        let Some(rotation) = rotation else {
            return Err(ForgeError::SeedPlacementFailed {
                position,
                reason: format!("no valid rotation for '{}'", self.config.seed_block),
            });
        };

        let block = &self.catalog.all()[index];
        if !self.sink.place(position, block, rotation) {
            return Err(ForgeError::SeedPlacementFailed {
                position,
                reason: "placement sink rejected the seed".to_string(),
            });
        }

        self.commit(position, index, rotation);
        self.seeded = true;
        self.current = vec![position];
        log::debug!(
            "seeded '{}' at {} with rotation {:?}",
            self.config.seed_block,
            position,
            rotation
        );
        Ok(PlacedStep {
            position,
            block: index,
            rotation,
        })
    }

    /// Gather socket-valid candidates, filter by rules, weight and choose.
    /// None marks the cell unfillable for the rest of the run.
    fn try_fill(&mut self, position: IVec3) -> Option<PlacedStep> {
        let pairs = {
            let validator = PlacementValidator::new(&self.grid, &self.catalog, &self.compat);
            validator.valid_placements(position)
        };

        let mut candidates = Vec::with_capacity(pairs.len());
        for (index, rotation) in pairs {
            let query = PlacementQuery {
                block: &self.catalog.all()[index],
                block_index: index,
                rotation,
                position,
                grid: &self.grid,
            };
            if self.rules.is_placement_legal(&query).is_allowed() {
                candidates.push((index, rotation));
            }
        }
        if candidates.is_empty() {
            return None;
        }

        let height = normalized_height(position, self.grid.dimensions().y - 1);
        let distance = normalized_distance(
            position,
            self.grid.center_xz(),
            self.grid.max_horizontal_distance(),
        );
        let weights: Vec<f32> = candidates
            .iter()
            .map(|&(index, _)| self.style.weight(&self.catalog.all()[index].name, height, distance))
            .collect();

        let chosen = choose_weighted(&weights, &mut self.rng)?;
        let (index, rotation) = candidates[chosen];

        let block = &self.catalog.all()[index];
        // Only the seed placement honors the sink's verdict
        self.sink.place(position, block, rotation);
        self.commit(position, index, rotation);
        Some(PlacedStep {
            position,
            block: index,
            rotation,
        })
    }

    fn commit(&mut self, position: IVec3, index: usize, rotation: Rotation) {
        let block = &self.catalog.all()[index];
        let sockets = block.sockets.rotated(rotation);
        self.grid.place(position, index, rotation, sockets);
        self.placed += 1;
        log::trace!("placed '{}' ({:?}) at {}", block.name, rotation, position);

        let query = PlacementQuery {
            block,
            block_index: index,
            rotation,
            position,
            grid: &self.grid,
        };
        self.rules.notify_placed(&query);
    }

    /// Empty, in-bounds, not-yet-invalid neighbors of the current wave,
    /// de-duplicated. Out-of-bounds positions never enter the frontier.
    fn expand_frontier(&self) -> Vec<IVec3> {
        let mut seen = FxHashSet::default();
        let mut frontier = Vec::new();
        for &position in &self.current {
            for direction in Direction::ALL {
                let neighbor = position + direction.offset();
                if !self.grid.in_bounds(neighbor)
                    || self.grid.is_occupied(neighbor)
                    || self.invalid.contains(&neighbor)
                {
                    continue;
                }
                if seen.insert(neighbor) {
                    frontier.push(neighbor);
                }
            }
        }
        frontier
    }
}

/// Iterator adaptor over `Generator::step`
pub struct Steps<'a> {
    generator: &'a mut Generator,
}

impl Iterator for Steps<'_> {
    type Item = ForgeResult<PlacedStep>;

    fn next(&mut self) -> Option<Self::Item> {
        self.generator.step().transpose()
    }
}
