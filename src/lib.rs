//! block-forge: constraint-driven assembly of 3D structures from modular
//! building blocks.
//!
//! Each block carries six directional socket labels; placement is constrained
//! by a symmetric socket-compatibility relation, optional pluggable rules,
//! and weighted random choice shaped by height/distance curves. Generation
//! grows a structure outward from a seed cell by frontier expansion.
//!
//! The crate is headless: mesh instantiation, editors and visualization are
//! external collaborators behind the `PlacementSink` trait. All catalog,
//! compatibility, style and rule data is built up front and passed into the
//! `Generator` explicitly; there is no global state.
//!
//! ```
//! use block_forge::{
//!     BlockCatalog, BlockDefinition, BuildingStyle, Generator, GeneratorConfig, GridConfig,
//!     RotationOrder, RuleSet, SocketCompatibilityTable, SocketLabel, SocketSet,
//! };
//! use glam::IVec3;
//!
//! let catalog = BlockCatalog::from_blocks([BlockDefinition::new(
//!     "Foundation",
//!     SocketSet {
//!         down: SocketLabel::from("ground"),
//!         up: SocketLabel::from("floor"),
//!         ..SocketSet::empty()
//!     },
//! )])
//! .unwrap();
//! let compat = SocketCompatibilityTable::from_pairs(
//!     ["ground", "floor"],
//!     [("ground", "ground")],
//! );
//!
//! let mut generator = Generator::new(
//!     &GridConfig::with_full_ground(IVec3::new(4, 3, 4), SocketLabel::from("ground")),
//!     catalog,
//!     compat,
//!     BuildingStyle::new(),
//!     RuleSet::new(),
//!     GeneratorConfig {
//!         seed_block: "Foundation".to_string(),
//!         seed_position: IVec3::new(1, 0, 1),
//!         seed_rotation: Default::default(),
//!         max_iterations: 32,
//!         rotation_order: RotationOrder::Fixed,
//!         rng_seed: Some(1),
//!     },
//! )
//! .unwrap();
//!
//! let report = generator.run().unwrap();
//! assert!(report.placed >= 1);
//! ```

pub mod catalog;
pub mod error;
pub mod generator;
pub mod grid;
pub mod placement;
pub mod rotation;
pub mod style;

pub use catalog::{
    BlockCatalog, BlockDefinition, Direction, SocketCompatibilityTable, SocketLabel, SocketSet,
};
pub use error::{ForgeError, ForgeResult};
pub use generator::{
    GenerationReport, Generator, GeneratorConfig, NullSink, PlacedStep, PlacementSink,
    RecordingSink,
};
pub use grid::{Cell, Grid, GridConfig, PlacedBlock};
pub use placement::{
    BlockBudgetRule, HeightCeilingRule, NoAdjacentDuplicateRule, PlacementQuery,
    PlacementValidator, Rule, RuleSet, RuleVerdict, RotationOrder,
};
pub use rotation::Rotation;
pub use style::{BlockWeight, BuildingStyle, Curve, CurveKey};
