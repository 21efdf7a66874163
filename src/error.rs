//! Error handling for block-forge
//!
//! Configuration and seed failures are fatal and surface as `ForgeError`.
//! Per-cell placement failures during generation are not errors: those cells
//! are memoized as unfillable and the run continues.

use glam::IVec3;

/// Crate-wide result type
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Main error type for block-forge
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    #[error("grid dimensions must be positive, got {0}")]
    InvalidDimensions(IVec3),

    #[error("duplicate block name '{0}' in catalog")]
    DuplicateBlock(String),

    #[error("block catalog is empty")]
    EmptyCatalog,

    #[error("unknown block '{0}'")]
    UnknownBlock(String),

    #[error("seed position {0} is out of grid bounds")]
    SeedOutOfBounds(IVec3),

    #[error("seed placement failed at {position}: {reason}")]
    SeedPlacementFailed { position: IVec3, reason: String },

    #[error("rotation must be a multiple of 90 degrees, got {0}")]
    InvalidRotation(i32),

    #[error("failed to parse definition data: {0}")]
    Parse(#[from] serde_json::Error),
}
