//! # Terrain Error Types
//!
//! All errors that can occur while building or running a generator.

use thiserror::Error;

/// Errors that can occur in terrain generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// Grid constructed with a non-positive width or height.
    #[error("invalid grid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimension {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },

    /// Coordinate access outside the grid.
    #[error("coordinate ({x}, {y}) out of range for {width}x{height} grid")]
    OutOfRange {
        /// Requested X coordinate.
        x: i32,
        /// Requested Y coordinate.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// Every cell ended up alive, so there is nowhere to spawn.
    #[error("no empty cell available for the spawn point")]
    NoEmptyCellAvailable,

    /// The spawn picker returned an index outside the candidate list.
    #[error("spawn picker returned index {index} for {len} empty cells")]
    PickOutOfRange {
        /// Index the picker returned.
        index: usize,
        /// Number of empty cells offered.
        len: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
