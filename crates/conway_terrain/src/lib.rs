//! # Conway Terrain Generation
//!
//! Deterministic cave terrain from a Conway-style cellular automaton.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same random sources always produce the same terrain
//! 2. **Two-phase steps**: Automaton steps never see half-updated state
//! 3. **Enclosed**: Border cells are forced to walls
//! 4. **Injected randomness**: No global RNG anywhere in the crate
//!
//! ## Core Components
//!
//! - `Grid`: Dense 2-D container with fixed 8-neighbour adjacency
//! - `TerrainGenerator`: Randomize, step, smooth, emit
//! - `WorldBuilder`: Receives floor/wall/spawn placements
//! - `GeneratorConfig`: TOML-loaded dimensions, seed and rules
//!
//! ## Example
//!
//! ```rust,ignore
//! use conway_terrain::{generate_terrain, GeneratorConfig, PlacementLog};
//!
//! let config = GeneratorConfig::load("data/terrain.toml")?;
//! let mut level = PlacementLog::new();
//!
//! let report = generate_terrain(&config, &mut level)?;
//! println!("spawn at {:?}", report.spawn);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod automaton;
pub mod config;
pub mod error;
pub mod grid;
pub mod random;
pub mod world_builder;

pub use automaton::{
    generate_terrain, GenerationPhase, GenerationReport, SeededGenerator, StepRule, TerrainCell,
    TerrainGenerator,
};
pub use config::{AutomatonRules, GapFillRules, GenerationPlan, GeneratorConfig};
pub use error::{TerrainError, TerrainResult};
pub use grid::{CellHandle, CellIter, Grid, GridCoord};
pub use random::{RandomBool, RandomPick, SeededRandom, TerrainSeed};
pub use world_builder::{Placement, PlacementLog, WorldBuilder};
