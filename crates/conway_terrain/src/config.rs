//! # Generator Configuration
//!
//! All generation parameters live in an external TOML file, loaded once at
//! startup:
//!
//! ```toml
//! width = 64
//! height = 48
//! seed = 12345
//!
//! [automaton]
//! steps = 2
//! live_min = 4
//! live_max = 8
//! revive_min = 5
//! revive_max = 5
//!
//! [gap_fill]
//! min_neighbours = 4
//! iterations = 4
//! ```
//!
//! `automaton.steps` is required. Thresholds and the whole `[gap_fill]`
//! table fall back to the canonical cave rules. Thresholds are passed to
//! the automaton as written; only the grid dimensions are validated.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::StepRule;
use crate::error::{TerrainError, TerrainResult};

/// How many automaton steps to run, and with which thresholds.
///
/// Reads and writes the flat `[automaton]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AutomatonTable", into = "AutomatonTable")]
pub struct AutomatonRules {
    /// Number of synchronized steps.
    pub steps: u32,
    /// Survival/birth thresholds used by every step.
    pub rule: StepRule,
}

/// On-disk shape of `[automaton]`.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutomatonTable {
    steps: u32,
    #[serde(default = "canonical_live_min")]
    live_min: u32,
    #[serde(default = "canonical_live_max")]
    live_max: u32,
    #[serde(default = "canonical_revive_min")]
    revive_min: u32,
    #[serde(default = "canonical_revive_max")]
    revive_max: u32,
}

const fn canonical_live_min() -> u32 {
    StepRule::CANONICAL.live_min
}

const fn canonical_live_max() -> u32 {
    StepRule::CANONICAL.live_max
}

const fn canonical_revive_min() -> u32 {
    StepRule::CANONICAL.revive_min
}

const fn canonical_revive_max() -> u32 {
    StepRule::CANONICAL.revive_max
}

impl From<AutomatonTable> for AutomatonRules {
    fn from(table: AutomatonTable) -> Self {
        Self {
            steps: table.steps,
            rule: StepRule::new(
                table.live_min,
                table.live_max,
                table.revive_min,
                table.revive_max,
            ),
        }
    }
}

impl From<AutomatonRules> for AutomatonTable {
    fn from(rules: AutomatonRules) -> Self {
        Self {
            steps: rules.steps,
            live_min: rules.rule.live_min,
            live_max: rules.rule.live_max,
            revive_min: rules.rule.revive_min,
            revive_max: rules.rule.revive_max,
        }
    }
}

impl AutomatonRules {
    /// Canonical cave thresholds with a caller-chosen step count.
    #[must_use]
    pub const fn canonical(steps: u32) -> Self {
        Self {
            steps,
            rule: StepRule::CANONICAL,
        }
    }
}

/// Parameters of the gap-fill smoothing pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GapFillRules {
    /// A cell is filled when strictly more neighbours than this are alive.
    pub min_neighbours: u32,
    /// Number of full passes over the grid.
    pub iterations: u32,
}

impl GapFillRules {
    /// Threshold 4, four passes.
    pub const CANONICAL: Self = Self {
        min_neighbours: 4,
        iterations: 4,
    };
}

impl Default for GapFillRules {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Everything `generate` runs after the grid has been seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Automaton phase.
    pub automaton: AutomatonRules,
    /// Smoothing phase.
    pub gap_fill: GapFillRules,
}

impl GenerationPlan {
    /// Canonical rules with a caller-chosen step count.
    #[must_use]
    pub const fn canonical(steps: u32) -> Self {
        Self {
            automaton: AutomatonRules::canonical(steps),
            gap_fill: GapFillRules::CANONICAL,
        }
    }
}

/// Full generator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Grid width in cells.
    pub width: i32,
    /// Grid height in cells.
    pub height: i32,
    /// Seed for the built-in random sources. `None` uses the default seed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Automaton phase.
    pub automaton: AutomatonRules,
    /// Smoothing phase.
    #[serde(default)]
    pub gap_fill: GapFillRules,
}

impl GeneratorConfig {
    /// Canonical rules on a `width` x `height` grid.
    #[must_use]
    pub const fn canonical(width: i32, height: i32, steps: u32) -> Self {
        Self {
            width,
            height,
            seed: None,
            automaton: AutomatonRules::canonical(steps),
            gap_fill: GapFillRules::CANONICAL,
        }
    }

    /// Sets the seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] if the document does not
    /// parse, or [`TerrainError::InvalidDimension`] for non-positive sizes.
    pub fn from_toml_str(source: &str) -> TerrainResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| TerrainError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] if the file cannot be read or
    /// parsed, or [`TerrainError::InvalidDimension`] for non-positive sizes.
    pub fn load(path: impl AsRef<Path>) -> TerrainResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| TerrainError::InvalidConfig(format!("{}: {e}", path.display())))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            "Loaded terrain config from {}: {}x{}, {} steps",
            path.display(),
            config.width,
            config.height,
            config.automaton.steps
        );
        Ok(config)
    }

    /// Checks the grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if width or height is not
    /// positive.
    pub fn validate(&self) -> TerrainResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(TerrainError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The automaton and smoothing parameters.
    #[must_use]
    pub const fn plan(&self) -> GenerationPlan {
        GenerationPlan {
            automaton: self.automaton,
            gap_fill: self.gap_fill,
        }
    }
}
