//! # Cellular Automaton Engine
//!
//! Turns random noise into enclosed cave terrain.
//!
//! ## Pipeline
//!
//! ```text
//!   Initialized ──randomize──> Randomized ──run_automata──> Simulated
//!                                                              │
//!   Emitted <──────generate (emit)────── Smoothed <──fill_gaps─┘
//! ```
//!
//! ## Step vs. Gap Fill
//!
//! - [`TerrainGenerator::step`] is **two-phase**: every next state is
//!   computed from the pre-step grid, then all cells commit at once. Visit
//!   order cannot change the result.
//! - [`TerrainGenerator::fill_gaps`] is **single-phase**: a cell that fills
//!   is visible to the cells visited after it in the same pass. It only ever
//!   turns cells alive, so it closes small pockets without opening new ones.
//!
//! Border cells are forced alive by every step, which keeps the generated
//! area enclosed by walls.

use serde::{Deserialize, Serialize};

use crate::config::{GenerationPlan, GeneratorConfig};
use crate::error::{TerrainError, TerrainResult};
use crate::grid::{CellHandle, Grid, GridCoord};
use crate::random::{RandomBool, RandomPick, SeededRandom, TerrainSeed};
use crate::world_builder::WorldBuilder;

/// Automaton state of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TerrainCell {
    /// Current state. Alive cells become walls.
    pub alive: bool,
    /// Staged state, only meaningful between the two phases of a step.
    pub next_alive: bool,
}

/// Inclusive survival and birth thresholds for one automaton step.
///
/// Values are used as given. Nothing checks that `min <= max`; an empty
/// range simply never matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StepRule {
    /// Fewest alive neighbours an alive cell needs to survive.
    pub live_min: u32,
    /// Most alive neighbours an alive cell may have and survive.
    pub live_max: u32,
    /// Fewest alive neighbours that bring a dead cell to life.
    pub revive_min: u32,
    /// Most alive neighbours that bring a dead cell to life.
    pub revive_max: u32,
}

impl StepRule {
    /// Cave rule: survive on 4-8 neighbours, born on exactly 5.
    pub const CANONICAL: Self = Self::new(4, 8, 5, 5);

    /// Creates a rule from its four thresholds.
    #[inline]
    #[must_use]
    pub const fn new(live_min: u32, live_max: u32, revive_min: u32, revive_max: u32) -> Self {
        Self {
            live_min,
            live_max,
            revive_min,
            revive_max,
        }
    }

    /// Returns true if an alive cell with `count` alive neighbours survives.
    #[inline]
    #[must_use]
    pub const fn survives(self, count: u32) -> bool {
        count >= self.live_min && count <= self.live_max
    }

    /// Returns true if a dead cell with `count` alive neighbours is born.
    #[inline]
    #[must_use]
    pub const fn revives(self, count: u32) -> bool {
        count >= self.revive_min && count <= self.revive_max
    }

    /// Next state of an interior cell.
    #[inline]
    #[must_use]
    pub const fn next_state(self, alive: bool, count: u32) -> bool {
        if alive {
            self.survives(count)
        } else {
            self.revives(count)
        }
    }
}

impl Default for StepRule {
    fn default() -> Self {
        Self::CANONICAL
    }
}

/// Where a generator is in its single forward run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationPhase {
    /// Grid allocated, every cell dead.
    Initialized,
    /// Cells seeded from the random boolean source.
    Randomized,
    /// Automaton steps applied.
    Simulated,
    /// Gap fill applied.
    Smoothed,
    /// Placements handed to the world builder.
    Emitted,
}

impl GenerationPhase {
    /// Human-readable phase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::Randomized => "randomized",
            Self::Simulated => "simulated",
            Self::Smoothed => "smoothed",
            Self::Emitted => "emitted",
        }
    }
}

/// Summary of what `generate` emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationReport {
    /// Floor instructions (one per cell).
    pub floors: usize,
    /// Wall instructions (one per alive cell).
    pub walls: usize,
    /// Where the spawn point went.
    pub spawn: GridCoord,
}

/// Cellular automaton terrain generator.
///
/// Owns its grid for the whole run. Randomness comes only from the two
/// injected sources, so scripted sources give fully reproducible runs.
#[derive(Clone, Debug)]
pub struct TerrainGenerator<R, P> {
    grid: Grid<TerrainCell>,
    random: R,
    picker: P,
    phase: GenerationPhase,
}

/// Generator driven by the built-in seeded ChaCha streams.
pub type SeededGenerator = TerrainGenerator<SeededRandom, SeededRandom>;

impl<R: RandomBool, P: RandomPick> TerrainGenerator<R, P> {
    /// Creates a generator over a `width` x `height` grid of dead cells.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if `width` or `height`
    /// is not positive.
    pub fn new(width: i32, height: i32, random: R, picker: P) -> TerrainResult<Self> {
        Ok(Self {
            grid: Grid::new(width, height)?,
            random,
            picker,
            phase: GenerationPhase::Initialized,
        })
    }

    /// Creates a generator sized by `config` and randomizes it.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if the configured size is
    /// not positive.
    pub fn from_config(config: &GeneratorConfig, random: R, picker: P) -> TerrainResult<Self> {
        config.validate()?;
        let mut generator = Self::new(config.width, config.height, random, picker)?;
        generator.randomize();
        Ok(generator)
    }

    /// The cell grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &Grid<TerrainCell> {
        &self.grid
    }

    /// Current phase of the run.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Returns whether the cell at `(x, y)` is alive.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfRange`] outside the grid.
    pub fn is_alive(&self, x: i32, y: i32) -> TerrainResult<bool> {
        let cell = self.grid.cell_at(x, y)?;
        Ok(self.grid[cell].alive)
    }

    /// Overwrites the state of the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfRange`] outside the grid.
    pub fn set_alive(&mut self, x: i32, y: i32, alive: bool) -> TerrainResult<()> {
        let cell = self.grid.cell_at(x, y)?;
        self.grid[cell].alive = alive;
        Ok(())
    }

    /// Number of alive cells.
    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.grid.states().iter().filter(|c| c.alive).count()
    }

    /// Dead cells, in grid order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellHandle> {
        self.grid.iter().filter(|c| !self.grid[*c].alive).collect()
    }

    /// Seeds every cell from the random boolean source, one draw per cell
    /// in grid order.
    pub fn randomize(&mut self) {
        for cell in self.grid.iter() {
            self.grid[cell].alive = self.random.next_bool();
        }
        self.enter(GenerationPhase::Randomized);
    }

    /// Applies one synchronized automaton step.
    ///
    /// Border cells are forced alive. Interior cells survive or are born
    /// according to `rule`, counting neighbours as they were before the step.
    pub fn step(&mut self, rule: StepRule) {
        self.compute_next(rule);
        self.commit();
        if self.phase != GenerationPhase::Simulated {
            self.enter(GenerationPhase::Simulated);
        }
    }

    /// Phase one: stage every cell's next state.
    fn compute_next(&mut self, rule: StepRule) {
        for cell in self.grid.iter() {
            let next_alive = if self.grid.is_border(cell) {
                true
            } else {
                let count = self.alive_neighbours(cell);
                rule.next_state(self.grid[cell].alive, count)
            };
            self.grid[cell].next_alive = next_alive;
        }
    }

    /// Phase two: commit the staged states.
    fn commit(&mut self) {
        for cell in self.grid.iter() {
            let state = &mut self.grid[cell];
            state.alive = state.next_alive;
        }
    }

    /// Runs `num_steps` steps with the same rule. Zero steps is a no-op.
    pub fn run_automata(&mut self, num_steps: u32, rule: StepRule) {
        tracing::debug!(
            "Running {} automaton steps (live {}..={}, revive {}..={})",
            num_steps,
            rule.live_min,
            rule.live_max,
            rule.revive_min,
            rule.revive_max
        );
        for i in 0..num_steps {
            self.step(rule);
            tracing::debug!(
                "Automaton step {}/{}: {} alive cells",
                i + 1,
                num_steps,
                self.alive_count()
            );
        }
    }

    /// Fills cells with strictly more than `min_neighbours` alive neighbours.
    ///
    /// Each of the `iterations` passes visits cells in grid order and writes
    /// immediately, so later cells see earlier fills. Never kills a cell.
    pub fn fill_gaps(&mut self, min_neighbours: u32, iterations: u32) {
        for i in 0..iterations {
            let mut filled = 0usize;
            for cell in self.grid.iter() {
                if self.grid[cell].alive {
                    continue;
                }
                if self.alive_neighbours(cell) > min_neighbours {
                    self.grid[cell].alive = true;
                    filled += 1;
                }
            }
            tracing::debug!(
                "Gap fill pass {}/{}: filled {} cells",
                i + 1,
                iterations,
                filled
            );
        }
        self.enter(GenerationPhase::Smoothed);
    }

    /// Runs the plan and hands the result to `builder`.
    ///
    /// Emits, in grid order, a floor for every cell and a wall for every
    /// alive cell, then one spawn point on a dead cell chosen by the picker.
    ///
    /// Floors and walls already emitted are not taken back if no spawn
    /// point can be placed.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::NoEmptyCellAvailable`] if every cell is alive
    /// after smoothing. The picker is not called in that case.
    /// Returns [`TerrainError::PickOutOfRange`] if the picker answers with an
    /// index past the end of the empty cells.
    pub fn generate<W: WorldBuilder>(
        &mut self,
        plan: &GenerationPlan,
        builder: &mut W,
    ) -> TerrainResult<GenerationReport> {
        self.run_automata(plan.automaton.steps, plan.automaton.rule);
        self.fill_gaps(plan.gap_fill.min_neighbours, plan.gap_fill.iterations);

        let mut floors = 0;
        let mut walls = 0;
        for cell in self.grid.iter() {
            builder.place_floor(cell.coord());
            floors += 1;
            if self.grid[cell].alive {
                builder.place_wall(cell.coord());
                walls += 1;
            }
        }

        let empty = self.empty_cells();
        if empty.is_empty() {
            tracing::warn!(
                "No empty cell for spawn point: all {} cells are walls",
                self.grid.len()
            );
            return Err(TerrainError::NoEmptyCellAvailable);
        }
        let index = self.picker.pick_index(empty.len());
        let Some(spawn) = empty.get(index).map(|c| c.coord()) else {
            tracing::warn!(
                "Spawn picker returned index {} for {} empty cells",
                index,
                empty.len()
            );
            return Err(TerrainError::PickOutOfRange {
                index,
                len: empty.len(),
            });
        };
        builder.place_spawn(spawn);
        self.enter(GenerationPhase::Emitted);

        tracing::info!(
            "Generated {}x{} terrain: {} walls, {} open cells, spawn at ({}, {})",
            self.grid.width(),
            self.grid.height(),
            walls,
            empty.len(),
            spawn.x,
            spawn.y
        );

        Ok(GenerationReport {
            floors,
            walls,
            spawn,
        })
    }

    /// Draws the grid as text: `#` for alive cells, `.` for dead, one row
    /// per line.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        let width = self.grid.width() as usize;
        let mut out = String::with_capacity(self.grid.len() + self.grid.height() as usize);
        for cell in self.grid.iter() {
            out.push(if self.grid[cell].alive { '#' } else { '.' });
            if cell.index() % width == width - 1 {
                out.push('\n');
            }
        }
        out
    }

    #[inline]
    fn alive_neighbours(&self, cell: CellHandle) -> u32 {
        self.grid.count_neighbours(cell, |c| c.alive) as u32
    }

    fn enter(&mut self, phase: GenerationPhase) {
        tracing::info!(
            "Terrain generator: {} -> {}",
            self.phase.name(),
            phase.name()
        );
        self.phase = phase;
    }
}

impl SeededGenerator {
    /// Creates a randomized generator from `config`, seeding both random
    /// streams from `config.seed` (or the default seed).
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if the configured size is
    /// not positive.
    pub fn seeded(config: &GeneratorConfig) -> TerrainResult<Self> {
        let seed = config.seed.map(TerrainSeed::new).unwrap_or_default();
        Self::from_config(
            config,
            SeededRandom::for_purpose(seed, TerrainSeed::CELLS),
            SeededRandom::for_purpose(seed, TerrainSeed::SPAWN),
        )
    }
}

/// Generates terrain from `config` into `builder` with the seeded sources.
///
/// # Errors
///
/// Returns [`TerrainError::InvalidDimension`] for a non-positive grid size,
/// or [`TerrainError::NoEmptyCellAvailable`] if the result has no open cell.
pub fn generate_terrain<W: WorldBuilder>(
    config: &GeneratorConfig,
    builder: &mut W,
) -> TerrainResult<GenerationReport> {
    SeededGenerator::seeded(config)?.generate(&config.plan(), builder)
}
