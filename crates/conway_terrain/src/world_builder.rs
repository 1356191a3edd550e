//! # World Builder
//!
//! The generator's only output channel. It tells a [`WorldBuilder`] where to
//! put floors, walls, and the spawn point, and never hears back.
//!
//! ## Emission Order
//!
//! 1. For each cell in row-major order: floor, then wall if the cell is alive
//! 2. One spawn point, last

use crate::grid::GridCoord;

/// Receiver of placement instructions.
pub trait WorldBuilder {
    /// Places a floor tile at a cell.
    fn place_floor(&mut self, coord: GridCoord);

    /// Places a wall on top of the floor at a cell.
    fn place_wall(&mut self, coord: GridCoord);

    /// Places the player spawn point at a cell.
    fn place_spawn(&mut self, coord: GridCoord);
}

impl<W: WorldBuilder + ?Sized> WorldBuilder for &mut W {
    fn place_floor(&mut self, coord: GridCoord) {
        (**self).place_floor(coord);
    }

    fn place_wall(&mut self, coord: GridCoord) {
        (**self).place_wall(coord);
    }

    fn place_spawn(&mut self, coord: GridCoord) {
        (**self).place_spawn(coord);
    }
}

/// A single placement instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Floor tile.
    Floor(GridCoord),
    /// Wall tile.
    Wall(GridCoord),
    /// Player spawn point.
    Spawn(GridCoord),
}

impl Placement {
    /// Coordinate the instruction targets.
    #[inline]
    #[must_use]
    pub const fn coord(self) -> GridCoord {
        match self {
            Self::Floor(coord) | Self::Wall(coord) | Self::Spawn(coord) => coord,
        }
    }
}

/// World builder that records every instruction in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementLog {
    placements: Vec<Placement>,
}

impl PlacementLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded placements, in emission order.
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Number of floor instructions.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Floor(_)))
            .count()
    }

    /// Number of wall instructions.
    #[must_use]
    pub fn wall_count(&self) -> usize {
        self.placements
            .iter()
            .filter(|p| matches!(p, Placement::Wall(_)))
            .count()
    }

    /// Coordinates of every spawn instruction.
    #[must_use]
    pub fn spawns(&self) -> Vec<GridCoord> {
        self.placements
            .iter()
            .filter_map(|p| match p {
                Placement::Spawn(coord) => Some(*coord),
                _ => None,
            })
            .collect()
    }

    /// Returns true if a wall was placed at `coord`.
    #[must_use]
    pub fn has_wall_at(&self, coord: GridCoord) -> bool {
        self.placements.contains(&Placement::Wall(coord))
    }
}

impl WorldBuilder for PlacementLog {
    fn place_floor(&mut self, coord: GridCoord) {
        self.placements.push(Placement::Floor(coord));
    }

    fn place_wall(&mut self, coord: GridCoord) {
        self.placements.push(Placement::Wall(coord));
    }

    fn place_spawn(&mut self, coord: GridCoord) {
        self.placements.push(Placement::Spawn(coord));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let mut log = PlacementLog::new();
        let a = GridCoord::new(0, 0);
        let b = GridCoord::new(1, 0);

        log.place_floor(a);
        log.place_wall(a);
        log.place_floor(b);
        log.place_spawn(b);

        assert_eq!(
            log.placements(),
            &[
                Placement::Floor(a),
                Placement::Wall(a),
                Placement::Floor(b),
                Placement::Spawn(b),
            ]
        );
        assert_eq!(log.floor_count(), 2);
        assert_eq!(log.wall_count(), 1);
        assert_eq!(log.spawns(), vec![b]);
        assert!(log.has_wall_at(a));
        assert!(!log.has_wall_at(b));
    }

    #[test]
    fn test_borrowed_builder_forwards() {
        let mut log = PlacementLog::new();
        {
            let mut borrowed = &mut log;
            WorldBuilder::place_floor(&mut borrowed, GridCoord::new(2, 3));
        }
        assert_eq!(log.placements()[0].coord(), GridCoord::new(2, 3));
    }
}
