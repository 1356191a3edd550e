//! # Cell Grid
//!
//! Dense, fixed-size 2-D container with precomputed 8-neighbour adjacency.
//!
//! ## Layout
//!
//! Cells are stored row-major (`index = y * width + x`). Every consumer
//! iterates in that order, so two passes over the same grid always visit
//! cells in the same sequence.
//!
//! ## Adjacency
//!
//! Neighbour lists are computed once in the constructor and never change.
//! They hold [`CellHandle`]s, not cell state: the grid owns every cell and
//! neighbours only point back into its storage.
//!
//! ```text
//!   corner (3)     edge (5)      interior (8)
//!   +--+--+        +--+--+--+    +--+--+--+
//!   |@@|nn|        |nn|@@|nn|    |nn|nn|nn|
//!   +--+--+        +--+--+--+    +--+--+--+
//!   |nn|nn|        |nn|nn|nn|    |nn|@@|nn|
//!   +--+--+        +--+--+--+    +--+--+--+
//!                                |nn|nn|nn|
//!                                +--+--+--+
//! ```

use std::ops::{Index, IndexMut};

use crate::error::{TerrainError, TerrainResult};

/// Integer cell coordinate within a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column, `0..width`.
    pub x: i32,
    /// Row, `0..height`.
    pub y: i32,
}

impl GridCoord {
    /// Creates a new coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Handle to one cell of a [`Grid`].
///
/// Handles are plain data (flat index plus coordinate). They do not borrow
/// the grid, which lets callers read neighbours and write the current cell
/// inside the same loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellHandle {
    index: usize,
    coord: GridCoord,
}

impl CellHandle {
    /// Flat row-major index into the grid's storage.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Coordinate of the cell.
    #[inline]
    #[must_use]
    pub const fn coord(self) -> GridCoord {
        self.coord
    }

    /// X coordinate of the cell.
    #[inline]
    #[must_use]
    pub const fn x(self) -> i32 {
        self.coord.x
    }

    /// Y coordinate of the cell.
    #[inline]
    #[must_use]
    pub const fn y(self) -> i32 {
        self.coord.y
    }
}

/// Row-major traversal of every cell in a grid.
///
/// Created by [`Grid::iter`]. Finite and restartable: each call to `iter`
/// starts a fresh traversal from `(0, 0)`.
#[derive(Clone, Debug)]
pub struct CellIter {
    next: usize,
    len: usize,
    width: i32,
}

impl Iterator for CellIter {
    type Item = CellHandle;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let width = self.width as usize;
        Some(CellHandle {
            index,
            coord: GridCoord::new((index % width) as i32, (index / width) as i32),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIter {}

/// Dense 2-D grid of cell states with fixed 8-connected adjacency.
///
/// Generic over the per-cell state `T`; the grid knows nothing about what
/// a cell means, only where it is and who its neighbours are.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    /// Cell states, row-major.
    cells: Vec<T>,
    /// Flattened neighbour lists.
    adjacency: Vec<CellHandle>,
    /// `adjacency[offsets[i]..offsets[i + 1]]` are the neighbours of cell `i`.
    offsets: Vec<usize>,
}

impl<T: Default> Grid<T> {
    /// Creates a grid with every cell in its default state.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if `width` or `height`
    /// is not positive.
    pub fn new(width: i32, height: i32) -> TerrainResult<Self> {
        Self::from_fn(width, height, |_| T::default())
    }
}

impl<T> Grid<T> {
    /// Creates a grid, initializing each cell from its coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidDimension`] if `width` or `height`
    /// is not positive, or if the cell and adjacency tables cannot be sized.
    pub fn from_fn<F>(width: i32, height: i32, mut init: F) -> TerrainResult<Self>
    where
        F: FnMut(GridCoord) -> T,
    {
        if width <= 0 || height <= 0 {
            return Err(TerrainError::InvalidDimension { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(TerrainError::InvalidDimension { width, height })?;
        let links = len
            .checked_mul(8)
            .ok_or(TerrainError::InvalidDimension { width, height })?;

        let mut cells = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                cells.push(init(GridCoord::new(x, y)));
            }
        }

        let (adjacency, offsets) = Self::build_adjacency(width, height, len, links);

        Ok(Self {
            width,
            height,
            cells,
            adjacency,
            offsets,
        })
    }

    /// Collects the in-bounds cells among the 8 around each position.
    fn build_adjacency(
        width: i32,
        height: i32,
        len: usize,
        links: usize,
    ) -> (Vec<CellHandle>, Vec<usize>) {
        let mut adjacency = Vec::with_capacity(links);
        let mut offsets = Vec::with_capacity(len + 1);
        offsets.push(0);

        for y in 0..height {
            for x in 0..width {
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let (nx, ny) = (x + dx, y + dy);
                        if nx < 0 || ny < 0 || nx >= width || ny >= height {
                            continue;
                        }
                        adjacency.push(CellHandle {
                            index: ny as usize * width as usize + nx as usize,
                            coord: GridCoord::new(nx, ny),
                        });
                    }
                }
                offsets.push(adjacency.len());
            }
        }

        (adjacency, offsets)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells (`width * height`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if the coordinate lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// Bounds-checked access to the cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfRange`] if the coordinate is outside
    /// the grid.
    pub fn cell_at(&self, x: i32, y: i32) -> TerrainResult<CellHandle> {
        if !self.contains(x, y) {
            return Err(TerrainError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(CellHandle {
            index: y as usize * self.width as usize + x as usize,
            coord: GridCoord::new(x, y),
        })
    }

    /// Row-major traversal of every cell (y outer, x inner).
    #[must_use]
    pub fn iter(&self) -> CellIter {
        CellIter {
            next: 0,
            len: self.cells.len(),
            width: self.width,
        }
    }

    /// Returns true if the cell is on the outermost ring of the grid.
    #[inline]
    #[must_use]
    pub const fn is_border(&self, cell: CellHandle) -> bool {
        let GridCoord { x, y } = cell.coord;
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    /// Precomputed neighbours of a cell, in row-major order.
    #[inline]
    #[must_use]
    pub fn neighbours(&self, cell: CellHandle) -> &[CellHandle] {
        &self.adjacency[self.offsets[cell.index]..self.offsets[cell.index + 1]]
    }

    /// Counts neighbours whose state satisfies `predicate`.
    #[inline]
    pub fn count_neighbours<F>(&self, cell: CellHandle, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.neighbours(cell)
            .iter()
            .filter(|n| predicate(&self.cells[n.index]))
            .count()
    }

    /// State of a cell.
    #[inline]
    #[must_use]
    pub fn state(&self, cell: CellHandle) -> &T {
        &self.cells[cell.index]
    }

    /// Mutable state of a cell.
    #[inline]
    pub fn state_mut(&mut self, cell: CellHandle) -> &mut T {
        &mut self.cells[cell.index]
    }

    /// All cell states, row-major.
    #[inline]
    #[must_use]
    pub fn states(&self) -> &[T] {
        &self.cells
    }
}

impl<T> Index<CellHandle> for Grid<T> {
    type Output = T;

    fn index(&self, cell: CellHandle) -> &T {
        self.state(cell)
    }
}

impl<T> IndexMut<CellHandle> for Grid<T> {
    fn index_mut(&mut self, cell: CellHandle) -> &mut T {
        self.state_mut(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert_eq!(
            Grid::<bool>::new(0, 5).unwrap_err(),
            TerrainError::InvalidDimension { width: 0, height: 5 }
        );
        assert_eq!(
            Grid::<bool>::new(4, -1).unwrap_err(),
            TerrainError::InvalidDimension { width: 4, height: -1 }
        );
    }

    #[test]
    fn test_rejects_unaddressable_dimensions() {
        // Overflows the adjacency table before anything is allocated.
        assert_eq!(
            Grid::<bool>::new(i32::MAX, i32::MAX).unwrap_err(),
            TerrainError::InvalidDimension {
                width: i32::MAX,
                height: i32::MAX
            }
        );
    }

    #[test]
    fn test_dimensions_and_len() {
        let grid = Grid::<u8>::new(7, 3).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 21);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_cell_at_bounds() {
        let grid = Grid::<u8>::new(4, 4).unwrap();

        let cell = grid.cell_at(3, 2).unwrap();
        assert_eq!(cell.coord(), GridCoord::new(3, 2));
        assert_eq!(cell.index(), 11);

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4)] {
            assert_eq!(
                grid.cell_at(x, y).unwrap_err(),
                TerrainError::OutOfRange { x, y, width: 4, height: 4 }
            );
        }
    }

    #[test]
    fn test_iteration_is_row_major_and_restartable() {
        let grid = Grid::<u8>::new(3, 2).unwrap();

        let coords: Vec<_> = grid.iter().map(|c| (c.x(), c.y())).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);

        let again: Vec<_> = grid.iter().map(CellHandle::coord).collect();
        assert_eq!(again.len(), grid.len());
        assert_eq!(grid.iter().len(), 6);
    }

    #[test]
    fn test_from_fn_sees_coordinates() {
        let grid = Grid::from_fn(3, 3, |c| c.x * 10 + c.y).unwrap();
        let cell = grid.cell_at(2, 1).unwrap();
        assert_eq!(grid[cell], 21);
    }

    #[test]
    fn test_neighbour_counts() {
        let grid = Grid::<u8>::new(5, 4).unwrap();

        for cell in grid.iter() {
            let expected = match (grid.is_border(cell), cell.x(), cell.y()) {
                (false, _, _) => 8,
                (true, 0 | 4, 0 | 3) => 3,
                (true, _, _) => 5,
            };
            assert_eq!(
                grid.neighbours(cell).len(),
                expected,
                "wrong neighbour count at {:?}",
                cell.coord()
            );
        }
    }

    #[test]
    fn test_neighbours_are_symmetric() {
        let grid = Grid::<u8>::new(6, 5).unwrap();

        for a in grid.iter() {
            for b in grid.neighbours(a) {
                assert!(
                    grid.neighbours(*b).contains(&a),
                    "{:?} lists {:?} but not the reverse",
                    a.coord(),
                    b.coord()
                );
            }
        }
    }

    #[test]
    fn test_thin_grids() {
        let row = Grid::<u8>::new(4, 1).unwrap();
        let counts: Vec<_> = row.iter().map(|c| row.neighbours(c).len()).collect();
        assert_eq!(counts, vec![1, 2, 2, 1]);
        assert!(row.iter().all(|c| row.is_border(c)));

        let single = Grid::<u8>::new(1, 1).unwrap();
        let only = single.cell_at(0, 0).unwrap();
        assert!(single.neighbours(only).is_empty());
        assert!(single.is_border(only));
    }

    #[test]
    fn test_is_border() {
        let grid = Grid::<u8>::new(4, 3).unwrap();
        let interior: Vec<_> = grid
            .iter()
            .filter(|c| !grid.is_border(*c))
            .map(CellHandle::coord)
            .collect();
        assert_eq!(interior, vec![GridCoord::new(1, 1), GridCoord::new(2, 1)]);
    }

    #[test]
    fn test_count_neighbours_and_mutation_during_iteration() {
        let mut grid = Grid::<bool>::new(3, 3).unwrap();

        for cell in grid.iter() {
            if cell.y() == 0 {
                grid[cell] = true;
            }
        }

        let centre = grid.cell_at(1, 1).unwrap();
        assert_eq!(grid.count_neighbours(centre, |alive| *alive), 3);

        let corner = grid.cell_at(2, 2).unwrap();
        assert_eq!(grid.count_neighbours(corner, |alive| *alive), 0);
    }
}
