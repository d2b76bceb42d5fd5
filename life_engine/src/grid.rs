// grid.rs - Grid buffer for Conway's Game of Life

use std::fmt;

/// Glyph used for a live cell in text snapshots.
pub const ALIVE_GLYPH: char = '■';
/// Glyph used for a dead cell in text snapshots.
pub const DEAD_GLYPH: char = '□';

/// A fixed-size rectangular field of cells, stored row-major.
///
/// Dimensions never change after allocation. Coordinates passed to
/// [`Grid::get`] and [`Grid::set`] must be in range; bounds-checked,
/// signed lookups are done by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Box<[bool]>,
}

impl Grid {
    /// All-dead grid. Callers guarantee `rows * columns` does not overflow.
    pub(crate) fn dead(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns].into_boxed_slice(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn offset(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.rows && column < self.columns);
        row * self.columns + column
    }

    #[inline]
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.cells[self.offset(row, column)]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, column: usize, alive: bool) {
        let index = self.offset(row, column);
        self.cells[index] = alive;
    }

    /// One row of cells, left to right.
    pub fn row(&self, row: usize) -> &[bool] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [bool] {
        let start = row * self.columns;
        &mut self.cells[start..start + self.columns]
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, in row-major order.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(index, _)| (index / columns, index % columns))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for &alive in self.row(row) {
                let glyph = if alive { ALIVE_GLYPH } else { DEAD_GLYPH };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
