// engine.rs - Double-buffered Game of Life on a torus

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use rand::Rng;
use tracing::debug;

use crate::error::{LifeError, LifeResult};
use crate::grid::Grid;
use crate::params::Params;
use crate::patterns::Pattern;
use crate::seed::{ALIVE_PROBABILITY, rng_from_seed};

/// The automaton: two equally sized buffers and a generation counter.
///
/// `current` is the only buffer ever observed from outside. `next` is
/// scratch space that [`Engine::iterate`] overwrites completely before the
/// two are swapped, so its content between calls is meaningless.
#[derive(Debug, Clone)]
pub struct Engine {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl Engine {
    /// Allocate a `rows x columns` torus and flip one fair coin per cell.
    ///
    /// Cells are drawn row-major, so the same generator state and the same
    /// dimensions always yield the same grid. The generator is only borrowed.
    pub fn new<R: Rng + ?Sized>(rows: i64, columns: i64, rng: &mut R) -> LifeResult<Self> {
        let mut engine = Self::dead(rows, columns)?;
        for cell in engine.current.cells_mut() {
            *cell = rng.gen_bool(ALIVE_PROBABILITY);
        }
        debug!(
            rows,
            columns,
            live = engine.current.live_count(),
            "seeded engine"
        );
        Ok(engine)
    }

    /// Validate `params` and seed a portable generator from `params.seed`.
    pub fn from_params(params: &Params) -> LifeResult<Self> {
        // Dimensions are checked first so a fully malformed query reports
        // the grid problem rather than the seed.
        Self::validate_dimensions(params.rows, params.columns)?;
        let mut rng = rng_from_seed(params.seed)?;
        debug!(seed = params.seed, "initializing random source");
        Self::new(params.rows, params.columns, &mut rng)
    }

    /// Start from an explicit set of live cells; everything else is dead.
    pub fn with_live_cells(
        rows: i64,
        columns: i64,
        cells: &[(usize, usize)],
    ) -> LifeResult<Self> {
        let mut engine = Self::dead(rows, columns)?;
        for &(row, column) in cells {
            if row >= engine.current.rows() || column >= engine.current.columns() {
                return Err(engine.out_of_range(saturate(row), saturate(column)));
            }
            engine.current.set(row, column, true);
        }
        Ok(engine)
    }

    /// Place `pattern` with its top-left corner at `offset`.
    pub fn from_pattern(
        rows: i64,
        columns: i64,
        pattern: &Pattern,
        offset: (usize, usize),
    ) -> LifeResult<Self> {
        let (row_offset, column_offset) = offset;
        let cells: Vec<(usize, usize)> = pattern
            .cells
            .iter()
            .map(|&(row, column)| {
                (
                    row.saturating_add(row_offset),
                    column.saturating_add(column_offset),
                )
            })
            .collect();
        let engine = Self::with_live_cells(rows, columns, &cells)?;
        debug!(pattern = pattern.name, rows, columns, "placed pattern");
        Ok(engine)
    }

    fn validate_dimensions(rows: i64, columns: i64) -> LifeResult<(usize, usize)> {
        let invalid = || LifeError::InvalidDimension { rows, columns };
        if rows < 1 || columns < 1 {
            return Err(invalid());
        }
        let r = usize::try_from(rows).map_err(|_| invalid())?;
        let c = usize::try_from(columns).map_err(|_| invalid())?;
        r.checked_mul(c).ok_or_else(invalid)?;
        Ok((r, c))
    }

    fn dead(rows: i64, columns: i64) -> LifeResult<Self> {
        let (rows, columns) = Self::validate_dimensions(rows, columns)?;
        Ok(Self {
            current: Grid::dead(rows, columns),
            next: Grid::dead(rows, columns),
            generation: 0,
        })
    }

    /// Advance exactly one generation.
    ///
    /// Every neighbour count is read from the frozen `current` buffer and
    /// every result is written to `next`; the buffers are then swapped.
    /// Nothing is allocated.
    pub fn iterate(&mut self) {
        let rows = self.current.rows();
        let columns = self.current.columns();

        for row in 0..rows {
            let above = self.current.row((row + rows - 1) % rows);
            let middle = self.current.row(row);
            let below = self.current.row((row + 1) % rows);
            let out = self.next.row_mut(row);

            for column in 0..columns {
                let left = (column + columns - 1) % columns;
                let right = (column + 1) % columns;

                let count = [
                    above[left], above[column], above[right],
                    middle[left],               middle[right],
                    below[left], below[column], below[right],
                ]
                .iter()
                .filter(|&&alive| alive)
                .count();

                out[column] = match (middle[column], count) {
                    (true, 2) | (true, 3) => true, // Survival
                    (false, 3) => true,            // Birth
                    _ => false,                    // Death or stays dead
                };
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// State of `(row, column)` in the current generation.
    ///
    /// Indices outside the grid are an error; they are never wrapped.
    pub fn is_alive(&self, row: i64, column: i64) -> LifeResult<bool> {
        match (usize::try_from(row), usize::try_from(column)) {
            (Ok(r), Ok(c)) if r < self.current.rows() && c < self.current.columns() => {
                Ok(self.current.get(r, c))
            }
            _ => Err(self.out_of_range(row, column)),
        }
    }

    pub fn row_count(&self) -> usize {
        self.current.rows()
    }

    pub fn column_count(&self) -> usize {
        self.current.columns()
    }

    /// Read-only view of the current generation.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    pub fn live_count(&self) -> usize {
        self.current.live_count()
    }

    /// Hash of the current generation's cells.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.current.hash(&mut hasher);
        hasher.finish()
    }

    fn out_of_range(&self, row: i64, column: i64) -> LifeError {
        LifeError::IndexOutOfRange {
            row,
            column,
            rows: self.current.rows(),
            columns: self.current.columns(),
        }
    }
}

fn saturate(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.current, f)
    }
}
