// error.rs - Error types for the Life engine

use thiserror::Error;

/// Result type alias for engine operations.
pub type LifeResult<T> = Result<T, LifeError>;

/// Errors raised by engine construction, queries and presenters.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Rows or columns are not positive, or the grid cannot be addressed.
    #[error("invalid grid dimension: {rows} x {columns} (both must be >= 1)")]
    InvalidDimension { rows: i64, columns: i64 },

    /// A cell coordinate lies outside the grid.
    #[error("cell ({row}, {column}) is outside the {rows} x {columns} grid")]
    IndexOutOfRange {
        row: i64,
        column: i64,
        rows: usize,
        columns: usize,
    },

    /// The seed is the `-1` parse sentinel.
    #[error("invalid seed: {seed} (value could not be parsed)")]
    InvalidSeed { seed: i64 },

    /// A presenter failed to write its output.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
