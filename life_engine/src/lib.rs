//! Conway's Game of Life on a fixed-size torus.
//!
//! The [`Engine`] owns two equally sized buffers and a generation counter.
//! Each [`Engine::iterate`] reads only the current buffer, writes the next
//! generation into the other one and swaps them. Hosts never mutate cells:
//! they read through the query methods, usually from a [`Presenter`] driven
//! by a [`Scheduler`].
//!
//! ```text
//! Params::parse("?rows=20&columns=40&seed=7")
//!     -> Engine::from_params      (seeded ChaCha8, one coin flip per cell)
//!     -> Scheduler::frame         (present, then iterate)
//! ```

pub mod cycle;
mod engine;
mod error;
pub mod grid;
pub mod params;
pub mod patterns;
mod scheduler;
pub mod seed;

pub use cycle::CycleDetector;
pub use engine::Engine;
pub use error::{LifeError, LifeResult};
pub use grid::Grid;
pub use params::Params;
pub use patterns::Pattern;
pub use scheduler::{DEFAULT_PACING, Presenter, Scheduler, Step};
