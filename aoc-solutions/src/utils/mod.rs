//! Helpers shared between puzzle days

pub mod elfcode;
pub mod grid;
pub mod parse;

pub use grid::{Grid, Point};
pub use parse::{ints, ints_n, invalid, lines_with};

/// Wrap any displayable failure as a `SolveError::SolveFailed`
pub fn solve_failed(err: anyhow::Error) -> aoc_solver::SolveError {
    aoc_solver::SolveError::failed(err)
}
