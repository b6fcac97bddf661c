//! Advent of Code Solver Library
//!
//! A small framework for running Advent of Code solutions uniformly. Each
//! puzzle is a solver type with its own input parsing; parts are solved
//! against the parsed data and produce string answers.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder, register_solver};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Frequencies;
//!
//! impl AocParser for Frequencies {
//!     type SharedData<'a> = Vec<i32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i32>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Frequencies {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().map(|n| n.abs()).max().unwrap_or(0).to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! register_solver!(builder, Frequencies, 2018, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2018, 1, "+1\n-2\n+3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```
//!
//! # Key Concepts
//!
//! - [`AocParser`] turns the raw input into `SharedData`, which may borrow
//!   from the input.
//! - [`PartSolver<N>`] solves part `N` with mutable access to the shared data,
//!   so a later part can reuse what an earlier one computed.
//! - [`Solver`] ties the parts together; `#[derive(AocSolver)]` writes it.
//! - [`DynSolver`] is the type-erased handle the registry hands out.
//! - `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so the
//!   solver is found by [`SolverRegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, CAPACITY, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver, SolverFactory,
    SolverPlugin, SolverRegistry, SolverRegistryBuilder, SolverStorage,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the generated code of `AutoRegisterSolver`
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
