//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains actual puzzle solutions organized by year.
//! Each solution uses the `AutoRegisterSolver` derive macro for automatic
//! plugin registration with the solver framework, so linking the crate is
//! enough for `SolverRegistryBuilder::register_all_plugins` to find them.

pub mod utils;

#[cfg(feature = "year-2018")]
pub mod year_2018;
