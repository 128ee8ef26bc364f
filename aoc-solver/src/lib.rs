//! Advent of Code Solver Library
//!
//! A small, type-safe framework for writing Advent of Code solvers and running
//! them uniformly. A solver parses its input once into shared data, then solves
//! each part against that data.
//!
//! # Overview
//!
//! This library provides:
//! - [`AocParser`] for turning raw input into a solver's shared data
//! - [`PartSolver`] for implementing one part at a time, checked at compile time
//! - [`Solver`] for dispatching a runtime part number to the right part
//! - [`DynSolver`] for driving any solver through dynamic dispatch
//! - A plugin registry filled automatically through `inventory`
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 1)]
//! struct Sum;
//!
//! impl AocParser for Sum {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sum {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sum>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! ```
//!
//! # Plugin registration
//!
//! Solutions crates derive [`AutoRegisterSolver`] next to [`AocSolver`]:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2023, day = 5, tags = ["2023", "ranges"])]
//! pub struct Solver;
//! ```
//!
//! and the binary collects them with [`SolverRegistryBuilder::register_all_plugins`].

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    CAPACITY, FactoryInfo, RegisterableSolver, SolverFactory, SolverPlugin, SolverRegistry,
    SolverRegistryBuilder,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-exported for the derive macros
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
