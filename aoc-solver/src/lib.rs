//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers across years and days.
//! Each solver parses its input once into shared data and answers one or more
//! numbered parts from it.
//!
//! # Overview
//!
//! - [`AocParser`]: input parsing into a solver-defined `SharedData`
//! - [`PartSolver<N>`]: one implementation per part
//! - [`Solver`]: part dispatch, usually derived with `#[derive(AocSolver)]`
//! - [`SolverRegistry`]: year/day lookup, filled by hand or from plugins
//! - [`DynSolver`]: type-erased, timed solving used by runners
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<u32>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .enumerate()
//!             .map(|(idx, line)| line.parse().map_err(|e| ParseError::at_line(idx, e)))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.windows(2).filter(|w| w[1] > w[0]).count().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register::<Depths>(2021, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2021, 1, "199\n200\n208\n200").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "2");
//! assert_eq!(solver.solve(2).unwrap().answer, "208");
//! ```
//!
//! # Plugins
//!
//! `#[derive(AutoRegisterSolver)]` with `#[aoc(year = .., day = .., tags = [..])]`
//! submits the solver to [`inventory`]; [`SolverRegistryBuilder::register_all_plugins`]
//! and [`SolverRegistryBuilder::register_solver_plugins`] collect them.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Used by the derive macros' generated code
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
