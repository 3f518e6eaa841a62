//! Advent of Code 2025 puzzle solutions with automatic registration
//!
//! Each day lives under [`my_solutions`] and registers itself through the
//! `AutoRegisterSolver` derive. Reusable building blocks live in [`utils`].

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;
