//! Error types for the CLI

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),
}

/// Failure to load a puzzle input
#[derive(Error, Debug)]
pub enum InputError {
    #[error("no input for {year}/day{day:02} (expected {})", .path.display())]
    Missing { year: u16, day: u8, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}

/// Why a single part produced no answer
#[derive(Error, Debug, Clone)]
pub enum PartError {
    /// Shared by every part of the day whose input failed to load
    #[error("{0}")]
    Input(Arc<InputError>),

    #[error("{0}")]
    Solver(Arc<aoc_solver::SolverError>),
}

impl From<aoc_solver::SolverError> for PartError {
    fn from(e: aoc_solver::SolverError) -> Self {
        PartError::Solver(Arc::new(e))
    }
}

impl From<aoc_solver::SolveError> for PartError {
    fn from(e: aoc_solver::SolveError) -> Self {
        aoc_solver::SolverError::from(e).into()
    }
}

/// Executor-specific errors
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Result receiver went away
    #[error("Channel send error")]
    ChannelSend,

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening either side that
    /// already is one and keeping `first` before `second`
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let mut errors = Vec::new();
        for err in [first, second] {
            match err.inner() {
                ExecutorError::Multiple(inner) => errors.extend(inner.iter().cloned()),
                _ => errors.push(err),
            }
        }
        ExecutorError::Multiple(errors).into()
    }

    /// Combine an optional error with a new error
    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }
}
