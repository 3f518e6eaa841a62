//! Error types shared by solvers, the registry and callers

use thiserror::Error;

/// Failure to turn raw puzzle input into a solver's shared data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input as a whole doesn't match the expected structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    /// A single line failed to parse; `line` is 1-based
    #[error("Invalid input on line {line}: {message}")]
    InvalidLine { line: usize, message: String },
    /// A required section of the input is absent
    #[error("Missing data: {0}")]
    MissingData(String),
}

impl ParseError {
    /// Build an [`InvalidLine`](ParseError::InvalidLine) from a 0-based line index
    pub fn at_line(index: usize, message: impl ToString) -> Self {
        ParseError::InvalidLine {
            line: index + 1,
            message: message.to_string(),
        }
    }
}

/// Failure while solving one part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The solver declares this part but has no implementation for it
    #[error("Part {0} is not implemented")]
    PartNotImplemented(u8),
    /// Part is 0 or exceeds the solver's `PARTS`
    #[error("Part {0} is out of range")]
    PartOutOfRange(u8),
    #[error("Solve failed: {0}")]
    SolveFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure to look up, create or run a solver
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("Solver not found for {0}/day{1:02}")]
    NotFound(u16, u8),
    /// Year or day outside the registry's supported range
    #[error("Invalid year/day: {0}/{1}")]
    InvalidYearDay(u16, u8),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
    #[error("Solve error: {0}")]
    SolveError(#[from] SolveError),
}

/// Failure to add a solver to a registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Duplicate solver registration for {0}/day{1:02}")]
    DuplicateSolver(u16, u8),
    /// Year or day outside the registry's supported range
    #[error("Cannot register solver for {0}/day{1}: out of range")]
    InvalidYearDay(u16, u8),
}
