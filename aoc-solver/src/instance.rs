//! Parsed solver instances and the type-erased interface runners drive

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{TimeDelta, Utc};

/// Run `f`, measuring it against the UTC clock
fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let output = f();
    (output, Utc::now() - start)
}

/// Answer for one part and how long it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveResult {
    /// The part this answer belongs to
    pub part: u8,
    /// The answer string
    pub answer: String,
    /// Wall-clock time spent in `solve_part`
    pub duration: TimeDelta,
}

/// Input parsed by `S` for one year/day, ready to answer any of its parts
///
/// Holds the shared data (parsed input plus whatever the parts cache in it)
/// and the time parsing took. Parts run against the same shared data in the
/// order they are requested.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_duration: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    /// Parse `input` with `S`
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year
    /// * `day` - The day number (1-25)
    /// * `input` - Raw puzzle input; the shared data may borrow from it
    ///
    /// # Returns
    /// * `Ok(SolverInstance)` - Parsed instance with its parse time recorded
    /// * `Err(ParseError)` - `S` rejected the input
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_duration) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parse_duration,
        })
    }
}

/// Object-safe view of a [`SolverInstance`]
///
/// The registry hands these out so runners can drive any solver without
/// knowing its type.
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn report(solver: &mut dyn DynSolver) -> Result<(), aoc_solver::SolveError> {
///     println!("{}/day{:02} parsed in {}", solver.year(), solver.day(), solver.parse_duration());
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {}: {} ({})", result.part, result.answer, result.duration);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve one part, timing the call
    ///
    /// # Arguments
    /// * `part` - Part number, `1..=parts()`
    ///
    /// # Returns
    /// * `Ok(SolveResult)` - The answer and its solve time
    /// * `Err(SolveError::PartOutOfRange)` - `part` is outside `1..=parts()`
    /// * `Err(SolveError)` - Any other failure reported by the solver
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    /// The Advent of Code year this instance was created for
    fn year(&self) -> u16;

    /// The day this instance was created for
    fn day(&self) -> u8;

    /// Number of parts the underlying solver supports
    fn parts(&self) -> u8;

    /// Time spent parsing the input
    fn parse_duration(&self) -> TimeDelta;
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, duration) = timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            part,
            answer: answer?,
            duration,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_duration
    }
}
