//! Parser and solver traits implemented by each puzzle day

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Ranges;
///
/// impl AocParser for Ranges {
///     type SharedData<'a> = Vec<(u32, u32)>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(idx, line)| {
///                 let (a, b) = line.split_once('-').ok_or_else(|| ParseError::at_line(idx, "missing '-'"))?;
///                 let a = a.parse().map_err(|e| ParseError::at_line(idx, e))?;
///                 let b = b.parse().map_err(|e| ParseError::at_line(idx, e))?;
///                 Ok((a, b))
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Ranges::parse("1-3\n5-9").unwrap(), vec![(1, 3), (5, 9)]);
/// assert!(Ranges::parse("1-3\n59").is_err());
/// ```
pub trait AocParser {
    /// Parsed input plus anything parts want to share (e.g. a cached intermediate).
    ///
    /// The lifetime allows borrowing from the input instead of copying it.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Usually implemented once per part and tied together with `#[derive(AocSolver)]`.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Widths;
///
/// impl AocParser for Widths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|w| w.parse().map_err(|_| ParseError::InvalidFormat(w.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Widths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<u32>().to_string())
///     }
/// }
///
/// let mut shared = Widths::parse("3 4 5").unwrap();
/// assert_eq!(<Widths as PartSolver<1>>::solve(&mut shared).unwrap(), "12");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part; `shared` may be mutated to cache work for later parts
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete puzzle solver: a parser plus `PARTS` parts addressed by number.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Extremes;
///
/// impl AocParser for Extremes {
///     type SharedData<'a> = Vec<i64>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .enumerate()
///             .map(|(idx, l)| l.trim().parse().map_err(|e| ParseError::at_line(idx, e)))
///             .collect()
///     }
/// }
///
/// impl Solver for Extremes {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let answer = match part {
///             1 => shared.iter().min(),
///             2 => shared.iter().max(),
///             _ => return Err(SolveError::PartNotImplemented(part)),
///         };
///         Ok(answer.map(i64::to_string).unwrap_or_default())
///     }
/// }
///
/// let mut shared = Extremes::parse("4\n-2\n9").unwrap();
/// assert_eq!(Extremes::solve_part(&mut shared, 1).unwrap(), "-2");
/// assert_eq!(Extremes::solve_part(&mut shared, 2).unwrap(), "9");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked part dispatch, implemented for every [`Solver`]
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`] but rejects parts outside `1..=PARTS`
    /// with [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
