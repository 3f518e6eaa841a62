//! Solver registry: flat storage of factories indexed by year and day

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

// ============================================================================
// Storage Constants and Index Calculation
// ============================================================================

/// First Advent of Code year
pub const BASE_YEAR: u16 = 2015;
/// Number of years the registry can hold (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Puzzle days per year
pub const DAYS_PER_YEAR: usize = 25;
/// Total slots in the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Flat index for year/day, `None` when out of range
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factory Types
// ============================================================================

/// Creates a parsed solver instance borrowing from the given input
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Metadata about a registered solver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FactoryInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Number of parts the solver supports
    pub parts: u8,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
}

/// Parse `input` with `S` and erase the concrete type
fn create_instance<'a, S>(
    year: u16,
    day: u8,
    input: &'a str,
) -> Result<Box<dyn DynSolver + 'a>, ParseError>
where
    S: Solver + 'static,
{
    Ok(Box::new(SolverInstance::<S>::new(year, day, input)?))
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for an immutable [`SolverRegistry`].
///
/// Rejects duplicate and out-of-range registrations.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct LineCount;
///
/// impl AocParser for LineCount {
///     type SharedData<'a> = Vec<&'a str>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.lines().collect())
///     }
/// }
///
/// impl Solver for LineCount {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.len().to_string())
///     }
/// }
///
/// let registry = SolverRegistryBuilder::new()
///     .register::<LineCount>(2025, 1)
///     .unwrap()
///     .build();
///
/// let mut solver = registry.create_solver(2025, 1, "a\nb\nc").unwrap();
/// assert_eq!(solver.solve(1).unwrap().answer, "3");
/// assert!(registry.create_solver(2025, 2, "").is_err());
/// ```
pub struct SolverRegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistryBuilder {
    /// Create an empty builder with all slots pre-allocated
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a factory function with an explicit parts count
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year (2015-2034)
    /// * `day` - The day number (1-25)
    /// * `parts` - Number of parts the produced solvers support
    /// * `factory` - Parses an input into a boxed [`DynSolver`]
    ///
    /// # Returns
    /// * `Ok(Self)` - The builder with the factory stored
    /// * `Err(RegistrationError::InvalidYearDay)` - year/day outside the supported range
    /// * `Err(RegistrationError::DuplicateSolver)` - year/day already has a factory
    pub fn register_factory<F>(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(SolverFactoryEntry {
            factory: Box::new(factory),
            parts,
        });
        Ok(self)
    }

    /// Register solver type `S` for a year and day
    ///
    /// The parts count comes from `S::PARTS`.
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year (2015-2034)
    /// * `day` - The day number (1-25)
    ///
    /// # Returns
    /// * `Ok(Self)` - The builder with `S` registered
    /// * `Err(RegistrationError)` - Same failures as [`Self::register_factory`]
    pub fn register<S>(self, year: u16, day: u8) -> Result<Self, RegistrationError>
    where
        S: Solver + 'static,
    {
        self.register_factory(year, day, S::PARTS, move |input: &str| {
            create_instance::<S>(year, day, input)
        })
    }

    /// Register every plugin submitted through `inventory`
    ///
    /// # Returns
    /// * `Ok(Self)` - The builder with every plugin registered
    /// * `Err(RegistrationError)` - The first plugin that conflicts or is out of range
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`
    ///
    /// # Arguments
    /// * `filter` - Called once per submitted plugin; `true` registers it
    ///
    /// # Returns
    /// * `Ok(Self)` - The builder with the accepted plugins registered
    /// * `Err(RegistrationError)` - The first accepted plugin that conflicts or is out of range
    ///
    /// ```no_run
    /// # use aoc_solver::SolverRegistryBuilder;
    /// let registry = SolverRegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.year == 2025 && plugin.tags.contains(&"intervals"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin> {
            if filter(plugin) {
                self = plugin.solver.register_with(self, plugin.year, plugin.day)?;
            }
        }
        Ok(self)
    }

    /// Finalize into an immutable registry
    ///
    /// # Returns
    /// A [`SolverRegistry`] holding every factory registered so far
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            storage: SolverFactoryStorage {
                entries: self.entries,
            },
        }
    }
}

impl Default for SolverRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Storage and Registry
// ============================================================================

/// Read-only view of registered factories, in (year, day) order
pub struct SolverFactoryStorage {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverFactoryStorage {
    /// Metadata for all registered solvers, ordered by year then day
    ///
    /// # Returns
    /// An iterator of [`FactoryInfo`], one per registered year/day
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                FactoryInfo {
                    year,
                    day,
                    parts: e.parts,
                }
            })
        })
    }

    /// Metadata for the solver registered at year/day
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year
    /// * `day` - The day number
    ///
    /// # Returns
    /// * `Some(FactoryInfo)` - A solver is registered there
    /// * `None` - Nothing registered, or year/day outside the supported range
    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| FactoryInfo {
                year,
                day,
                parts: e.parts,
            })
    }

    /// Check whether a solver is registered for year/day
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    /// Number of registered solvers
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if no solver is registered
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

/// Immutable registry mapping year/day to solver factories.
///
/// `Sync`, so one registry can be shared across worker threads by reference.
pub struct SolverRegistry {
    storage: SolverFactoryStorage,
}

impl SolverRegistry {
    /// Get the storage for enumerating registered solvers
    pub fn storage(&self) -> &SolverFactoryStorage {
        &self.storage
    }

    /// Parse `input` with the solver registered for year/day
    ///
    /// # Arguments
    /// * `year` - The Advent of Code year
    /// * `day` - The day number
    /// * `input` - Raw puzzle input; the returned solver may borrow from it
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Parsed solver ready to answer its parts
    /// * `Err(SolverError::InvalidYearDay)` - year/day outside the supported range
    /// * `Err(SolverError::NotFound)` - nothing registered for year/day
    /// * `Err(SolverError::ParseError)` - the solver rejected the input
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .storage
            .entries
            .get(index)
            .and_then(Option::as_ref)
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }
}

// ============================================================================
// Plugins
// ============================================================================

/// Type-erased hook letting a solver register itself.
///
/// Blanket-implemented for every `Solver + Sync + 'static`, so a `&'static`
/// reference to a unit struct solver can sit in a [`SolverPlugin`].
pub trait RegisterableSolver: Sync {
    /// Register this solver's type on `builder`
    ///
    /// # Arguments
    /// * `builder` - Builder to register on
    /// * `year` - The Advent of Code year
    /// * `day` - The day number
    ///
    /// # Returns
    /// * `Ok(SolverRegistryBuilder)` - The builder with this solver registered
    /// * `Err(RegistrationError)` - year/day conflicts or is out of range
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError>;

    /// Number of parts the solver supports
    fn parts(&self) -> u8;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn register_with(
        &self,
        builder: SolverRegistryBuilder,
        year: u16,
        day: u8,
    ) -> Result<SolverRegistryBuilder, RegistrationError> {
        builder.register::<S>(year, day)
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}

/// A solver submitted for automatic registration.
///
/// Normally produced by `#[derive(AutoRegisterSolver)]`; can also be submitted by hand:
///
/// ```no_run
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverPlugin};
///
/// struct Echo;
///
/// impl AocParser for Echo {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input)
///     }
/// }
///
/// impl Solver for Echo {
///     const PARTS: u8 = 1;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, _part: u8) -> Result<String, SolveError> {
///         Ok(shared.trim().to_string())
///     }
/// }
///
/// aoc_solver::inventory::submit! {
///     SolverPlugin {
///         year: 2024,
///         day: 1,
///         solver: &Echo,
///         tags: &["echo"],
///     }
/// }
/// ```
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver to register, usually a reference to a unit struct
    pub solver: &'static dyn RegisterableSolver,
    /// Free-form labels used to filter which plugins get registered
    pub tags: &'static [&'static str],
}

inventory::collect!(SolverPlugin);

/// Register a solver type on a builder variable, panicking on conflict.
///
/// ```
/// use aoc_solver::{register_solver, AocParser, ParseError, SolveError, Solver, SolverRegistryBuilder};
///
/// struct Noop;
///
/// impl AocParser for Noop {
///     type SharedData<'a> = ();
///
///     fn parse(_: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(())
///     }
/// }
///
/// impl Solver for Noop {
///     const PARTS: u8 = 1;
///
///     fn solve_part(_: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         Err(SolveError::PartNotImplemented(part))
///     }
/// }
///
/// let mut builder = SolverRegistryBuilder::new();
/// register_solver!(builder, Noop, 2023, 1);
/// let registry = builder.build();
/// assert!(registry.storage().contains(2023, 1));
/// ```
#[macro_export]
macro_rules! register_solver {
    ($builder:expr, $solver:ty, $year:expr, $day:expr) => {
        $builder = $builder
            .register::<$solver>($year, $day)
            .expect("Failed to register solver");
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Count;

    impl AocParser for Count {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            if input.is_empty() {
                return Err(ParseError::MissingData("empty input".to_string()));
            }
            Ok(input.split(',').collect())
        }
    }

    impl Solver for Count {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.iter().map(|s| s.len()).sum::<usize>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    #[test]
    fn test_index_round_trip_bounds() {
        assert_eq!(calc_index(2015, 1), Some(0));
        assert_eq!(calc_index(2034, 25), Some(CAPACITY - 1));
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2025, 0), None);
        assert_eq!(calc_index(2025, 26), None);
        assert_eq!(from_index(calc_index(2025, 5).unwrap()), (2025, 5));
    }

    #[test]
    fn test_register_and_create() {
        let registry = SolverRegistryBuilder::new()
            .register::<Count>(2025, 5)
            .unwrap()
            .build();

        let mut solver = registry.create_solver(2025, 5, "ab,c,def").unwrap();
        assert_eq!(solver.year(), 2025);
        assert_eq!(solver.day(), 5);
        assert_eq!(solver.parts(), 2);
        assert_eq!(solver.solve(1).unwrap().answer, "3");
        assert_eq!(solver.solve(2).unwrap().answer, "6");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = SolverRegistryBuilder::new()
            .register::<Count>(2025, 5)
            .unwrap()
            .register::<Count>(2025, 5);
        assert!(matches!(
            result,
            Err(RegistrationError::DuplicateSolver(2025, 5))
        ));
    }

    #[test]
    fn test_out_of_range_registration_rejected() {
        let result = SolverRegistryBuilder::new().register::<Count>(2025, 26);
        assert!(matches!(
            result,
            Err(RegistrationError::InvalidYearDay(2025, 26))
        ));
    }

    #[test]
    fn test_create_solver_errors() {
        let registry = SolverRegistryBuilder::new()
            .register::<Count>(2025, 5)
            .unwrap()
            .build();

        assert!(matches!(
            registry.create_solver(2025, 6, "x"),
            Err(SolverError::NotFound(2025, 6))
        ));
        assert!(matches!(
            registry.create_solver(1999, 1, "x"),
            Err(SolverError::InvalidYearDay(1999, 1))
        ));
        assert!(matches!(
            registry.create_solver(2025, 5, ""),
            Err(SolverError::ParseError(ParseError::MissingData(_)))
        ));
    }

    #[test]
    fn test_iter_info_ordered() {
        let registry = SolverRegistryBuilder::new()
            .register::<Count>(2025, 5)
            .unwrap()
            .register::<Count>(2016, 2)
            .unwrap()
            .register::<Count>(2025, 1)
            .unwrap()
            .build();

        let keys: Vec<_> = registry
            .storage()
            .iter_info()
            .map(|info| (info.year, info.day))
            .collect();
        assert_eq!(keys, vec![(2016, 2), (2025, 1), (2025, 5)]);
        assert_eq!(registry.storage().len(), 3);
        assert_eq!(
            registry.storage().get_info(2025, 1),
            Some(FactoryInfo {
                year: 2025,
                day: 1,
                parts: 2
            })
        );
    }
}
