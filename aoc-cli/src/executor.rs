//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, PartError};
use crate::input::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single solver execution
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, PartError>,
    pub solve_duration: TimeDelta,
    /// Set on the first result produced from each parsed instance
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: PartError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

/// State shared by every worker
pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.sync_executor_config.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                Some(WorkItem {
                    year: info.year,
                    day: info.day,
                    parts: filter_parts(cfg.part_filter, info.parts)?,
                })
            })
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        let cfg = &self.sync_executor_config;

        match cfg.parallelize_by {
            ParallelizeBy::Sequential => run_group(work_items, &tx, cfg),
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();
                self.execute_groups(by_year, &tx)
            }
            // Part differs only inside run_work
            ParallelizeBy::Day | ParallelizeBy::Part => {
                self.execute_groups(work_items.into_iter().map(|w| vec![w]).collect(), &tx)
            }
        }
    }

    /// Run groups on the pool; items within one group run in order
    fn execute_groups(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let cfg = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| run_group(items, tx, cfg).err())
                .reduce(
                    || None,
                    |acc, err| match (acc, err) {
                        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
                        (a, b) => a.or(b),
                    },
                )
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts to run for a solver, `None` when the part filter excludes all of them
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> Option<RangeInclusive<u8>> {
    match part_filter {
        Some(p) if (1..=max_parts).contains(&p) => Some(p..=p),
        Some(_) => None,
        None if max_parts > 0 => Some(1..=max_parts),
        None => None,
    }
}

fn run_group(
    items: Vec<WorkItem>,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let mut collected_error: Option<ArcExecutorError> = None;
    for work in items {
        if let Err(e) = run_work(&work, tx, cfg) {
            collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
        }
    }
    collected_error.map_or(Ok(()), Err)
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one year/day and solve the selected parts
fn run_work(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    cfg: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match cfg.inputs.get(year, day) {
        Ok(input) => input,
        Err(e) => {
            warn!(year, day, error = %e, "input unavailable");
            let error = PartError::Input(Arc::new(e));
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    if matches!(cfg.parallelize_by, ParallelizeBy::Part) {
        // Each part parses its own instance
        work.parts.clone().into_par_iter().try_for_each(|part| {
            solve_parts(year, day, part..=part, &input, tx, &cfg.registry)
        })
    } else {
        solve_parts(year, day, work.parts.clone(), &input, tx, &cfg.registry)
    }
}

/// Parse once, then solve `parts` in order on the same instance
fn solve_parts(
    year: u16,
    day: u8,
    parts: RangeInclusive<u8>,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let mut solver = match registry.create_solver(year, day, input) {
        Ok(solver) => solver,
        Err(e) => {
            debug!(year, day, error = %e, "solver creation failed");
            let error = PartError::from(e);
            for part in parts {
                send(tx, SolverResult::failed(year, day, part, error.clone()))?;
            }
            return Ok(());
        }
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in parts {
        send(tx, solve_part(part, &mut *solver, parse_duration.take()))?;
    }
    Ok(())
}

/// Solve a single part on an already parsed instance
fn solve_part(
    part: u8,
    solver: &mut dyn DynSolver,
    parse_duration: Option<TimeDelta>,
) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    debug!(year, day, part, "solving");

    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration,
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::config::InputSource;
    use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use std::fs;
    use tempfile::TempDir;

    #[derive(aoc_solver::AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Sums;

    impl AocParser for Sums {
        type SharedData<'a> = Vec<i64>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            input
                .lines()
                .enumerate()
                .map(|(idx, line)| line.trim().parse().map_err(|e| ParseError::at_line(idx, e)))
                .collect()
        }
    }

    impl PartSolver<1> for Sums {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Sums {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().product::<i64>().to_string())
        }
    }

    fn executor(dir: &TempDir, parallelize_by: ParallelizeBy, part: Option<u8>) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<Sums>(2024, 1)
            .unwrap()
            .register::<Sums>(2024, 2)
            .unwrap()
            .register::<Sums>(2025, 1)
            .unwrap()
            .build();
        let config = Config {
            year_filter: None,
            day_filter: None,
            part_filter: part,
            tags: Vec::new(),
            input: InputSource::Directory(dir.path().to_path_buf()),
            thread_count: 2,
            parallelize_by,
            format: OutputFormat::Plain,
        };
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        results
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), Some(1..=2));
        assert_eq!(filter_parts(Some(2), 2), Some(2..=2));
        assert_eq!(filter_parts(Some(2), 1), None);
        assert_eq!(filter_parts(None, 0), None);
    }

    #[test]
    fn test_collect_work_items_respects_part_filter() {
        let temp = TempDir::new().unwrap();
        let items = executor(&temp, ParallelizeBy::Day, Some(2)).collect_work_items();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|w| w.parts == (2..=2)));
        assert_eq!((items[0].year, items[0].day), (2024, 1));
        assert_eq!((items[2].year, items[2].day), (2025, 1));
    }

    #[test]
    fn test_every_mode_produces_same_answers() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2024_day01.txt"), "1\n2\n3\n").unwrap();
        fs::write(temp.path().join("2024_day02.txt"), "4\n5\n").unwrap();
        fs::write(temp.path().join("2025_day01.txt"), "7\n").unwrap();

        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let results = run(&executor(&temp, mode, None));
            let answers: Vec<_> = results
                .iter()
                .map(|r| r.answer.as_ref().unwrap().as_str())
                .collect();
            assert_eq!(answers, ["6", "6", "9", "20", "7", "7"], "mode {:?}", mode);
        }
    }

    #[test]
    fn test_parse_duration_reported_once_per_instance() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2024_day01.txt"), "1\n").unwrap();
        fs::write(temp.path().join("2024_day02.txt"), "1\n").unwrap();
        fs::write(temp.path().join("2025_day01.txt"), "1\n").unwrap();

        let results = run(&executor(&temp, ParallelizeBy::Day, None));
        let with_parse = results.iter().filter(|r| r.parse_duration.is_some()).count();
        assert_eq!(with_parse, 3);

        let results = run(&executor(&temp, ParallelizeBy::Part, None));
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn test_failures_become_results() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2024_day01.txt"), "1\nnot a number\n").unwrap();
        fs::write(temp.path().join("2025_day01.txt"), "5\n").unwrap();

        let results = run(&executor(&temp, ParallelizeBy::Day, None));
        assert_eq!(results.len(), 6);

        // 2024/01 fails to parse, 2024/02 has no input
        assert!(results[..4].iter().all(|r| r.answer.is_err()));
        assert!(matches!(results[0].answer, Err(PartError::Solver(_))));
        assert!(matches!(results[2].answer, Err(PartError::Input(_))));
        assert_eq!(results[4].answer.as_deref().unwrap(), "5");
    }
}
