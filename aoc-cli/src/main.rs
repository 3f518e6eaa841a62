//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod output;

// Link the 2025 solver plugins
use aoc_2025 as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::Executor;
use output::OutputFormatter;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only answers
fn init_logging(verbose: bool) {
    let filter = if verbose { "aoc=debug" } else { "aoc=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Returns whether every selected part produced an answer
fn run(args: Args) -> Result<bool, CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        warn!("no solvers found matching the specified filters");
        return Ok(false);
    }

    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| format!("{}/day{:02}", w.year, w.day))
        .collect();
    if !missing.is_empty() {
        warn!(count = missing.len(), days = %missing.join(", "), "missing input file(s)");
    }

    let expected_keys: Vec<ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();
    info!(solvers = work_items.len(), parts = expected_keys.len(), "running");

    let formatter = OutputFormatter::new(config.format);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    let (tx, rx) = std::sync::mpsc::channel();
    let executed = std::thread::scope(|s| {
        let handle = s.spawn(|| executor.execute(tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready);
                results.push(ready);
            }
        }

        handle
            .join()
            .map_err(|_| CliError::Config("Executor thread panicked".to_string()))
    })?;

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!(
            missing = aggregator.missing().count(),
            "not all expected results were received"
        );
    }
    executed?;

    formatter.print_summary(&results);

    let failed = results.iter().filter(|r| r.answer.is_err()).count();
    info!(solved = results.len() - failed, failed, "finished");
    Ok(failed == 0 && aggregator.is_complete())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
