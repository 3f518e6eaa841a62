//! Day 5: fresh ingredients
//!
//! Input is a block of fresh ID ranges (`start-end`), a blank line, then one
//! available ingredient ID per line.

use crate::utils::interval_set::{Interval, IntervalSet};
use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 5, tags = ["2025", "intervals"])]
pub struct Solver;

#[derive(Debug)]
pub struct SharedData {
    ranges: Vec<Interval>,
    ingredients: Vec<i64>,
    fresh: Option<IntervalSet>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        // Line numbers in errors count from the first line of the raw input
        let lines: Vec<(usize, &str)> = input
            .lines()
            .enumerate()
            .skip_while(|(_, line)| line.trim().is_empty())
            .collect();
        let separator = lines
            .iter()
            .position(|(_, line)| line.trim().is_empty())
            .ok_or_else(|| {
                ParseError::MissingData(
                    "blank line between fresh ranges and ingredient IDs".to_string(),
                )
            })?;
        let (range_lines, id_lines) = lines.split_at(separator);

        let ranges = range_lines
            .iter()
            .map(|&(idx, line)| line.parse::<Interval>().map_err(|e| ParseError::at_line(idx, e)))
            .collect::<Result<Vec<_>, _>>()?;

        let ingredients = id_lines[1..]
            .iter()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|&(idx, line)| {
                line.trim()
                    .parse::<i64>()
                    .with_context(|| format!("invalid ingredient ID {:?}", line.trim()))
                    .map_err(|e| ParseError::at_line(idx, format!("{:#}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData {
            ranges,
            ingredients,
            fresh: None,
        })
    }
}

/// Merged fresh ranges, built on first use and reused by both parts
fn fresh_set<'s>(fresh: &'s mut Option<IntervalSet>, ranges: &[Interval]) -> &'s IntervalSet {
    fresh.get_or_insert_with(|| ranges.iter().copied().collect())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = fresh_set(&mut shared.fresh, &shared.ranges);
        let count = shared
            .ingredients
            .iter()
            .filter(|&&id| fresh.contains(id))
            .count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let fresh = fresh_set(&mut shared.fresh, &shared.ranges);
        Ok(fresh.total_covered().to_string())
    }
}
