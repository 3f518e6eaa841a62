//! Day 2: invalid product IDs
//!
//! A single line of comma-separated `start-end` ID ranges. An ID is invalid when
//! its decimal digits are one block repeated.

use crate::utils::interval_set::Interval;
use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 2, tags = ["2025", "intervals"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Interval>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let ranges = input
            .split(',')
            .map(str::trim)
            .filter(|range| !range.is_empty())
            .enumerate()
            .map(|(idx, range)| {
                range
                    .parse::<Interval>()
                    .with_context(|| format!("range #{}", idx + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| ParseError::InvalidFormat(format!("{:#}", e)))?;

        if ranges.is_empty() {
            return Err(ParseError::MissingData("no ID ranges".to_string()));
        }
        Ok(ranges)
    }
}

/// True if `digits` is `digits[..block]` repeated
fn is_repetition(digits: &[u8], block: usize) -> bool {
    digits.len() % block == 0 && digits.chunks(block).all(|chunk| chunk == &digits[..block])
}

/// Digits are some block repeated exactly twice
fn repeated_twice(id: i64) -> bool {
    let digits = id.to_string();
    let len = digits.len();
    len % 2 == 0 && is_repetition(digits.as_bytes(), len / 2)
}

/// Digits are some block repeated two or more times
fn repeated_at_least_twice(id: i64) -> bool {
    let digits = id.to_string();
    let len = digits.len();
    (1..=len / 2).any(|block| is_repetition(digits.as_bytes(), block))
}

fn sum_invalid(ranges: &[Interval], is_invalid: fn(i64) -> bool) -> i64 {
    ranges
        .iter()
        .flat_map(Interval::iter)
        .filter(|&id| is_invalid(id))
        .sum()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, repeated_twice).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(sum_invalid(shared, repeated_at_least_twice).to_string())
    }
}
