//! Day 1: safe dial
//!
//! A dial numbered 0-99 starts at 50 and is turned by `L<n>` / `R<n>` rotations.

use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

const DIAL_SIZE: u32 = 100;
const DIAL_START: u32 = 50;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2025, day = 1, tags = ["2025"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Left(u32),
    Right(u32),
}

#[derive(Debug)]
pub struct SharedData {
    rotations: Vec<Rotation>,
    zero_counts: Option<ZeroCounts>,
}

#[derive(Debug, Clone, Copy)]
struct ZeroCounts {
    /// Rotations that stop on 0
    stops: u64,
    /// Clicks that land on 0, mid-rotation included
    clicks: u64,
}

fn parse_rotation(line: &str) -> anyhow::Result<Rotation> {
    let line = line.trim();
    let (direction, amount) = line
        .split_at_checked(1)
        .ok_or_else(|| anyhow!("rotation needs a direction and an amount, got {:?}", line))?;
    let amount: u32 = amount
        .parse()
        .map_err(|e| anyhow!("invalid rotation amount {:?}: {}", amount, e))?;
    match direction {
        "L" => Ok(Rotation::Left(amount)),
        "R" => Ok(Rotation::Right(amount)),
        _ => bail!("first character need to be 'L' or 'R', got {:?}", direction),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let rotations = input
            .trim()
            .lines()
            .enumerate()
            .map(|(idx, line)| parse_rotation(line).map_err(|e| ParseError::at_line(idx, e)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData {
            rotations,
            zero_counts: None,
        })
    }
}

/// Apply one rotation from `position`, returning the new position and how
/// many clicks landed on 0 along the way.
fn rotate(position: u32, rotation: Rotation) -> (u32, u32) {
    match rotation {
        Rotation::Right(amount) => {
            // Full turns first so `position + amount` can't overflow
            let end = position + amount % DIAL_SIZE;
            (end % DIAL_SIZE, amount / DIAL_SIZE + end / DIAL_SIZE)
        }
        Rotation::Left(amount) => {
            let end = (position + DIAL_SIZE - amount % DIAL_SIZE) % DIAL_SIZE;
            let hits = if position == 0 {
                amount / DIAL_SIZE
            } else if amount >= position {
                (amount - position) / DIAL_SIZE + 1
            } else {
                0
            };
            (end, hits)
        }
    }
}

fn zero_counts(shared: &mut SharedData) -> ZeroCounts {
    *shared.zero_counts.get_or_insert_with(|| {
        let mut position = DIAL_START;
        let mut counts = ZeroCounts { stops: 0, clicks: 0 };
        for &rotation in &shared.rotations {
            let (next, hits) = rotate(position, rotation);
            position = next;
            counts.clicks += u64::from(hits);
            if position == 0 {
                counts.stops += 1;
            }
        }
        counts
    })
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).stops.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(zero_counts(shared).clicks.to_string())
    }
}
