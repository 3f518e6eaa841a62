//! Plugin registration and tag filtering
//!
//! Two solvers register themselves through `#[derive(AutoRegisterSolver)]`,
//! a third is added by hand with `register_solver!`. The registry is then
//! built twice: once with everything, once filtered by tag.
//!
//! Run with: cargo run --example plugin_system

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder, register_solver,
};

const INPUT: &str = "3-5\n10-14\n16-20\n12-18";

fn parse_ranges(input: &str) -> Result<Vec<(u64, u64)>, ParseError> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let (start, end) = line
                .split_once('-')
                .ok_or_else(|| ParseError::at_line(idx, "expected start-end"))?;
            let start = start.trim().parse().map_err(|e| ParseError::at_line(idx, e))?;
            let end = end.trim().parse().map_err(|e| ParseError::at_line(idx, e))?;
            Ok((start, end))
        })
        .collect()
}

/// Widest single range
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2023, day = 1, tags = ["easy", "ranges"])]
pub struct Widest;

impl AocParser for Widest {
    type SharedData<'a> = Vec<(u64, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_ranges(input)
    }
}

impl PartSolver<1> for Widest {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let widest = shared.iter().map(|(s, e)| e - s + 1).max().unwrap_or(0);
        Ok(widest.to_string())
    }
}

/// Lowest start, then highest end
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["ranges"])]
pub struct Bounds;

impl AocParser for Bounds {
    type SharedData<'a> = Vec<(u64, u64)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_ranges(input)
    }
}

impl PartSolver<1> for Bounds {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.0).min().unwrap_or(0).to_string())
    }
}

impl PartSolver<2> for Bounds {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|r| r.1).max().unwrap_or(0).to_string())
    }
}

/// Registered manually below
#[derive(AocSolver)]
#[aoc_solver(max_parts = 1)]
pub struct LineCount;

impl AocParser for LineCount {
    type SharedData<'a> = &'a str;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for LineCount {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.lines().count().to_string())
    }
}

fn main() {
    println!("=== All plugins ===");
    let mut builder = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("plugins register");
    register_solver!(builder, LineCount, 2023, 3);
    let registry = builder.build();

    for info in registry.storage().iter_info() {
        let mut solver = registry
            .create_solver(info.year, info.day, INPUT)
            .expect("input parses");
        for part in 1..=info.parts {
            let result = solver.solve(part).expect("part solves");
            println!(
                "{}/day{:02} part {}: {} ({}µs)",
                info.year,
                info.day,
                part,
                result.answer,
                result.duration.num_microseconds().unwrap_or_default()
            );
        }
    }

    println!("\n=== Tagged \"easy\" ===");
    let easy = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"easy"))
        .expect("plugins register")
        .build();
    for info in easy.storage().iter_info() {
        println!("{}/day{:02} ({} part(s))", info.year, info.day, info.parts);
    }
}
