//! Output formatting for solver results
//!
//! Answers go to stdout, failures to stderr, so `--format plain` output can be
//! piped and compared directly.

use crate::cli::OutputFormat;
use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::io::{self, Write};
use std::time::Instant;

/// Output formatter for solver results
pub struct OutputFormatter {
    format: OutputFormat,
    start_time: Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            start_time: Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        // Write errors (closed pipe) are ignored
        let _ = self.write_result(&mut io::stdout().lock(), &mut io::stderr().lock(), result);
    }

    /// Write one result: the answer to `out`, a failure to `err`
    pub fn write_result(
        &self,
        out: &mut impl Write,
        err: &mut impl Write,
        result: &SolverResult,
    ) -> io::Result<()> {
        match (&result.answer, self.format) {
            (Ok(answer), OutputFormat::Quiet) => writeln!(out, "{}", answer),
            (Ok(answer), OutputFormat::Plain) => writeln!(out, "Part {}: {}", result.part, answer),
            (Ok(answer), OutputFormat::Full) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                writeln!(
                    out,
                    "{}: {} ({}solve: {})",
                    prefix(result),
                    answer,
                    parse_timing,
                    format_duration(result.solve_duration)
                )
            }
            (Err(e), OutputFormat::Full) => writeln!(err, "{}: Error - {}", prefix(result), e),
            (Err(e), _) => writeln!(err, "Part {}: Error - {}", result.part, e),
        }
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[SolverResult]) {
        let _ = self.write_summary(&mut io::stdout().lock(), results);
    }

    /// Shows both total solve time (sum of durations) and actual elapsed
    /// wall-clock time. Only the full format has a summary.
    pub fn write_summary(&self, out: &mut impl Write, results: &[SolverResult]) -> io::Result<()> {
        if self.format != OutputFormat::Full {
            return Ok(());
        }

        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();
        let failures = total - successes;

        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results
            .iter()
            .filter(|r| r.answer.is_ok())
            .map(|r| r.solve_duration)
            .sum();
        let total_compute_time = total_parse_time + total_solve_time;
        let elapsed_time = TimeDelta::from_std(self.start_time.elapsed()).unwrap_or(TimeDelta::MAX);

        writeln!(out)?;
        writeln!(out, "--- Summary ---")?;
        writeln!(out, "Parts: {} solved, {} failed", successes, failures)?;
        writeln!(out, "Total parse time: {}", format_duration(total_parse_time))?;
        writeln!(out, "Total solve time: {}", format_duration(total_solve_time))?;
        writeln!(out, "Elapsed wall-clock time: {}", format_duration(elapsed_time))?;
        if let (Some(compute), Some(elapsed)) = (
            total_compute_time.num_microseconds(),
            elapsed_time.num_microseconds(),
        ) && elapsed > 0
        {
            writeln!(out, "Speedup factor: {:.2}x", compute as f64 / elapsed as f64)?;
        }
        Ok(())
    }
}

fn prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, PartError};
    use std::path::PathBuf;
    use std::sync::Arc;

    fn solved(part: u8, answer: &str) -> SolverResult {
        SolverResult {
            year: 2025,
            day: 5,
            part,
            answer: Ok(answer.to_string()),
            solve_duration: TimeDelta::microseconds(1500),
            parse_duration: (part == 1).then(|| TimeDelta::microseconds(250)),
        }
    }

    fn missing(part: u8) -> SolverResult {
        SolverResult {
            year: 2025,
            day: 5,
            part,
            answer: Err(PartError::Input(Arc::new(InputError::Missing {
                year: 2025,
                day: 5,
                path: PathBuf::from("in/2025_day05.txt"),
            }))),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }

    fn render(format: OutputFormat, result: &SolverResult) -> (String, String) {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        OutputFormatter::new(format)
            .write_result(&mut out, &mut err, result)
            .unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_plain_lines() {
        assert_eq!(
            render(OutputFormat::Plain, &solved(1, "3")),
            ("Part 1: 3\n".to_string(), String::new())
        );
        assert_eq!(render(OutputFormat::Plain, &solved(2, "14")).0, "Part 2: 14\n");
    }

    #[test]
    fn test_quiet_and_full() {
        assert_eq!(render(OutputFormat::Quiet, &solved(2, "14")).0, "14\n");
        assert_eq!(
            render(OutputFormat::Full, &solved(1, "3")).0,
            "2025/05 Part 1: 3 (parse: 250µs, solve: 1.50ms)\n"
        );
        assert_eq!(
            render(OutputFormat::Full, &solved(2, "14")).0,
            "2025/05 Part 2: 14 (solve: 1.50ms)\n"
        );
    }

    #[test]
    fn test_errors_go_to_stderr() {
        let (out, err) = render(OutputFormat::Plain, &missing(2));
        assert!(out.is_empty());
        assert_eq!(
            err,
            "Part 2: Error - no input for 2025/day05 (expected in/2025_day05.txt)\n"
        );

        let (out, err) = render(OutputFormat::Full, &missing(1));
        assert!(out.is_empty());
        assert!(err.starts_with("2025/05 Part 1: Error - no input"));
    }

    #[test]
    fn test_summary_only_in_full_format() {
        let results = [solved(1, "3"), missing(2)];

        let mut out = Vec::new();
        OutputFormatter::new(OutputFormat::Plain)
            .write_summary(&mut out, &results)
            .unwrap();
        assert!(out.is_empty());

        OutputFormatter::new(OutputFormat::Full)
            .write_summary(&mut out, &results)
            .unwrap();
        let summary = String::from_utf8(out).unwrap();
        assert!(summary.contains("Parts: 1 solved, 1 failed"));
        assert!(summary.contains("Total parse time: 250µs"));
        assert!(summary.contains("Total solve time: 1.50ms"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1000)), "1.00ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-5)), "-5µs");
        assert_eq!(format_duration(TimeDelta::MAX), "N/A");
    }
}
