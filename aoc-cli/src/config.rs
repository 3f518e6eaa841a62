//! Configuration resolution from CLI args

use crate::cli::{Args, OutputFormat, ParallelizeBy};
use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the input directory
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";
const DEFAULT_INPUT_DIR: &str = "~/.cache/aoc_solver";

/// Where puzzle inputs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Standard input, for a single year/day
    Stdin,
    /// One file, for a single year/day
    File(PathBuf),
    /// `{year}_day{dd}.txt` files in a directory
    Directory(PathBuf),
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    pub input: InputSource,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    pub format: OutputFormat,
}

impl Config {
    /// Build config from CLI args and the process environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var_os(INPUT_DIR_ENV))
    }

    /// Build config from CLI args with an explicit `$AOC_INPUT_DIR` value
    pub fn resolve(args: Args, env_input_dir: Option<OsString>) -> Result<Self, CliError> {
        let input = match args.input {
            Some(path) => {
                if args.year.is_none() || args.day.is_none() {
                    return Err(CliError::Config(
                        "--input needs both --year and --day".to_string(),
                    ));
                }
                if path.as_os_str() == "-" {
                    InputSource::Stdin
                } else {
                    InputSource::File(expand_tilde(&path))
                }
            }
            None => {
                let dir = args
                    .input_dir
                    .or_else(|| env_input_dir.filter(|v| !v.is_empty()).map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
                InputSource::Directory(expand_tilde(&dir))
            }
        };

        if args.threads == Some(0) {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }
        let thread_count = args.threads.unwrap_or_else(num_cpus);

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input,
            thread_count,
            parallelize_by: args.parallelize_by,
            format: args.format,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && let Some(rest) = path_str
            .strip_prefix("~/")
            .or_else(|| (path_str == "~").then_some(""))
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("aoc").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_input_dir_precedence() {
        let config = Config::resolve(args(&["--input-dir", "/data"]), Some("/env".into())).unwrap();
        assert_eq!(config.input, InputSource::Directory(PathBuf::from("/data")));

        let config = Config::resolve(args(&[]), Some("/env".into())).unwrap();
        assert_eq!(config.input, InputSource::Directory(PathBuf::from("/env")));

        let config = Config::resolve(args(&[]), None).unwrap();
        let InputSource::Directory(dir) = config.input else {
            panic!("expected a directory source");
        };
        assert!(dir.ends_with(".cache/aoc_solver"));
    }

    #[test]
    fn test_empty_env_falls_back_to_default() {
        let config = Config::resolve(args(&[]), Some("".into())).unwrap();
        let InputSource::Directory(dir) = config.input else {
            panic!("expected a directory source");
        };
        assert!(dir.ends_with("aoc_solver"));
    }

    #[test]
    fn test_input_file_and_stdin() {
        let config = Config::resolve(args(&["-y", "2025", "-d", "5", "-i", "in.txt"]), None).unwrap();
        assert_eq!(config.input, InputSource::File(PathBuf::from("in.txt")));

        let config = Config::resolve(args(&["-y", "2025", "-d", "5", "-i", "-"]), None).unwrap();
        assert_eq!(config.input, InputSource::Stdin);
    }

    #[test]
    fn test_input_requires_year_and_day() {
        let err = Config::resolve(args(&["-d", "5", "-i", "-"]), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert!(Config::resolve(args(&["-y", "2025", "-i", "-"]), None).is_err());
    }

    #[test]
    fn test_input_conflicts_with_input_dir() {
        assert!(Args::try_parse_from(["aoc", "-i", "-", "--input-dir", "/data"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(args(&["-t", "2025,intervals"]), None).unwrap();
        assert_eq!(config.tags, vec!["2025", "intervals"]);
        assert_eq!(config.parallelize_by, ParallelizeBy::Day);
        assert_eq!(config.format, OutputFormat::Full);
        assert!(config.thread_count >= 1);
        assert!(Config::resolve(args(&["--threads", "0"]), None).is_err());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde(Path::new("rel")), PathBuf::from("rel"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/x")), home.join("x"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
