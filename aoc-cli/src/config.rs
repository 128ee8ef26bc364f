//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use crate::input::InputStore;
use std::path::{Path, PathBuf};

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
    /// Where puzzle inputs are read from
    pub inputs: InputStore,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = args.threads.unwrap_or_else(num_cpus);
        if thread_count == 0 {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }

        let mut inputs = InputStore::new(expand_tilde(&args.input_dir));
        if let Some(path) = args.input {
            let (Some(year), Some(day)) = (args.year, args.day) else {
                return Err(CliError::Config(
                    "--input needs both --year and --day".to_string(),
                ));
            };
            inputs = inputs.with_override(year, day, expand_tilde(&path));
        }

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            inputs,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
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

    fn config(args: &[&str]) -> Result<Config, CliError> {
        let args = Args::try_parse_from(["aoc", "--input-dir", "/data/aoc"].iter().chain(args))
            .unwrap();
        Config::from_args(args)
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(
            expand_tilde(Path::new("~/.cache/aoc")),
            home.join(".cache/aoc")
        );
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(
            expand_tilde(Path::new("/abs/path")),
            PathBuf::from("/abs/path")
        );
        assert_eq!(
            expand_tilde(Path::new("~other/x")),
            PathBuf::from("~other/x")
        );
    }

    #[test]
    fn test_filters_and_inputs() {
        let config = config(&["-y", "2023", "-d", "5", "-p", "2", "-t", "ranges"]).unwrap();
        assert_eq!(config.year_filter, Some(2023));
        assert_eq!(config.day_filter, Some(5));
        assert_eq!(config.part_filter, Some(2));
        assert_eq!(config.tags, vec!["ranges"]);
        assert_eq!(
            config.inputs.input_path(2023, 5),
            PathBuf::from("/data/aoc/2023_day05.txt")
        );
    }

    #[test]
    fn test_input_override() {
        let config = config(&["-y", "2023", "-d", "5", "--input", "/tmp/almanac.txt"]).unwrap();
        assert_eq!(
            config.inputs.input_path(2023, 5),
            PathBuf::from("/tmp/almanac.txt")
        );
        assert_eq!(
            config.inputs.input_path(2023, 6),
            PathBuf::from("/data/aoc/2023_day06.txt")
        );
    }

    #[test]
    fn test_thread_count() {
        assert_eq!(config(&["--threads", "3"]).unwrap().thread_count, 3);
        assert!(config(&[]).unwrap().thread_count >= 1);
        assert!(matches!(
            config(&["--threads", "0"]),
            Err(CliError::Config(_))
        ));
    }
}
