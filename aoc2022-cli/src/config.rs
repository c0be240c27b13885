//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
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
    /// Tags every selected solver must carry
    pub tags: Vec<String>,
    /// Root of the puzzle input tree, `~` already expanded
    pub input_dir: PathBuf,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config(
                    "--threads must be at least 1".to_string(),
                ));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        let tags = args
            .tags
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags,
            input_dir: expand_tilde(&args.input_dir),
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Expand a leading `~` to the home directory
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
        let args = Args::try_parse_from(std::iter::once("aoc2022").chain(args.iter().copied()))
            .expect("arguments should parse");
        Config::from_args(args)
    }

    #[test]
    fn test_expand_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_tilde(Path::new("~/inputs")), home.join("inputs"));
        assert_eq!(expand_tilde(Path::new("~")), home);
        assert_eq!(expand_tilde(Path::new("inputs/~")), PathBuf::from("inputs/~"));
        assert_eq!(expand_tilde(Path::new("/abs")), PathBuf::from("/abs"));
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

    #[test]
    fn test_blank_tags_dropped() {
        let cfg = config(&["--tags", "grid, ,bfs "]).unwrap();
        assert_eq!(cfg.tags, vec!["grid", "bfs"]);
    }

    #[test]
    fn test_verbosity_flags() {
        let cfg = config(&["--verbose"]).unwrap();
        assert!(cfg.verbose);
        assert!(!cfg.quiet);
        assert!(!config(&[]).unwrap().verbose);
    }
}
