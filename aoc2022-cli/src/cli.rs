//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Run every solver one after another, in order
    Sequential,
    /// One task per year; days and parts of a year run in order
    Year,
    /// One task per day; parts of a day run in order (default)
    #[default]
    Day,
    /// One task per day, with its parts solved concurrently
    Part,
}

/// Advent of Code 2022 solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc2022", about = "Run the Advent of Code 2022 solvers", version)]
pub struct Args {
    /// Year to run (runs all registered years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying every one of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding `{year}/dayNN.txt` puzzle inputs
    #[arg(long, env = "AOC_INPUT_DIR", default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Log debug events to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}
