//! Calorie Counting

use crate::utils::parse_blocks;
use anyhow::Context;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 1, tags = ["parsing", "sorting"])]
pub struct Solver;

impl AocParser for Solver {
    /// Total calories carried by each elf, in input order
    type SharedData<'a> = Vec<u64>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_blocks(input, |block| {
            block
                .iter()
                .map(|line| {
                    line.trim()
                        .parse::<u64>()
                        .with_context(|| format!("invalid calorie count {line:?}"))
                })
                .sum()
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_sum(shared, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(top_sum(shared, 3).to_string())
    }
}

/// Sum of the `n` largest totals, or of all of them when fewer exist
pub fn top_sum(totals: &[u64], n: usize) -> u64 {
    let mut sorted = totals.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.iter().take(n).sum()
}
