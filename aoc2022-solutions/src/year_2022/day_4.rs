//! Camp Cleanup

use crate::utils::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 4, tags = ["ranges"])]
pub struct Solver;

pub type Assignment = RangeInclusive<u32>;

fn parse_range(text: &str) -> anyhow::Result<Assignment> {
    let (start, end) = text
        .split_once('-')
        .ok_or_else(|| anyhow!("expected a range, found {text:?}"))?;
    let (start, end): (u32, u32) = (start.parse()?, end.parse()?);
    if start > end {
        bail!("range {start}-{end} is reversed");
    }
    Ok(start..=end)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(Assignment, Assignment)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (left, right) = line
                .trim()
                .split_once(',')
                .ok_or_else(|| anyhow!("expected two comma separated ranges"))?;
            Ok((parse_range(left)?, parse_range(right)?))
        })
    }
}

/// Whether one of the two ranges covers the other entirely
pub fn fully_contains(a: &Assignment, b: &Assignment) -> bool {
    (a.start() <= b.start() && b.end() <= a.end()) || (b.start() <= a.start() && a.end() <= b.end())
}

pub fn overlaps(a: &Assignment, b: &Assignment) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|(a, b)| fully_contains(a, b)).count();
        Ok(count.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let count = shared.iter().filter(|(a, b)| overlaps(a, b)).count();
        Ok(count.to_string())
    }
}
