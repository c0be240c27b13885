//! Rope Bridge

use crate::utils::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 9, tags = ["simulation"])]
pub struct Solver;

/// Head motion: a unit step `(dx, dy)` repeated `count` times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub step: (i32, i32),
    pub count: u32,
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Motion>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (dir, count) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected `<direction> <steps>`"))?;
            let step = match dir {
                "U" => (0, 1),
                "D" => (0, -1),
                "L" => (-1, 0),
                "R" => (1, 0),
                other => bail!("unknown direction {other:?}"),
            };
            Ok(Motion {
                step,
                count: count.parse()?,
            })
        })
    }
}

/// Move `knot` one step towards `leader` if they no longer touch
fn follow(leader: (i32, i32), knot: &mut (i32, i32)) {
    let (dx, dy) = (leader.0 - knot.0, leader.1 - knot.1);
    if dx.abs() > 1 || dy.abs() > 1 {
        knot.0 += dx.signum();
        knot.1 += dy.signum();
    }
}

/// Number of distinct positions visited by the last of `knots` knots
pub fn tail_positions(motions: &[Motion], knots: usize) -> usize {
    let mut rope = vec![(0i32, 0i32); knots.max(1)];
    let mut visited = HashSet::from([(0, 0)]);

    for motion in motions {
        for _ in 0..motion.count {
            rope[0].0 += motion.step.0;
            rope[0].1 += motion.step.1;
            for idx in 1..rope.len() {
                let leader = rope[idx - 1];
                follow(leader, &mut rope[idx]);
            }
            if let Some(&tail) = rope.last() {
                visited.insert(tail);
            }
        }
    }
    visited.len()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(tail_positions(shared, 10).to_string())
    }
}
