//! Rock Paper Scissors

use crate::utils::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 2, tags = ["parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rock = 0,
    Paper = 1,
    Scissors = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Lose = 0,
    Draw = 1,
    Win = 2,
}

impl Shape {
    fn from_index(idx: u8) -> Self {
        match idx % 3 {
            0 => Shape::Rock,
            1 => Shape::Paper,
            _ => Shape::Scissors,
        }
    }

    pub fn score(self) -> u32 {
        self as u32 + 1
    }

    /// Outcome of playing `self` against `opponent`
    pub fn against(self, opponent: Shape) -> Outcome {
        match (3 + self as u8 - opponent as u8) % 3 {
            0 => Outcome::Draw,
            1 => Outcome::Win,
            _ => Outcome::Lose,
        }
    }

    /// The shape to play against `self` to reach `outcome`
    pub fn for_outcome(self, outcome: Outcome) -> Shape {
        // Lose is one step back, win one step forward
        Shape::from_index(self as u8 + outcome as u8 + 2)
    }
}

impl Outcome {
    pub fn score(self) -> u32 {
        self as u32 * 3
    }
}

/// Opponent column and the raw second column (0, 1 or 2 for X, Y, Z)
pub type Round = (Shape, u8);

impl AocParser for Solver {
    type SharedData<'a> = Vec<Round>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let (opponent, second) = line
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected two columns"))?;
            let opponent = match opponent {
                "A" => Shape::Rock,
                "B" => Shape::Paper,
                "C" => Shape::Scissors,
                other => bail!("unknown opponent shape {other:?}"),
            };
            let second = match second {
                "X" => 0,
                "Y" => 1,
                "Z" => 2,
                other => bail!("unknown second column {other:?}"),
            };
            Ok((opponent, second))
        })
    }
}

/// Score of one round when the second column names our shape
pub fn score_as_shape(&(opponent, second): &Round) -> u32 {
    let me = Shape::from_index(second);
    me.score() + me.against(opponent).score()
}

/// Score of one round when the second column names the outcome
pub fn score_as_outcome(&(opponent, second): &Round) -> u32 {
    let outcome = match second {
        0 => Outcome::Lose,
        1 => Outcome::Draw,
        _ => Outcome::Win,
    };
    opponent.for_outcome(outcome).score() + outcome.score()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(score_as_shape).sum::<u32>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(score_as_outcome).sum::<u32>().to_string())
    }
}
