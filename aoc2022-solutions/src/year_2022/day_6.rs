//! Tuning Trouble

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 6, tags = ["sliding-window", "bitset"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = &'a [u8];

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let stream = input.trim();
        if !stream.is_ascii() {
            return Err(ParseError::InvalidFormat(
                "datastream must be ASCII".to_string(),
            ));
        }
        Ok(stream.as_bytes())
    }
}

/// Number of characters read once the last `size` characters are all distinct
///
/// Returns 0 when the stream holds no such window.
pub fn marker_end(stream: &[u8], size: usize) -> usize {
    stream
        .windows(size)
        .position(|window| {
            let seen = window.iter().fold(0u128, |set, &b| set | 1 << b);
            seen.count_ones() as usize == size
        })
        .map_or(0, |start| start + size)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(marker_end(shared, 4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(marker_end(shared, 14).to_string())
    }
}
