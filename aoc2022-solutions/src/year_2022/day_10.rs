//! Cathode-Ray Tube

use crate::utils::parse_lines;
use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 10, tags = ["simulation", "rendering"])]
pub struct Solver;

pub const SCREEN_WIDTH: usize = 40;
pub const SCREEN_HEIGHT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Noop,
    AddX(i64),
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Instruction>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            match line.split_whitespace().collect::<Vec<_>>()[..] {
                ["noop"] => Ok(Instruction::Noop),
                ["addx", value] => Ok(Instruction::AddX(value.parse()?)),
                _ => bail!("unknown instruction {line:?}"),
            }
        })
    }
}

/// Value of the X register during each cycle, starting with cycle 1
pub fn register_trace(program: &[Instruction]) -> Vec<i64> {
    let mut x = 1;
    let mut trace = Vec::with_capacity(program.len() * 2);
    for instruction in program {
        match *instruction {
            Instruction::Noop => trace.push(x),
            Instruction::AddX(value) => {
                trace.extend([x, x]);
                x += value;
            }
        }
    }
    trace
}

/// Sum of `cycle * X` at cycles 20, 60, ..., 220
pub fn signal_strength(trace: &[i64]) -> i64 {
    (20..=220)
        .step_by(40)
        .filter_map(|cycle| trace.get(cycle - 1).map(|&x| cycle as i64 * x))
        .sum()
}

/// Draw the CRT, one line per screen row
///
/// Cycles beyond the end of the program keep the last register value.
pub fn render(trace: &[i64]) -> String {
    let last = trace.last().copied().unwrap_or(1);
    (0..SCREEN_WIDTH * SCREEN_HEIGHT)
        .map(|pixel| {
            let sprite = trace.get(pixel).copied().unwrap_or(last);
            let column = (pixel % SCREEN_WIDTH) as i64;
            if (sprite - column).abs() <= 1 { '#' } else { '.' }
        })
        .chunks(SCREEN_WIDTH)
        .into_iter()
        .map(|row| row.collect::<String>())
        .join("\n")
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(signal_strength(&register_trace(shared)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(render(&register_trace(shared)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_parts;

    const EXAMPLE: &str = "\
addx 15
addx -11
addx 6
addx -3
addx 5
addx -1
addx -8
addx 13
addx 4
noop
addx -1
addx 5
addx -1
addx 5
addx -1
addx 5
addx -1
addx 5
addx -1
addx -35
addx 1
addx 24
addx -19
addx 1
addx 16
addx -11
noop
noop
addx 21
addx -15
noop
noop
addx -3
addx 9
addx 1
addx -3
addx 8
addx 1
addx 5
noop
noop
noop
noop
noop
addx -36
noop
addx 1
addx 7
noop
noop
noop
addx 2
addx 6
noop
noop
noop
noop
noop
addx 1
noop
noop
addx 7
addx 1
noop
addx -13
addx 13
addx 7
noop
addx 1
addx -33
noop
noop
noop
addx 2
noop
noop
noop
addx 8
noop
addx -1
addx 2
addx 1
noop
addx 17
addx -9
addx 1
addx 1
addx -3
addx 11
noop
noop
addx 1
noop
addx 1
noop
noop
addx -13
addx -19
addx 1
addx 3
addx 26
addx -30
addx 12
addx -1
addx 3
addx 1
noop
noop
noop
addx -9
addx 18
addx 1
addx 2
noop
noop
addx 9
noop
noop
noop
addx -1
addx 2
addx -37
addx 1
addx 3
noop
addx 15
addx -21
addx 22
addx -6
addx 1
noop
addx 2
addx 1
noop
addx -10
noop
noop
addx 20
addx 1
addx 2
addx 2
addx -6
addx -11
noop
noop
noop
";

    const EXAMPLE_SCREEN: &str = "\
##..##..##..##..##..##..##..##..##..##..
###...###...###...###...###...###...###.
####....####....####....####....####....
#####.....#####.....#####.....#####.....
######......######......######......####
#######.......#######.......#######.....";

    #[test]
    fn test_example_samples() {
        let program = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(program.len(), 146);
        let trace = register_trace(&program);
        let samples: Vec<i64> = (20..=220).step_by(40).map(|c| trace[c - 1]).collect();
        assert_eq!(samples, vec![21, 19, 18, 21, 16, 18]);
        assert_eq!(signal_strength(&trace), 13140);
    }

    #[test]
    fn test_example() {
        assert_eq!(
            solve_parts::<Solver>(EXAMPLE),
            vec!["13140", EXAMPLE_SCREEN]
        );
    }

    #[test]
    fn test_small_program_trace() {
        let program = Solver::parse("noop\naddx 3\naddx -5\n").unwrap();
        assert_eq!(register_trace(&program), vec![1, 1, 1, 4, 4]);
    }

    #[test]
    fn test_signal_strength_constant_register() {
        let program = vec![Instruction::Noop; 220];
        // X stays 1, so the strength is the sum of the sampled cycles
        assert_eq!(signal_strength(&register_trace(&program)), 720);
    }

    #[test]
    fn test_signal_strength_growing_register() {
        let mut program = Solver::parse(&"addx 1\n".repeat(110)).unwrap();
        let answer = <Solver as PartSolver<1>>::solve(&mut program).unwrap();
        assert_eq!(answer, "57200");
    }

    #[test]
    fn test_render_idle_register() {
        let program = vec![Instruction::Noop; 240];
        let screen = render(&register_trace(&program));
        let row = format!("###{}", ".".repeat(37));
        let expected = vec![row.as_str(); SCREEN_HEIGHT].join("\n");
        assert_eq!(screen, expected);
    }

    #[test]
    fn test_unknown_instruction() {
        assert!(Solver::parse("noop\njmp 4\n").is_err());
    }
}
