//! Supply Stacks

use crate::utils::line_error;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 5, tags = ["simulation", "parsing"])]
pub struct Solver;

/// One rearrangement step, stack indices are 0-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub count: usize,
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrateMover {
    /// Moves one crate at a time
    Model9000,
    /// Moves the whole pile at once, keeping its order
    Model9001,
}

#[derive(Debug, Clone)]
pub struct SharedData {
    /// Crates of each stack, bottom first
    pub stacks: Vec<Vec<u8>>,
    pub moves: Vec<Move>,
}

fn parse_drawing(drawing: &[&str]) -> Result<Vec<Vec<u8>>, ParseError> {
    let mut rows = drawing.iter().filter(|l| !l.trim().is_empty()).rev();
    let labels = rows
        .next()
        .ok_or_else(|| ParseError::MissingData("stack drawing".to_string()))?;
    let stack_count = labels.split_whitespace().count();
    if stack_count == 0 {
        return Err(ParseError::InvalidFormat("no stack labels".to_string()));
    }

    let mut stacks = vec![Vec::new(); stack_count];
    for (row_idx, row) in rows.enumerate() {
        for (col, &byte) in row.as_bytes().iter().enumerate().skip(1).step_by(4) {
            if byte == b' ' {
                continue;
            }
            let stack = col / 4;
            if !byte.is_ascii_alphabetic() || stack >= stack_count {
                return Err(ParseError::InvalidFormat(format!(
                    "unexpected crate {:?} in drawing row {} from the bottom",
                    byte as char,
                    row_idx + 1
                )));
            }
            stacks[stack].push(byte);
        }
    }
    Ok(stacks)
}

fn parse_move(line: &str, stack_count: usize) -> anyhow::Result<Move> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let ["move", count, "from", from, "to", to] = words[..] else {
        bail!("expected `move N from A to B`, found {line:?}");
    };
    let stack = |label: &str| -> anyhow::Result<usize> {
        let idx: usize = label.parse()?;
        (1..=stack_count)
            .contains(&idx)
            .then_some(idx - 1)
            .ok_or_else(|| anyhow!("stack {idx} does not exist"))
    };
    Ok(Move {
        count: count.parse()?,
        from: stack(from)?,
        to: stack(to)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input.lines().collect();
        let split = lines
            .iter()
            .position(|line| line.trim().is_empty())
            .ok_or_else(|| ParseError::MissingData("blank line after the drawing".to_string()))?;
        let (drawing, moves) = lines.split_at(split);
        let stacks = parse_drawing(drawing)?;
        let moves = moves
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                parse_move(line, stacks.len()).map_err(|e| line_error(split + idx, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SharedData { stacks, moves })
    }
}

/// Apply every move to a copy of `stacks` and read the top crate of each stack
pub fn rearrange(
    stacks: &[Vec<u8>],
    moves: &[Move],
    mover: CrateMover,
) -> Result<String, SolveError> {
    let mut stacks = stacks.to_vec();
    for (idx, mv) in moves.iter().enumerate() {
        let source = &mut stacks[mv.from];
        if mv.count > source.len() {
            return Err(SolveError::failed(format!(
                "move {} takes {} crates from stack {} holding {}",
                idx + 1,
                mv.count,
                mv.from + 1,
                source.len()
            )));
        }
        let mut pile = source.split_off(source.len() - mv.count);
        if mover == CrateMover::Model9000 {
            pile.reverse();
        }
        stacks[mv.to].extend(pile);
    }

    Ok(stacks
        .iter()
        .filter_map(|stack| stack.last().map(|&c| c as char))
        .collect())
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(&shared.stacks, &shared.moves, CrateMover::Model9000)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        rearrange(&shared.stacks, &shared.moves, CrateMover::Model9001)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_parts;

    const EXAMPLE: &str = concat!(
        "    [D]    \n",
        "[N] [C]    \n",
        "[Z] [M] [P]\n",
        " 1   2   3 \n",
        "\n",
        "move 1 from 2 to 1\n",
        "move 3 from 1 to 3\n",
        "move 2 from 2 to 1\n",
        "move 1 from 1 to 2\n",
    );

    #[test]
    fn test_parse_drawing() {
        let shared = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(
            shared.stacks,
            vec![b"ZN".to_vec(), b"MCD".to_vec(), b"P".to_vec()]
        );
        assert_eq!(
            shared.moves[0],
            Move {
                count: 1,
                from: 1,
                to: 0
            }
        );
    }

    #[test]
    fn test_example() {
        assert_eq!(solve_parts::<Solver>(EXAMPLE), vec!["CMZ", "MCD"]);
    }

    #[test]
    fn test_unknown_stack_reports_input_line() {
        let input = EXAMPLE.replace("move 2 from 2 to 1", "move 2 from 2 to 4");
        assert_eq!(
            Solver::parse(&input).unwrap_err(),
            ParseError::InvalidFormat("(line 8) stack 4 does not exist".to_string())
        );
    }

    #[test]
    fn test_over_move_is_solve_error() {
        let input = EXAMPLE.replace("move 3 from 1 to 3", "move 5 from 1 to 3");
        let mut shared = Solver::parse(&input).unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut shared).is_err());
    }

    #[test]
    fn test_empty_stack_is_skipped() {
        let stacks = vec![b"A".to_vec(), b"B".to_vec()];
        let moves = [Move {
            count: 1,
            from: 0,
            to: 1,
        }];
        assert_eq!(
            rearrange(&stacks, &moves, CrateMover::Model9001).unwrap(),
            "A"
        );
    }

    #[test]
    fn test_crlf_input() {
        let crlf = EXAMPLE.replace('\n', "\r\n");
        assert_eq!(solve_parts::<Solver>(&crlf), vec!["CMZ", "MCD"]);
    }
}
