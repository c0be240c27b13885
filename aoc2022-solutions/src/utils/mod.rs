//! Parsing helpers shared by the daily solvers

pub mod grid;

use aoc_solver::ParseError;
use itertools::Itertools;
use std::fmt::Display;

/// Build an `InvalidFormat` error tagged with a 1-based line number
pub fn line_error(line_idx: usize, err: impl Display) -> ParseError {
    ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, err))
}

/// Parse every non-blank line with `f`
///
/// Trailing whitespace is stripped before `f` sees the line. The first
/// failure is returned with its line number attached.
pub fn parse_lines<'a, T>(
    input: &'a str,
    mut f: impl FnMut(&'a str) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| f(line.trim_end()).map_err(|e| line_error(line_idx, e)))
        .collect()
}

/// Parse every blank-line separated block with `f`
///
/// Blocks are handed over as their lines, so CRLF input splits the same way
/// as LF input.
pub fn parse_blocks<'a, T>(
    input: &'a str,
    mut f: impl FnMut(&[&'a str]) -> anyhow::Result<T>,
) -> Result<Vec<T>, ParseError> {
    input
        .lines()
        .chunk_by(|line| line.trim().is_empty())
        .into_iter()
        .filter(|(blank, _)| !blank)
        .map(|(_, block)| block.collect::<Vec<_>>())
        .enumerate()
        .map(|(block_idx, block)| {
            f(&block).map_err(|e| {
                ParseError::InvalidFormat(format!("(block {}) {}", block_idx + 1, e))
            })
        })
        .collect()
}

/// Parse and solve every part of `S` against one shared data value
#[cfg(test)]
pub(crate) fn solve_parts<S: aoc_solver::Solver>(input: &str) -> Vec<String> {
    let mut shared = S::parse(input).expect("input should parse");
    (1..=S::PARTS)
        .map(|part| S::solve_part(&mut shared, part).expect("part should solve"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_parse_lines_skips_blank_and_reports_line() {
        let parsed = parse_lines("1\n\n2  \n3", |l| Ok(l.parse::<u8>()?)).unwrap();
        assert_eq!(parsed, vec![1, 2, 3]);

        let err = parse_lines("1\n2\nx", |l| l.parse::<u8>().context("not a number"))
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(line 3) not a number".to_string())
        );
    }

    #[test]
    fn test_parse_blocks() {
        let blocks = parse_blocks("a\nb\n\nc\n\n\nd\n", |b| Ok(b.len())).unwrap();
        assert_eq!(blocks, vec![2, 1, 1]);
    }

    #[test]
    fn test_parse_blocks_crlf() {
        let blocks = parse_blocks("a\r\nb\r\n\r\nc\r\n", |b| Ok(b.to_vec())).unwrap();
        assert_eq!(blocks, vec![vec!["a", "b"], vec!["c"]]);

        let err = parse_blocks("a\r\n\r\nb", |b| {
            anyhow::ensure!(b[0] == "a", "unexpected {:?}", b[0]);
            Ok(())
        })
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat("(block 2) unexpected \"b\"".to_string())
        );
    }
}
