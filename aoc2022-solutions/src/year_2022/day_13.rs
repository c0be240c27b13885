//! Distress Signal

use crate::utils::line_error;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 13, tags = ["parsing", "recursion"])]
pub struct Solver;

#[derive(Debug, Clone, Eq)]
pub enum Packet {
    Integer(u32),
    List(Vec<Packet>),
}

impl Ord for Packet {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Packet::Integer(a), Packet::Integer(b)) => a.cmp(b),
            (Packet::List(a), Packet::List(b)) => a.cmp(b),
            (Packet::Integer(a), Packet::List(b)) => {
                std::slice::from_ref(&Packet::Integer(*a)).cmp(b.as_slice())
            }
            (Packet::List(a), Packet::Integer(b)) => {
                a.as_slice().cmp(std::slice::from_ref(&Packet::Integer(*b)))
            }
        }
    }
}

impl PartialOrd for Packet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// `[1]` and `1` compare equal, so equality must follow the ordering
impl PartialEq for Packet {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Packet::Integer(v) => write!(f, "{v}"),
            Packet::List(items) => {
                f.write_str("[")?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Deepest list nesting accepted by the parser
pub const MAX_DEPTH: usize = 256;

struct PacketParser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl PacketParser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> anyhow::Result<()> {
        match self.peek() {
            Some(b) if b == byte => {
                self.pos += 1;
                Ok(())
            }
            found => bail!(
                "expected {:?} at column {}, found {:?}",
                byte as char,
                self.pos + 1,
                found.map(char::from)
            ),
        }
    }

    fn packet(&mut self) -> anyhow::Result<Packet> {
        match self.peek() {
            Some(b'[') => self.list(),
            Some(b) if b.is_ascii_digit() => self.integer(),
            found => bail!(
                "unexpected {:?} at column {}",
                found.map(char::from),
                self.pos + 1
            ),
        }
    }

    fn list(&mut self) -> anyhow::Result<Packet> {
        if self.depth == MAX_DEPTH {
            bail!("lists nested deeper than {MAX_DEPTH} at column {}", self.pos + 1);
        }
        self.expect(b'[')?;
        self.depth += 1;
        let mut items = Vec::new();
        if self.peek() != Some(b']') {
            loop {
                items.push(self.packet()?);
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    _ => break,
                }
            }
        }
        self.expect(b']')?;
        self.depth -= 1;
        Ok(Packet::List(items))
    }

    fn integer(&mut self) -> anyhow::Result<Packet> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        let digits = std::str::from_utf8(&self.bytes[start..self.pos])?;
        Ok(Packet::Integer(digits.parse()?))
    }
}

impl FromStr for Packet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = PacketParser {
            bytes: s.trim().as_bytes(),
            pos: 0,
            depth: 0,
        };
        let packet = parser.list()?;
        if parser.pos != parser.bytes.len() {
            return Err(anyhow!("trailing data at column {}", parser.pos + 1));
        }
        Ok(packet)
    }
}

impl AocParser for Solver {
    /// Every packet in input order, pairs are consecutive elements
    type SharedData<'a> = Vec<Packet>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let packets = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| line.parse::<Packet>().map_err(|e| line_error(idx, e)))
            .collect::<Result<Vec<_>, _>>()?;
        if packets.len() % 2 != 0 {
            return Err(ParseError::MissingData(
                "last packet has no partner".to_string(),
            ));
        }
        Ok(packets)
    }
}

pub fn in_order(left: &Packet, right: &Packet) -> bool {
    left <= right
}

/// Sum of the 1-based indices of the pairs that are in order
pub fn ordered_pairs_sum(packets: &[Packet]) -> usize {
    packets
        .chunks_exact(2)
        .enumerate()
        .filter(|(_, pair)| in_order(&pair[0], &pair[1]))
        .map(|(idx, _)| idx + 1)
        .sum()
}

/// 1-based positions of `[[2]]` and `[[6]]` once both are sorted in with `packets`
pub fn divider_positions(packets: &[Packet]) -> (usize, usize) {
    let divider = |v| Packet::List(vec![Packet::List(vec![Packet::Integer(v)])]);
    let (first, second) = (divider(2), divider(6));
    let before = |d: &Packet| packets.iter().filter(|p| *p < d).count();
    (before(&first) + 1, before(&second) + 2)
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(ordered_pairs_sum(shared).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (first, second) = divider_positions(shared);
        Ok((first * second).to_string())
    }
}
