//! Rucksack Reorganization

use crate::utils::parse_lines;
use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 3, tags = ["bitset"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let line = line.trim();
            if line.len() % 2 != 0 {
                bail!("rucksack has an odd number of items ({})", line.len());
            }
            if let Some(bad) = line.bytes().find(|b| !b.is_ascii_alphabetic()) {
                bail!("unexpected item {:?}", bad as char);
            }
            Ok(line)
        })
    }
}

/// Priority of an item: `a..=z` map to 1..=26, `A..=Z` to 27..=52
pub fn priority(item: u8) -> u32 {
    match item {
        b'a'..=b'z' => (item - b'a' + 1) as u32,
        b'A'..=b'Z' => (item - b'A' + 27) as u32,
        _ => 0,
    }
}

/// Set of item priorities present in `items`, one bit per priority
fn item_set(items: &str) -> u64 {
    items.bytes().fold(0, |set, item| set | 1 << priority(item))
}

fn single_priority(set: u64) -> Option<u32> {
    (set != 0).then(|| set.trailing_zeros())
}

/// Priority of the item found in both halves of the rucksack
pub fn misplaced_priority(rucksack: &str) -> Option<u32> {
    let (left, right) = rucksack.split_at(rucksack.len() / 2);
    single_priority(item_set(left) & item_set(right))
}

/// Priority of the badge item shared by every rucksack of the group
pub fn badge_priority(group: &[&str]) -> Option<u32> {
    single_priority(group.iter().fold(u64::MAX, |set, r| set & item_set(r)))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .enumerate()
            .map(|(idx, rucksack)| {
                misplaced_priority(rucksack).ok_or_else(|| {
                    SolveError::failed(format!("rucksack {} has no shared item", idx + 1))
                })
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() % 3 != 0 {
            return Err(SolveError::failed(format!(
                "{} rucksacks cannot be split into groups of three",
                shared.len()
            )));
        }
        shared
            .chunks(3)
            .enumerate()
            .map(|(idx, group)| {
                badge_priority(group).ok_or_else(|| {
                    SolveError::failed(format!("group {} has no badge", idx + 1))
                })
            })
            .sum::<Result<u32, _>>()
            .map(|total| total.to_string())
    }
}
