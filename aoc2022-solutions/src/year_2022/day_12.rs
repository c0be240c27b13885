//! Hill Climbing Algorithm

use crate::utils::grid::{Grid, Pos};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::VecDeque;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 12, tags = ["grid", "bfs"])]
pub struct Solver;

#[derive(Debug)]
pub struct HeightMap {
    /// Elevation 0..=25 for `a..=z`
    pub heights: Grid<u8>,
    pub start: Pos,
    pub end: Pos,
    /// Steps needed to reach `end` from each square, filled by the first part solved
    distances: Option<Grid<Option<u32>>>,
}

impl AocParser for Solver {
    type SharedData<'a> = HeightMap;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let raw = Grid::parse(input, |b| matches!(b, b'a'..=b'z' | b'S' | b'E').then_some(b))?;
        let start = raw
            .find(|&b| b == b'S')
            .ok_or_else(|| ParseError::MissingData("start square `S`".to_string()))?;
        let end = raw
            .find(|&b| b == b'E')
            .ok_or_else(|| ParseError::MissingData("target square `E`".to_string()))?;

        let mut heights = Grid::filled(raw.width(), raw.height(), 0);
        for pos in raw.positions() {
            heights[pos] = match raw[pos] {
                b'S' => 0,
                b'E' => 25,
                b => b - b'a',
            };
        }

        Ok(HeightMap {
            heights,
            start,
            end,
            distances: None,
        })
    }
}

/// Breadth-first search backwards from `end`
///
/// A step from `a` to `b` is allowed when `b` is at most one higher than
/// `a`, so walking backwards may descend at most one.
pub fn distances_to(heights: &Grid<u8>, end: Pos) -> Grid<Option<u32>> {
    let mut distances = Grid::filled(heights.width(), heights.height(), None);
    let mut queue = VecDeque::from([end]);
    distances[end] = Some(0);

    while let Some(pos) = queue.pop_front() {
        let Some(dist) = distances[pos] else { continue };
        for next in heights.neighbours(pos) {
            if distances[next].is_none() && heights[next] + 1 >= heights[pos] {
                distances[next] = Some(dist + 1);
                queue.push_back(next);
            }
        }
    }
    distances
}

fn distances(map: &mut HeightMap) -> &Grid<Option<u32>> {
    let HeightMap {
        heights,
        end,
        distances,
        ..
    } = map;
    distances.get_or_insert_with(|| distances_to(heights, *end))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = shared.start;
        distances(shared)[start]
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no path from `S` to `E`"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let lowest: Vec<Pos> = shared
            .heights
            .positions()
            .filter(|&pos| shared.heights[pos] == 0)
            .collect();
        let distances = distances(shared);
        lowest
            .into_iter()
            .filter_map(|pos| distances[pos])
            .min()
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no lowest square reaches `E`"))
    }
}
