//! Regolith Reservoir

use crate::utils::grid::Grid;
use crate::utils::parse_lines;
use anyhow::{anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 14, tags = ["grid", "simulation"])]
pub struct Solver;

pub const SAND_SOURCE: (usize, usize) = (500, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Air,
    Rock,
    Sand,
}

/// Slice of the cave wide enough for sand piling up against the floor
#[derive(Debug, Clone)]
pub struct Cave {
    tiles: Grid<Tile>,
    /// Cave x coordinate of grid column 0
    x_offset: usize,
    /// Lowest rock
    max_y: usize,
}

impl Cave {
    pub fn new(paths: &[Vec<(usize, usize)>]) -> Self {
        let points = || paths.iter().flatten();
        let max_y = points().map(|&(_, y)| y).max().unwrap_or(0);
        let floor = max_y + 2;
        // the sand pile is a triangle of height `floor` around the source
        let min_x = points()
            .map(|&(x, _)| x)
            .chain([SAND_SOURCE.0.saturating_sub(floor + 1)])
            .min()
            .unwrap_or(0);
        let max_x = points()
            .map(|&(x, _)| x)
            .chain([SAND_SOURCE.0 + floor + 1])
            .max()
            .unwrap_or(0);

        let mut tiles = Grid::filled(max_x - min_x + 1, floor + 1, Tile::Air);
        for path in paths {
            for (&(x1, y1), &(x2, y2)) in path.iter().tuple_windows() {
                for x in x1.min(x2)..=x1.max(x2) {
                    for y in y1.min(y2)..=y1.max(y2) {
                        tiles[(x - min_x, y)] = Tile::Rock;
                    }
                }
            }
            if let [(x, y)] = path[..] {
                tiles[(x - min_x, y)] = Tile::Rock;
            }
        }

        Self {
            tiles,
            x_offset: min_x,
            max_y,
        }
    }

    /// Drop one unit of sand, returning where it rests
    ///
    /// `None` when the sand falls past the lowest rock (no floor) or the
    /// source is already blocked.
    fn drop_sand(&mut self, with_floor: bool) -> Option<(usize, usize)> {
        let source = (SAND_SOURCE.0 - self.x_offset, SAND_SOURCE.1);
        if self.tiles[source] != Tile::Air {
            return None;
        }
        let floor = self.max_y + 2;
        let (mut x, mut y) = source;
        loop {
            if !with_floor && y > self.max_y {
                return None;
            }
            if with_floor && y + 1 == floor {
                break;
            }
            let next = [x, x.wrapping_sub(1), x + 1]
                .into_iter()
                .find(|&nx| self.tiles.get((nx, y + 1)) == Some(&Tile::Air));
            match next {
                Some(nx) => (x, y) = (nx, y + 1),
                None => break,
            }
        }
        self.tiles[(x, y)] = Tile::Sand;
        Some((x + self.x_offset, y))
    }

    /// Units of sand that come to rest before the flow stops
    pub fn fill(mut self, with_floor: bool) -> usize {
        std::iter::from_fn(|| self.drop_sand(with_floor)).count()
    }
}

fn parse_point(text: &str) -> anyhow::Result<(usize, usize)> {
    let (x, y) = text
        .trim()
        .split_once(',')
        .ok_or_else(|| anyhow!("expected `x,y`, found {text:?}"))?;
    Ok((x.parse()?, y.parse()?))
}

impl AocParser for Solver {
    type SharedData<'a> = Cave;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let paths = parse_lines(input, |line| {
            let path = line
                .split("->")
                .map(parse_point)
                .collect::<anyhow::Result<Vec<_>>>()?;
            for (a, b) in path.iter().tuple_windows() {
                if a.0 != b.0 && a.1 != b.1 {
                    bail!("diagonal segment {a:?} -> {b:?}");
                }
            }
            Ok(path)
        })?;
        Ok(Cave::new(&paths))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.clone().fill(false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.clone().fill(true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_parts;

    const EXAMPLE: &str = "\
498,4 -> 498,6 -> 496,6
503,4 -> 502,4 -> 502,9 -> 494,9
";

    #[test]
    fn test_example() {
        assert_eq!(solve_parts::<Solver>(EXAMPLE), vec!["24", "93"]);
    }

    #[test]
    fn test_first_grains() {
        let mut cave = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(cave.drop_sand(false), Some((500, 8)));
        assert_eq!(cave.drop_sand(false), Some((499, 8)));
        assert_eq!(cave.drop_sand(false), Some((501, 8)));
    }

    #[test]
    fn test_diagonal_rejected() {
        assert!(matches!(
            Solver::parse("498,4 -> 499,5\n"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_cave() {
        let cave = Cave::new(&[]);
        assert_eq!(cave.clone().fill(false), 0);
        // floor at y = 2 leaves room for a 3 row triangle
        assert_eq!(cave.fill(true), 1 + 3);
    }
}
