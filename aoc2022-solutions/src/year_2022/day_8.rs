//! Treetop Tree House

use crate::utils::grid::{DIRECTIONS, Grid, Pos};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 8, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u8>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input, |b| b.is_ascii_digit().then(|| b - b'0'))
    }
}

/// Whether the tree at `pos` can be seen from outside along some row or column
pub fn is_visible(trees: &Grid<u8>, pos: Pos) -> bool {
    let height = trees[pos];
    DIRECTIONS
        .into_iter()
        .any(|dir| trees.ray(pos, dir).all(|&other| other < height))
}

/// Product of the viewing distances in the four directions
pub fn scenic_score(trees: &Grid<u8>, pos: Pos) -> usize {
    let height = trees[pos];
    DIRECTIONS
        .into_iter()
        .map(|dir| {
            let mut distance = 0;
            for &other in trees.ray(pos, dir) {
                distance += 1;
                if other >= height {
                    break;
                }
            }
            distance
        })
        .product()
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let trees: &Grid<u8> = shared;
        let visible = trees
            .positions()
            .filter(|&pos| is_visible(trees, pos))
            .count();
        Ok(visible.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let trees: &Grid<u8> = shared;
        let best = trees
            .positions()
            .map(|pos| scenic_score(trees, pos))
            .max()
            .unwrap_or(0);
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::solve_parts;

    const EXAMPLE: &str = "\
30373
25512
65332
33549
35390
";

    #[test]
    fn test_example() {
        assert_eq!(solve_parts::<Solver>(EXAMPLE), vec!["21", "8"]);
    }

    #[test]
    fn test_scenic_scores() {
        let trees = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(scenic_score(&trees, (2, 1)), 4);
        assert_eq!(scenic_score(&trees, (2, 3)), 8);
        assert_eq!(scenic_score(&trees, (0, 0)), 0);
    }

    #[test]
    fn test_edges_are_visible() {
        let trees = Solver::parse(EXAMPLE).unwrap();
        assert!(is_visible(&trees, (0, 2)));
        assert!(is_visible(&trees, (4, 4)));
        assert!(!is_visible(&trees, (3, 1)));
    }
}
