//! Dense row-major grid used by the map based puzzles

use super::line_error;
use aoc_solver::ParseError;
use std::ops::{Index, IndexMut};

/// Grid coordinate as `(x, y)`, origin at the top-left corner
pub type Pos = (usize, usize);

/// The four orthogonal directions as `(dx, dy)`: up, right, down, left
pub const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Parse a rectangular block of text, mapping each byte with `cell`
    ///
    /// Blank lines are ignored. Rows of different widths and bytes rejected by
    /// `cell` are parse errors.
    pub fn parse(input: &str, mut cell: impl FnMut(u8) -> Option<T>) -> Result<Self, ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for (line_idx, line) in input.lines().map(str::trim_end).enumerate() {
            if line.is_empty() {
                continue;
            }
            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(line_error(
                        line_idx,
                        format!("expected {} columns, found {}", w, line.len()),
                    ));
                }
                Some(_) => {}
            }
            for (col, byte) in line.bytes().enumerate() {
                let value = cell(byte).ok_or_else(|| {
                    line_error(
                        line_idx,
                        format!("unexpected {:?} in column {}", byte as char, col + 1),
                    )
                })?;
                cells.push(value);
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".to_string()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, (x, y): Pos) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.cells[y * self.width + x])
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let width = self.width;
        (0..self.cells.len()).map(move |i| (i % width, i / width))
    }

    /// First position (row-major) whose cell satisfies `pred`
    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.cells
            .iter()
            .position(|cell| pred(cell))
            .map(|i| (i % self.width, i / self.width))
    }

    /// Move one step from `pos`, or `None` when leaving the grid
    pub fn step(&self, (x, y): Pos, (dx, dy): (isize, isize)) -> Option<Pos> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// Orthogonal neighbours of `pos` that are inside the grid
    pub fn neighbours(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |dir| self.step(pos, dir))
    }

    /// Cells seen walking from `from` (exclusive) towards the edge
    pub fn ray(&self, from: Pos, dir: (isize, isize)) -> impl Iterator<Item = &T> + '_ {
        std::iter::successors(self.step(from, dir), move |&pos| self.step(pos, dir))
            .map(|pos| &self[pos])
    }
}

impl<T: Clone> Grid<T> {
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): Pos) -> &T {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        &self.cells[y * self.width + x]
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, (x, y): Pos) -> &mut T {
        assert!(x < self.width && y < self.height, "({x}, {y}) outside grid");
        &mut self.cells[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(input: &str) -> Result<Grid<u8>, ParseError> {
        Grid::parse(input, |b| b.is_ascii_digit().then(|| b - b'0'))
    }

    #[test]
    fn test_parse_and_index() {
        let grid = digits("123\n456\n").unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid[(0, 0)], 1);
        assert_eq!(grid[(2, 1)], 6);
        assert_eq!(grid.get((3, 0)), None);
        assert_eq!(grid.find(|&c| c == 5), Some((1, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(digits("12\n345"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(digits("1a"), Err(ParseError::InvalidFormat(_))));
        assert!(matches!(digits("\n\n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn test_neighbours_and_ray() {
        let grid = digits("123\n456\n789").unwrap();

        let corner: Vec<_> = grid.neighbours((0, 0)).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);
        assert_eq!(grid.neighbours((1, 1)).count(), 4);

        let right: Vec<_> = grid.ray((0, 1), (1, 0)).copied().collect();
        assert_eq!(right, vec![5, 6]);
        let up: Vec<_> = grid.ray((2, 2), (0, -1)).copied().collect();
        assert_eq!(up, vec![6, 3]);
        assert_eq!(grid.ray((0, 0), (-1, 0)).count(), 0);
    }
}
