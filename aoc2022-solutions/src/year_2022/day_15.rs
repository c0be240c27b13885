//! Beacon Exclusion Zone

use crate::utils::line_error;
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2022, day = 15, tags = ["geometry", "intervals"])]
pub struct Solver;

pub const TARGET_ROW: i64 = 2_000_000;
pub const SEARCH_BOUND: i64 = 4_000_000;
const FREQUENCY_MULTIPLIER: i64 = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    pub pos: (i64, i64),
    pub beacon: (i64, i64),
    pub radius: i64,
}

fn manhattan(a: (i64, i64), b: (i64, i64)) -> i64 {
    (a.0 - b.0).abs() + (a.1 - b.1).abs()
}

impl Sensor {
    fn new(pos: (i64, i64), beacon: (i64, i64)) -> Self {
        Self {
            pos,
            beacon,
            radius: manhattan(pos, beacon),
        }
    }

    fn covers(&self, point: (i64, i64)) -> bool {
        manhattan(self.pos, point) <= self.radius
    }

    /// Inclusive x range this sensor rules out on `row`
    fn row_span(&self, row: i64) -> Option<(i64, i64)> {
        let half = self.radius - (self.pos.1 - row).abs();
        (half >= 0).then_some((self.pos.0 - half, self.pos.0 + half))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Sensor>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let pattern = Regex::new(
            r"^Sensor at x=(-?\d+), y=(-?\d+): closest beacon is at x=(-?\d+), y=(-?\d+)$",
        )
        .map_err(|e| ParseError::Other(e.to_string()))?;

        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| -> Result<Sensor, ParseError> {
                let caps = pattern
                    .captures(line.trim())
                    .ok_or_else(|| line_error(idx, anyhow!("unrecognised sensor report")))?;
                let num = |i: usize| caps[i].parse::<i64>().map_err(|e| line_error(idx, e));
                Ok(Sensor::new((num(1)?, num(2)?), (num(3)?, num(4)?)))
            })
            .collect()
    }
}

/// Sorted, merged x ranges covered on `row`
pub fn covered_ranges(sensors: &[Sensor], row: i64) -> Vec<(i64, i64)> {
    let mut merged: Vec<(i64, i64)> = Vec::new();
    for (start, end) in sensors.iter().filter_map(|s| s.row_span(row)).sorted() {
        match merged.last_mut() {
            Some(last) if start <= last.1 + 1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Positions on `row` where a beacon cannot be
pub fn excluded_on_row(sensors: &[Sensor], row: i64) -> i64 {
    let covered: i64 = covered_ranges(sensors, row)
        .iter()
        .map(|(start, end)| end - start + 1)
        .sum();
    let beacons: HashSet<(i64, i64)> = sensors
        .iter()
        .map(|s| s.beacon)
        .filter(|b| b.1 == row)
        .collect();
    covered - beacons.len() as i64
}

fn uncovered(sensors: &[Sensor], point: (i64, i64)) -> bool {
    !sensors.iter().any(|s| s.covers(point))
}

/// Points where the lines just outside the sensor diamonds cross each other or the border
fn candidates(sensors: &[Sensor], bound: i64) -> Vec<(i64, i64)> {
    // y - x = a and y + x = b
    let mut rising = HashSet::new();
    let mut falling = HashSet::new();
    for s in sensors {
        let (x, y) = s.pos;
        let reach = s.radius + 1;
        rising.extend([y - x - reach, y - x + reach]);
        falling.extend([y + x - reach, y + x + reach]);
    }

    let mut points = vec![(0, 0), (0, bound), (bound, 0), (bound, bound)];
    for (&a, &b) in rising.iter().cartesian_product(&falling) {
        if (b - a) % 2 == 0 {
            points.push(((b - a) / 2, (a + b) / 2));
        }
    }
    for &a in &rising {
        points.extend([(0, a), (bound, bound + a), (-a, 0), (bound - a, bound)]);
    }
    for &b in &falling {
        points.extend([(0, b), (bound, b - bound), (b, 0), (b - bound, bound)]);
    }
    points
}

/// Row by row sweep, jumping past each sensor's span
fn sweep(sensors: &[Sensor], bound: i64) -> Option<(i64, i64)> {
    for y in 0..=bound {
        let mut x = 0;
        while x <= bound {
            match sensors.iter().find(|s| s.covers((x, y))) {
                Some(s) => x = s.row_span(y).map_or(x, |(_, end)| end) + 1,
                None => return Some((x, y)),
            }
        }
    }
    None
}

/// The only position in `0..=bound` on both axes that no sensor covers
pub fn distress_beacon(sensors: &[Sensor], bound: i64) -> Option<(i64, i64)> {
    let in_bounds = |&(x, y): &(i64, i64)| (0..=bound).contains(&x) && (0..=bound).contains(&y);
    candidates(sensors, bound)
        .into_iter()
        .filter(in_bounds)
        .find(|&p| uncovered(sensors, p))
        .or_else(|| {
            debug!(bound, "no boundary candidate is free, sweeping rows");
            sweep(sensors, bound)
        })
}

pub fn tuning_frequency((x, y): (i64, i64)) -> i64 {
    x * FREQUENCY_MULTIPLIER + y
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(excluded_on_row(shared, TARGET_ROW).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        distress_beacon(shared, SEARCH_BOUND)
            .map(|p| tuning_frequency(p).to_string())
            .ok_or_else(|| SolveError::failed("every position in the search area is covered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
Sensor at x=2, y=18: closest beacon is at x=-2, y=15
Sensor at x=9, y=16: closest beacon is at x=10, y=16
Sensor at x=13, y=2: closest beacon is at x=15, y=3
Sensor at x=12, y=14: closest beacon is at x=10, y=16
Sensor at x=10, y=20: closest beacon is at x=10, y=16
Sensor at x=14, y=17: closest beacon is at x=10, y=16
Sensor at x=8, y=7: closest beacon is at x=2, y=10
Sensor at x=2, y=0: closest beacon is at x=2, y=10
Sensor at x=0, y=11: closest beacon is at x=2, y=10
Sensor at x=20, y=14: closest beacon is at x=25, y=17
Sensor at x=17, y=20: closest beacon is at x=21, y=22
Sensor at x=16, y=7: closest beacon is at x=15, y=3
Sensor at x=14, y=3: closest beacon is at x=15, y=3
Sensor at x=20, y=1: closest beacon is at x=15, y=3
";

    #[test]
    fn test_example_row() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(sensors.len(), 14);
        assert_eq!(sensors[6].radius, 9);
        assert_eq!(excluded_on_row(&sensors, 10), 26);
        assert_eq!(covered_ranges(&sensors, 10), vec![(-2, 24)]);
    }

    #[test]
    fn test_example_beacon() {
        let sensors = Solver::parse(EXAMPLE).unwrap();
        let beacon = distress_beacon(&sensors, 20);
        assert_eq!(beacon, Some((14, 11)));
        assert_eq!(tuning_frequency((14, 11)), 56000011);
        assert_eq!(sweep(&sensors, 20), Some((14, 11)));
    }

    #[test]
    fn test_fully_covered_area() {
        let sensors = [Sensor::new((5, 5), (5, 15))];
        assert_eq!(distress_beacon(&sensors, 4), None);
    }

    #[test]
    fn test_bad_line() {
        let err = Solver::parse("Sensor at x=1, y=2\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }
}
