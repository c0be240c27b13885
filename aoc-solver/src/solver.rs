//! Solver traits: one parse step, then any number of parts over its output

use crate::error::{ParseError, SolveError};

/// Turns raw puzzle input into the value every part works on
///
/// `SharedData` may borrow from the input (`&'a str`, `&'a [u8]`, structs
/// holding slices) or own everything. Parts receive it mutably, so part 1 can
/// leave a cache behind for part 2.
pub trait AocParser {
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Answer for part `N` of a puzzle
///
/// ```
/// use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .split_whitespace()
///             .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
///             .collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(depths: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let rises = depths.windows(2).filter(|w| w[1] > w[0]).count();
///         Ok(rises.to_string())
///     }
/// }
///
/// let mut depths = Depths::parse("199 200 208 210 200").unwrap();
/// assert_eq!(<Depths as PartSolver<1>>::solve(&mut depths).unwrap(), "3");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Part dispatch for a whole puzzle
///
/// Normally derived with `#[derive(AocSolver)]` and `#[aoc_solver(max_parts = N)]`,
/// which routes part `k` to `PartSolver<k>`. A hand-written impl should
/// return [`SolveError::PartNotImplemented`] for parts it does not know.
pub trait Solver: AocParser {
    const PARTS: u8;

    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked entry point used by solver instances
pub trait SolverExt: Solver {
    /// Reject `part == 0` and `part > PARTS` before dispatching
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if part == 0 || part > Self::PARTS {
            return Err(SolveError::PartOutOfRange(part));
        }
        Self::solve_part(shared, part)
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
