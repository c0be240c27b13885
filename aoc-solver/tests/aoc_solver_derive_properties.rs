//! Property-based tests for the AocSolver derive macro and the dynamic solver

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverInstance,
};
use proptest::prelude::*;

#[derive(Debug)]
struct Words<'a> {
    words: Vec<&'a str>,
    longest: Option<usize>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct WordSolver;

impl AocParser for WordSolver {
    type SharedData<'a> = Words<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.is_empty() {
            return Err(ParseError::MissingData("no words".into()));
        }
        Ok(Words {
            words,
            longest: None,
        })
    }
}

impl PartSolver<1> for WordSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let longest = shared.words.iter().map(|w| w.len()).max().unwrap_or(0);
        shared.longest = Some(longest);
        Ok(longest.to_string())
    }
}

impl PartSolver<2> for WordSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let longest = shared
            .longest
            .ok_or_else(|| SolveError::failed("part 1 must run first"))?;
        let count = shared.words.iter().filter(|w| w.len() == longest).count();
        Ok(count.to_string())
    }
}

fn word_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 1..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Solver::solve_part(k) gives the same answer as PartSolver<k>::solve
    #[test]
    fn solve_part_dispatches_to_part_solver(words in word_strategy()) {
        let input = words.join(" ");
        let mut via_solver = WordSolver::parse(&input).unwrap();
        let mut direct = WordSolver::parse(&input).unwrap();

        prop_assert_eq!(
            WordSolver::solve_part(&mut via_solver, 1).unwrap(),
            <WordSolver as PartSolver<1>>::solve(&mut direct).unwrap()
        );
    }

    /// Part numbers outside 1..=PARTS are PartNotImplemented in solve_part
    #[test]
    fn invalid_part_returns_not_implemented(invalid_part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = WordSolver::parse("a bb ccc").unwrap();

        match WordSolver::solve_part(&mut shared, invalid_part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, invalid_part),
            other => prop_assert!(false, "Expected PartNotImplemented, got {:?}", other),
        }
    }

    /// Data written by part 1 is visible to part 2 through a DynSolver
    #[test]
    fn dyn_solver_shares_state_between_parts(words in word_strategy()) {
        let input = words.join("\n");
        let longest = words.iter().map(String::len).max().unwrap();
        let expected = words.iter().filter(|w| w.len() == longest).count();

        let mut solver = SolverInstance::<WordSolver>::new(2022, 1, &input).unwrap();
        prop_assert_eq!(solver.solve(1).unwrap().answer, longest.to_string());
        prop_assert_eq!(solver.solve(2).unwrap().answer, expected.to_string());
    }
}

#[test]
fn test_part2_without_part1_fails() {
    let mut solver = SolverInstance::<WordSolver>::new(2022, 1, "one two").unwrap();
    assert!(matches!(solver.solve(2), Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_dyn_solver_metadata_and_timing() {
    let mut solver = SolverInstance::<WordSolver>::new(2022, 7, "alpha beta").unwrap();
    assert_eq!(solver.year(), 2022);
    assert_eq!(solver.day(), 7);
    assert_eq!(solver.parts(), 2);
    assert!(solver.parse_end() >= solver.parse_start());

    let result = solver.solve(1).unwrap();
    assert!(result.duration() >= chrono::TimeDelta::zero());
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn test_parse_failure() {
    let result = SolverInstance::<WordSolver>::new(2022, 1, "   \n");
    assert!(matches!(result, Err(ParseError::MissingData(_))));
}
