use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2015, day = 24, tags = ["test", "combined"])]
struct CombinedMacroSolver;

impl AocParser for CombinedMacroSolver {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect()
    }
}

impl PartSolver<1> for CombinedMacroSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for CombinedMacroSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2015, day = 25)]
struct UntaggedSolver;

impl AocParser for UntaggedSolver {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for UntaggedSolver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("done".to_string())
    }
}

#[test]
fn test_plugins_auto_register() {
    let registry = SolverRegistryBuilder::new()
        .register_all_plugins()
        .expect("Failed to register plugins")
        .build();

    let mut solver = registry
        .create_solver(2015, 24, "5\n6\n7")
        .expect("Failed to create solver - was it registered?");

    assert_eq!(solver.parts(), 2);
    assert_eq!(solver.solve(1).unwrap().answer, "18");
    assert_eq!(solver.solve(2).unwrap().answer, "210");

    let info = registry.get_info(2015, 25).expect("untagged solver registered");
    assert_eq!(info.parts, 1);
}

#[test]
fn test_plugins_filtered_by_tag() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"combined"))
        .expect("Failed to register plugins")
        .build();

    assert!(registry.contains(2015, 24));
    assert!(!registry.contains(2015, 25));
}
