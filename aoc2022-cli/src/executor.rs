//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Result from a single part
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    pub solve_duration: TimeDelta,
    /// Set on the first part solved from each parsed instance
    pub parse_duration: Option<TimeDelta>,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            solve_duration: TimeDelta::zero(),
            parse_duration: None,
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    context: ExecutionContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs, shared by reference across the pool
struct ExecutionContext {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: ExecutionContext {
                registry,
                inputs: InputStore::new(config.input_dir.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputStore {
        &self.context.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.context;
        ctx.registry
            .iter_info()
            .filter(|info| ctx.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| ctx.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(ctx.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        debug!(
            items = work_items.len(),
            mode = ?self.context.parallelize_by,
            threads = self.thread_pool.current_num_threads(),
            "starting execution"
        );

        match self.context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_guarded(&work, &tx, &self.context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part differs from Day inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singles = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(singles, &tx)
            }
        }
    }

    /// Run each group on the pool, items inside a group in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let ctx = &self.context;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_guarded(&work, tx, ctx) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce_with(|left, right| match (left, right) {
                    (Some(l), Some(r)) => Some(ArcExecutorError::combine(l, r)),
                    (l, r) => l.or(r),
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

/// Parts of a solver selected by the part filter
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

/// Run one work item, turning a panic into an executor error
fn run_guarded(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    catch_unwind(AssertUnwindSafe(|| run_work_item(work, tx, ctx))).unwrap_or_else(|_| {
        Err(ExecutorError::WorkerPanic {
            year: work.year,
            day: work.day,
        }
        .into())
    })
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Send the same failure for every part of a work item
fn send_failure(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    error: ArcExecutorError,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
    }
    Ok(())
}

fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let input = match ctx.inputs.load(year, day) {
        Ok(input) => input,
        Err(source) => {
            warn!(year, day, error = %source, "input unavailable");
            let error = ExecutorError::InputUnavailable { year, day, source }.into();
            return send_failure(work, tx, error);
        }
    };

    if ctx.parallelize_by == ParallelizeBy::Part {
        run_parts_parallel(work, &input, tx, ctx)
    } else {
        run_parts_in_order(work, &input, tx, ctx)
    }
}

/// Parse once and solve the parts in order against the shared data
fn run_parts_in_order(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let mut solver = match ctx.registry.create_solver(work.year, work.day, input) {
        Ok(solver) => solver,
        Err(e) => return send_failure(work, tx, ExecutorError::Solver(e).into()),
    };

    let mut parse_duration = Some(solver.parse_duration());
    for part in work.parts.clone() {
        let mut result = solve_part(&mut *solver, part);
        result.parse_duration = parse_duration.take();
        send(tx, result)?;
    }
    Ok(())
}

/// Solve parts concurrently, each from its own parsed instance
///
/// Results are sent in part order once all parts finish.
fn run_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    ctx: &ExecutionContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);
    let results: Vec<SolverResult> = work
        .parts
        .clone()
        .into_par_iter()
        .map(|part| match ctx.registry.create_solver(year, day, input) {
            Ok(mut solver) => {
                let mut result = solve_part(&mut *solver, part);
                result.parse_duration = Some(solver.parse_duration());
                result
            }
            Err(e) => SolverResult::failed(year, day, part, ExecutorError::Solver(e).into()),
        })
        .collect();

    results.into_iter().try_for_each(|result| send(tx, result))
}

fn solve_part(solver: &mut dyn DynSolver, part: u8) -> SolverResult {
    let (year, day) = (solver.year(), solver.day());
    match solver.solve(part) {
        Ok(solved) => {
            debug!(year, day, part, duration = %solved.duration(), "solved");
            SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration(),
                answer: Ok(solved.answer),
                parse_duration: None,
            }
        }
        Err(e) => SolverResult::failed(year, day, part, ExecutorError::Solver(e.into()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
    use clap::Parser;
    use std::fs;
    use std::sync::mpsc;
    use tempfile::TempDir;

    /// Sums the numbers on part 1, counts them on part 2, fails on zero
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Numbers;

    impl AocParser for Numbers {
        type SharedData<'a> = Vec<u64>;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            input
                .split_whitespace()
                .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.to_string())))
                .collect()
        }
    }

    impl PartSolver<1> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<u64>().to_string())
        }
    }

    impl PartSolver<2> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            if shared.contains(&0) {
                return Err(SolveError::failed("zero"));
            }
            Ok(shared.len().to_string())
        }
    }

    fn executor(dir: &TempDir, extra: &[&str]) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register::<Numbers>(2022, 1)
            .and_then(|b| b.register::<Numbers>(2022, 2))
            .and_then(|b| b.register::<Numbers>(2023, 1))
            .unwrap()
            .build();
        let dir_arg = dir.path().to_string_lossy().into_owned();
        let args = Args::try_parse_from(
            ["aoc2022", "--input-dir", dir_arg.as_str(), "--threads", "2"]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap();
        Executor::new(registry, &Config::from_args(args).unwrap()).unwrap()
    }

    fn write_input(dir: &TempDir, year: u16, day: u8, content: &str) {
        let path = InputStore::new(dir.path().to_path_buf()).path(year, day);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn run(executor: &Executor) -> (Result<(), ArcExecutorError>, Vec<SolverResult>) {
        let (tx, rx) = mpsc::channel();
        let outcome = executor.execute(tx);
        let mut results: Vec<SolverResult> = rx.into_iter().collect();
        results.sort_by_key(|r| (r.year, r.day, r.part));
        (outcome, results)
    }

    #[test]
    fn test_work_item_filters() {
        let dir = TempDir::new().unwrap();
        let items = executor(&dir, &[]).collect_work_items();
        assert_eq!(items.len(), 3);

        let items = executor(&dir, &["--year", "2022", "--part", "2"]).collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2022, day: 1, parts: 2..=2 },
                WorkItem { year: 2022, day: 2, parts: 2..=2 },
            ]
        );
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_every_mode_reports_the_same_answers() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2022, 1, "1 2 3");
        write_input(&dir, 2022, 2, "4 0");
        write_input(&dir, 2023, 1, "10");

        for mode in ["sequential", "year", "day", "part"] {
            let (outcome, results) = run(&executor(&dir, &["--parallelize-by", mode]));
            assert!(outcome.is_ok(), "{mode}");
            let answers: Vec<Option<String>> =
                results.iter().map(|r| r.answer.as_ref().ok().cloned()).collect();
            assert_eq!(
                answers,
                vec![
                    Some("6".to_string()),
                    Some("3".to_string()),
                    Some("4".to_string()),
                    None,
                    Some("10".to_string()),
                    Some("1".to_string()),
                ],
                "{mode}"
            );
        }
    }

    #[test]
    fn test_parse_duration_reported_once_per_instance() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2022, 1, "1 2 3");

        let (_, results) = run(&executor(&dir, &["--day", "1", "--year", "2022"]));
        let parsed: Vec<bool> = results.iter().map(|r| r.parse_duration.is_some()).collect();
        assert_eq!(parsed, vec![true, false]);

        let (_, results) = run(&executor(
            &dir,
            &["--day", "1", "--year", "2022", "--parallelize-by", "part"],
        ));
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn test_missing_input_and_parse_error_become_results() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2022, 1, "1 x");

        let (outcome, results) = run(&executor(&dir, &["--year", "2022"]));
        assert!(outcome.is_ok());
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.answer.is_err()));

        let Err(parse_error) = &results[0].answer else { unreachable!() };
        assert!(matches!(
            parse_error.inner(),
            ExecutorError::Solver(aoc_solver::SolverError::ParseError(_))
        ));
        let Err(input_error) = &results[3].answer else { unreachable!() };
        assert!(matches!(
            input_error.inner(),
            ExecutorError::InputUnavailable { year: 2022, day: 2, .. }
        ));
    }

    #[test]
    fn test_dropped_receiver_is_an_error() {
        let dir = TempDir::new().unwrap();
        write_input(&dir, 2022, 1, "1");
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let err = executor(&dir, &["--parallelize-by", "sequential"])
            .execute(tx)
            .unwrap_err();
        assert!(err
            .flatten()
            .iter()
            .all(|e| matches!(e.inner(), ExecutorError::ChannelSend)));
    }
}
