//! `aoc2022` - runs the Advent of Code 2022 solvers against local inputs

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod logger;
mod output;

// Link the solver plugins
use aoc2022_solutions as _;

use aggregator::ResultAggregator;
use aoc_solver::{SolverRegistry, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::{Executor, WorkItem};
use output::{OutputFormatter, Summary};
use tracing::{debug, warn};

fn main() {
    let result = Config::from_args(Args::parse()).and_then(|config| {
        logger::init(config.verbose);
        run(config)
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), CliError> {
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    for (year, day) in missing_inputs(&work_items, &executor) {
        warn!(
            path = %executor.inputs().path(year, day).display(),
            "missing input for {year}/{day:02}"
        );
    }

    run_executor(executor, work_items, config.quiet)
}

fn missing_inputs(work_items: &[WorkItem], executor: &Executor) -> Vec<(u16, u8)> {
    work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .map(|w| (w.year, w.day))
        .collect()
}

/// Run the executor on a background thread and print results in order
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::for_work_items(&work_items);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);

    let summary = Summary::from_results(&results);
    if summary.failed > 0 {
        return Err(CliError::PartsFailed {
            failed: summary.failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Build registry, keeping solvers that carry every requested tag
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    let registry = builder.build();
    debug!(solvers = registry.len(), "registry built");
    Ok(registry)
}
