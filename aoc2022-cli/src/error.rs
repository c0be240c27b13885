//! Error types for the CLI

use thiserror::Error;
use thiserror_ext::Arc as ArcDerive;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Executor error (wraps Arc for cheap cloning)
    #[error("{0}")]
    Executor(#[from] ArcExecutorError),

    #[error("{failed} of {total} part(s) failed")]
    PartsFailed { failed: usize, total: usize },
}

/// Errors raised while running solvers
///
/// Shared behind an `Arc`: one missing input or parse failure is reported
/// once per requested part.
#[derive(Error, Debug, ArcDerive)]
#[thiserror_ext(newtype(name = ArcExecutorError))]
pub enum ExecutorError {
    /// Input file missing or unreadable
    #[error("Input unavailable for {year}/{day:02}: {source}")]
    InputUnavailable {
        year: u16,
        day: u8,
        #[source]
        source: InputError,
    },

    /// Parse or solve failure reported by the solver
    #[error("{0}")]
    Solver(#[from] aoc_solver::SolverError),

    /// Receiver dropped before every result was sent
    #[error("Channel send error")]
    ChannelSend,

    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// Worker thread panicked
    #[error("Worker panicked while solving {year}/{day:02}")]
    WorkerPanic { year: u16, day: u8 },

    /// Multiple errors collected during parallel execution
    #[error("Multiple errors occurred ({} total)", .0.len())]
    Multiple(Vec<ArcExecutorError>),
}

impl ArcExecutorError {
    /// Merge two errors into one `Multiple`, flattening nested ones
    pub fn combine(first: ArcExecutorError, second: ArcExecutorError) -> ArcExecutorError {
        let errors = match (first.inner(), second.inner()) {
            (ExecutorError::Multiple(v1), ExecutorError::Multiple(v2)) => {
                v1.iter().chain(v2).cloned().collect()
            }
            (_, ExecutorError::Multiple(v)) => {
                std::iter::once(first.clone()).chain(v.iter().cloned()).collect()
            }
            (ExecutorError::Multiple(v), _) => {
                v.iter().cloned().chain(std::iter::once(second.clone())).collect()
            }
            _ => vec![first, second],
        };
        ExecutorError::Multiple(errors).into()
    }

    pub fn combine_opt(
        existing: Option<ArcExecutorError>,
        new: ArcExecutorError,
    ) -> ArcExecutorError {
        match existing {
            Some(e) => Self::combine(e, new),
            None => new,
        }
    }

    /// Every non-`Multiple` error contained in this one
    pub fn flatten(&self) -> Vec<ArcExecutorError> {
        match self.inner() {
            ExecutorError::Multiple(errors) => errors.iter().flat_map(Self::flatten).collect(),
            _ => vec![self.clone()],
        }
    }
}

/// Problems reading an input file
#[derive(Error, Debug)]
pub enum InputError {
    #[error("{} does not exist", .0.display())]
    Missing(std::path::PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
