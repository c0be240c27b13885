//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::fmt::Write as _;
use std::time::Instant;

/// Counts and timings over a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    pub fn from_results(results: &[SolverResult]) -> Self {
        let solved = results.iter().filter(|r| r.answer.is_ok()).count();
        Self {
            solved,
            failed: results.len() - solved,
            parse_time: results.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: results
                .iter()
                .filter(|r| r.answer.is_ok())
                .map(|r| r.solve_duration)
                .sum(),
        }
    }
}

pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    pub fn print_result(&self, result: &SolverResult) {
        let line = self.format_result(result);
        if result.answer.is_ok() {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    }

    /// Render one result
    ///
    /// Quiet mode keeps only the answer. Otherwise the line is
    /// `YYYY/DD Part P: answer (parse: .., solve: ..)`, and an answer
    /// spanning several lines starts on the line after the header.
    pub fn format_result(&self, result: &SolverResult) -> String {
        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
        let answer = match &result.answer {
            Ok(answer) => answer,
            Err(e) if self.quiet => return format!("Error: {e}"),
            Err(e) => return format!("{prefix}: Error - {e}"),
        };
        if self.quiet {
            return answer.clone();
        }

        let mut timing = String::new();
        if let Some(parse) = result.parse_duration {
            let _ = write!(timing, "parse: {}, ", format_duration(parse));
        }
        let _ = write!(timing, "solve: {}", format_duration(result.solve_duration));

        if answer.contains('\n') {
            format!("{prefix}: ({timing})\n{answer}")
        } else {
            format!("{prefix}: {answer} ({timing})")
        }
    }

    /// Print a summary after all results
    ///
    /// Reports the summed parse and solve times next to the wall-clock time.
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }

        let summary = Summary::from_results(results);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!(
            "Elapsed wall-clock time: {}",
            TimeDelta::from_std(elapsed).map_or_else(|_| "N/A".to_string(), format_duration)
        );
        if !elapsed.is_zero() {
            let compute = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0) as f64
                / 1_000_000.0;
            println!("Speedup factor: {:.2}x", compute / elapsed.as_secs_f64());
        }
    }
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};

    fn result(part: u8, answer: Result<&str, ArcExecutorError>) -> SolverResult {
        SolverResult {
            year: 2022,
            day: 10,
            part,
            answer: answer.map(str::to_string),
            solve_duration: TimeDelta::microseconds(1500),
            parse_duration: (part == 1).then(|| TimeDelta::microseconds(250)),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
    }

    #[test]
    fn test_single_line_answer() {
        let out = OutputFormatter::new(false).format_result(&result(1, Ok("13140")));
        assert_eq!(out, "2022/10 Part 1: 13140 (parse: 250µs, solve: 1.50ms)");
    }

    #[test]
    fn test_multi_line_answer() {
        let out = OutputFormatter::new(false).format_result(&result(2, Ok("##..\n..##")));
        assert_eq!(out, "2022/10 Part 2: (solve: 1.50ms)\n##..\n..##");
    }

    #[test]
    fn test_quiet_and_errors() {
        let error: ArcExecutorError = ExecutorError::ChannelSend.into();
        let quiet = OutputFormatter::new(true);
        assert_eq!(quiet.format_result(&result(2, Ok("##..\n..##"))), "##..\n..##");
        assert_eq!(
            quiet.format_result(&result(1, Err(error.clone()))),
            "Error: Channel send error"
        );
        assert_eq!(
            OutputFormatter::new(false).format_result(&result(1, Err(error))),
            "2022/10 Part 1: Error - Channel send error"
        );
    }

    #[test]
    fn test_summary_counts() {
        let error: ArcExecutorError = ExecutorError::ChannelSend.into();
        let summary = Summary::from_results(&[result(1, Ok("1")), result(2, Err(error))]);
        assert_eq!(summary.solved, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.parse_time, TimeDelta::microseconds(250));
        assert_eq!(summary.solve_time, TimeDelta::microseconds(1500));
    }
}
