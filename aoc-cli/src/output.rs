//! Output formatting for solver results
//!
//! Answers go to stdout; errors, timings of failed parts and everything
//! logged through `tracing` go to stderr, so `--quiet` output can be piped.

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::time::{Duration, Instant};

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: Instant,
}

/// Totals over a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub solved: usize,
    pub failed: usize,
    pub parse_time: TimeDelta,
    pub solve_time: TimeDelta,
}

impl Summary {
    /// Timings only count parts that produced an answer
    pub fn of(results: &[SolverResult]) -> Self {
        let solved: Vec<_> = results.iter().filter(|r| r.answer.is_ok()).collect();
        Self {
            solved: solved.len(),
            failed: results.len() - solved.len(),
            parse_time: solved.iter().filter_map(|r| r.parse_duration).sum(),
            solve_time: solved.iter().map(|r| r.solve_duration).sum(),
        }
    }
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: Instant::now(),
        }
    }

    /// Print one result: the answer line on stdout, or the error on stderr
    pub fn print_result(&self, result: &SolverResult) {
        match self.format_result(result) {
            Ok(line) => println!("{line}"),
            Err(line) => eprintln!("{line}"),
        }
    }

    fn format_result(&self, result: &SolverResult) -> Result<String, String> {
        let answer = result.answer.as_ref();
        if self.quiet {
            return answer.cloned().map_err(|e| format!("Error: {e}"));
        }

        let prefix = format!("{}/{:02} Part {}", result.year, result.day, result.part);
        match answer {
            Ok(answer) => {
                let parse_timing = result
                    .parse_duration
                    .map(|d| format!("parse: {}, ", format_duration(d)))
                    .unwrap_or_default();
                Ok(format!(
                    "{prefix}: {answer} ({parse_timing}solve: {})",
                    format_duration(result.solve_duration)
                ))
            }
            Err(e) => Err(format!("{prefix}: Error - {e}")),
        }
    }

    /// Print a summary after all results.
    ///
    /// Shows the summed compute time next to the wall-clock time, so the
    /// ratio is the speedup gained from parallel execution.
    pub fn print_summary(&self, summary: &Summary) {
        if self.quiet {
            return;
        }

        let elapsed_time = self.start_time.elapsed();
        println!();
        println!("--- Summary ---");
        println!("Parts: {} solved, {} failed", summary.solved, summary.failed);
        println!("Total parse time: {}", format_duration(summary.parse_time));
        println!("Total solve time: {}", format_duration(summary.solve_time));
        println!("Elapsed wall-clock time: {}", format_std_duration(elapsed_time));
        if !elapsed_time.is_zero() {
            let compute_micros = (summary.parse_time + summary.solve_time)
                .num_microseconds()
                .unwrap_or(0);
            let speedup = compute_micros as f64 / 1_000_000.0 / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
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

/// Format a std Duration for display (used for wall-clock time)
fn format_std_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
