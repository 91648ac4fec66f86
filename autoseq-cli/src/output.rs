//! Output formatting for evaluation results

use crate::executor::SequenceResult;
use autoseq::catalog::{Catalog, Term};
use chrono::TimeDelta;
use itertools::Itertools;

/// Output formatter for evaluation results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SequenceResult) {
        if self.quiet {
            self.print_quiet(result);
        } else {
            self.print_full(result);
        }
    }

    /// Print in quiet mode (just the values)
    fn print_quiet(&self, result: &SequenceResult) {
        match &result.values {
            Ok(values) => println!("{}", values.iter().join(" ")),
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    /// Print full output with range and timing
    fn print_full(&self, result: &SequenceResult) {
        match &result.values {
            Ok(values) => println!(
                "{} ({}, done {})",
                format_values(result.name, result.start, values),
                format_duration(result.duration),
                result.finished_at.format("%H:%M:%S")
            ),
            Err(e) => eprintln!("{}: Error - {}", result.name, e),
        }
    }

    /// Print a summary after all results
    pub fn print_summary(&self, results: &[SequenceResult]) {
        if self.quiet {
            return;
        }

        let total_compute_time: TimeDelta = results.iter().map(|r| r.duration).sum();
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!("{}", format_counts(results));
        println!("Total compute time: {}", format_duration(total_compute_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_compute_secs =
                total_compute_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            let speedup = total_compute_secs / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }

    /// Print every catalog entry, one per line
    pub fn print_catalog(&self, catalog: &Catalog) {
        for plugin in catalog.iter() {
            if self.quiet {
                println!("{}", plugin.name);
            } else {
                println!(
                    "{:<14} limit {:<10} [{}] {}",
                    plugin.name,
                    plugin.limit,
                    plugin.tags.iter().join(", "),
                    plugin.description
                );
            }
        }
    }
}

/// Render `Sequences: N evaluated, S succeeded, F failed`
fn format_counts(results: &[SequenceResult]) -> String {
    let total = results.len();
    let successes = results.iter().filter(|r| r.values.is_ok()).count();
    format!(
        "Sequences: {} evaluated, {} succeeded, {} failed",
        total,
        successes,
        total - successes
    )
}

/// Render `name[start..end): v0, v1, ...`
fn format_values(name: &str, start: usize, values: &[Term]) -> String {
    format!(
        "{}[{}..{}): {}",
        name,
        start,
        start + values.len(),
        values.iter().join(", ")
    )
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

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ArcExecutorError, ExecutorError};
    use autoseq::SeqError;
    use chrono::Local;
    use std::time::Duration;

    #[test]
    fn test_format_values() {
        assert_eq!(
            format_values("sum", 3, &[4, 7, 12, 20, 33]),
            "sum[3..8): 4, 7, 12, 20, 33"
        );
        assert_eq!(format_values("empty", 5, &[]), "empty[5..5): ");
    }

    fn result(values: Result<Vec<Term>, ArcExecutorError>) -> SequenceResult {
        SequenceResult {
            index: 0,
            name: "pell",
            start: 0,
            values,
            duration: TimeDelta::microseconds(5),
            finished_at: Local::now(),
        }
    }

    #[test]
    fn test_format_counts_separates_total_and_failures() {
        let failed = ExecutorError::Sequence {
            name: "pell",
            source: SeqError::Busy,
        };
        let results = [
            result(Ok(vec![0, 1])),
            result(Err(failed.into())),
            result(Ok(vec![2])),
        ];
        assert_eq!(
            format_counts(&results),
            "Sequences: 3 evaluated, 2 succeeded, 1 failed"
        );
        assert_eq!(format_counts(&[]), "Sequences: 0 evaluated, 0 succeeded, 0 failed");
    }

    #[test]
    fn test_format_duration_units() {
        assert_eq!(format_duration(TimeDelta::microseconds(250)), "250µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-40)), "-40µs");
    }

    #[test]
    fn test_format_std_duration_units() {
        assert_eq!(format_std_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_std_duration(Duration::from_micros(12_340)), "12.34ms");
        assert_eq!(format_std_duration(Duration::from_secs(3)), "3.00s");
    }
}
