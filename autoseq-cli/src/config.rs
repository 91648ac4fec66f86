//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;

/// Environment variable holding the default log filter
pub const LOG_ENV: &str = "AUTOSEQ_LOG";

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Requested sequence names (empty = whole catalog)
    pub names: Vec<String>,
    /// Tags to filter sequences
    pub tags: Vec<String>,
    /// First index to print
    pub start: usize,
    /// Number of elements to print (at least 1)
    pub count: usize,
    /// Number of threads for parallel evaluation
    pub thread_count: usize,
    /// List the catalog and exit
    pub list: bool,
    /// Quiet mode
    pub quiet: bool,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Config {
    /// Build config from CLI args, reading the log filter from the environment
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        Self::resolve(args, std::env::var(LOG_ENV).ok())
    }

    fn resolve(args: Args, env_filter: Option<String>) -> Result<Self, CliError> {
        if args.count == 0 {
            return Err(CliError::Config("--count must be at least 1".to_string()));
        }
        if args.start.checked_add(args.count).is_none() {
            return Err(CliError::Config(format!(
                "--start {} with --count {} overflows the index range",
                args.start, args.count
            )));
        }

        let thread_count = match args.threads {
            Some(0) => {
                return Err(CliError::Config("--threads must be at least 1".to_string()));
            }
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            names: args.names,
            tags: args.tags,
            start: args.start,
            count: args.count,
            thread_count,
            list: args.list,
            quiet: args.quiet,
            log_filter: log_filter(args.verbose, env_filter),
        })
    }

    /// One past the last printed index
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    /// Last index that has to be computed
    pub fn last_index(&self) -> usize {
        self.end() - 1
    }
}

/// `-v` flags win over the environment; `warn` when neither is set
fn log_filter(verbose: u8, env_filter: Option<String>) -> String {
    match verbose {
        0 => env_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| "warn".to_string()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    }
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(cli: &[&str]) -> Args {
        Args::parse_from(std::iter::once("autoseq").chain(cli.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(args(&[]), None).unwrap();
        assert!(config.names.is_empty());
        assert_eq!(config.start, 0);
        assert_eq!(config.count, 10);
        assert_eq!(config.end(), 10);
        assert_eq!(config.last_index(), 9);
        assert!(config.thread_count >= 1);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_names_and_range() {
        let config = Config::resolve(
            args(&["fibonacci", "pell", "--start", "5", "-n", "3", "--tags", "linear,classic"]),
            None,
        )
        .unwrap();
        assert_eq!(config.names, vec!["fibonacci", "pell"]);
        assert_eq!(config.tags, vec!["linear", "classic"]);
        assert_eq!(config.end(), 8);
        assert_eq!(config.last_index(), 7);
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = Config::resolve(args(&["--count", "0"]), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = Config::resolve(args(&["--threads", "0"]), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let start = usize::MAX.to_string();
        let err = Config::resolve(args(&["--start", &start]), None).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_log_filter_resolution() {
        assert_eq!(log_filter(0, None), "warn");
        assert_eq!(log_filter(0, Some("autoseq=trace".to_string())), "autoseq=trace");
        assert_eq!(log_filter(0, Some("  ".to_string())), "warn");
        assert_eq!(log_filter(1, Some("autoseq=trace".to_string())), "info");
        assert_eq!(log_filter(3, None), "debug");
    }
}
