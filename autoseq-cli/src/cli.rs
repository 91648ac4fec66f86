//! CLI argument parsing using clap

use clap::{ArgAction, Parser};

/// Evaluate named recurrence sequences
#[derive(Parser, Debug)]
#[command(name = "autoseq", about = "Evaluate named recurrence sequences", version)]
pub struct Args {
    /// Sequences to evaluate (all catalog entries if omitted)
    pub names: Vec<String>,

    /// First index to print
    #[arg(short, long, default_value_t = 0)]
    pub start: usize,

    /// Number of elements to print
    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// Tags to filter sequences (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Number of threads for parallel evaluation
    #[arg(long)]
    pub threads: Option<usize>,

    /// List the catalog instead of evaluating
    #[arg(short, long)]
    pub list: bool,

    /// Quiet mode - only output values
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
