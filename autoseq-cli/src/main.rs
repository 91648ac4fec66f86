//! autoseq CLI - evaluate named recurrence sequences from the catalog

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod output;

use aggregator::ResultAggregator;
use autoseq::catalog::{Catalog, CatalogBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::{Executor, SequenceResult, WorkItem};
use output::OutputFormatter;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    init_logging(&config.log_filter)?;

    // Build catalog with tag filtering (only once)
    let catalog = build_catalog(&config.tags)?;
    let formatter = OutputFormatter::new(config.quiet);

    if config.list {
        formatter.print_catalog(&catalog);
        return Ok(());
    }

    let executor = Executor::new(catalog, &config).map_err(ArcExecutorError::from)?;
    let work_items = executor.collect_work_items()?;
    if work_items.is_empty() {
        println!("No sequences found matching the specified filters.");
        return Ok(());
    }

    run_executor(executor, work_items, formatter)
}

/// Route `tracing` output to stderr so stdout only carries results
fn init_logging(filter: &str) -> Result<(), CliError> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| CliError::Config(format!("Invalid log filter '{}': {}", filter, e)))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// Run the executor and stream results in work order
fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    formatter: OutputFormatter,
) -> Result<(), CliError> {
    let mut aggregator = ResultAggregator::new(work_items.iter().map(|w| w.index));

    // Set up result channel
    let (tx, rx) = std::sync::mpsc::channel();

    // Run executor in background thread
    let executor_handle = std::thread::spawn(move || executor.execute(work_items, tx));

    let mut results: Vec<SequenceResult> = Vec::new();
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

    // Fail the run if any sequence failed
    results
        .iter()
        .filter_map(|r| r.values.as_ref().err().cloned())
        .reduce(ArcExecutorError::combine)
        .map_or(Ok(()), |e| Err(e.into()))
}

/// Build catalog with tag filtering
fn build_catalog(tags: &[String]) -> Result<Catalog, CliError> {
    let builder = CatalogBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_plugins(|plugin| plugin.has_tags(tags))?
    };

    Ok(builder.build())
}
