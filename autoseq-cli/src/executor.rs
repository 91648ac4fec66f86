//! Parallel executor for evaluating catalog sequences

use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use autoseq::CatalogError;
use autoseq::catalog::{Catalog, RecurrencePlugin, Term};
use chrono::{DateTime, Local, TimeDelta};
use itertools::Itertools;
use rayon::prelude::*;
use std::sync::mpsc::Sender;
use std::time::Instant;
use tracing::{debug, info};

/// Result from evaluating a single sequence
pub struct SequenceResult {
    /// Position in the work list, used for ordering output
    pub index: usize,
    pub name: &'static str,
    pub start: usize,
    pub values: Result<Vec<Term>, ArcExecutorError>,
    pub duration: TimeDelta,
    pub finished_at: DateTime<Local>,
}

/// Work item representing a sequence to evaluate
#[derive(Debug, Clone, Copy)]
pub struct WorkItem {
    pub index: usize,
    pub plugin: &'static RecurrencePlugin,
}

/// Parallel executor; each worker builds and owns its own sequence
pub struct Executor {
    catalog: Catalog,
    names: Vec<String>,
    start: usize,
    last: usize,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(catalog: Catalog, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            catalog,
            names: config.names.clone(),
            start: config.start,
            last: config.last_index(),
            thread_pool,
        })
    }

    /// Resolve requested names (or the whole catalog) into ordered work items
    ///
    /// Repeated names are evaluated once.
    pub fn collect_work_items(&self) -> Result<Vec<WorkItem>, CatalogError> {
        let plugins: Vec<&'static RecurrencePlugin> = if self.names.is_empty() {
            self.catalog.iter().collect()
        } else {
            self.names
                .iter()
                .unique()
                .map(|name| {
                    self.catalog
                        .get(name)
                        .ok_or_else(|| CatalogError::NotFound(name.clone()))
                })
                .collect::<Result<_, _>>()?
        };

        Ok(plugins
            .into_iter()
            .enumerate()
            .map(|(index, plugin)| WorkItem { index, plugin })
            .collect())
    }

    /// Evaluate all work items in parallel and send results to channel
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<SequenceResult>,
    ) -> Result<(), ArcExecutorError> {
        let (start, last) = (self.start, self.last);
        info!(
            sequences = work_items.len(),
            threads = self.thread_pool.current_num_threads(),
            start,
            last,
            "evaluating sequences"
        );

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| {
                    tx.send(evaluate(work, start, last))
                        .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
                        .err()
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .unwrap_or_default()
                .map_or(Ok(()), Err)
        })
    }
}

/// Evaluate one sequence and time it
fn evaluate(work: WorkItem, start: usize, last: usize) -> SequenceResult {
    let started = Instant::now();
    let values = compute(work.plugin, start, last);
    let duration = TimeDelta::from_std(started.elapsed()).unwrap_or(TimeDelta::MAX);
    debug!(
        name = work.plugin.name,
        ok = values.is_ok(),
        micros = duration.num_microseconds(),
        "evaluated sequence"
    );

    SequenceResult {
        index: work.index,
        name: work.plugin.name,
        start,
        values,
        duration,
        finished_at: Local::now(),
    }
}

/// Build a fresh sequence and read `[start, last]` through the checked API
fn compute(
    plugin: &'static RecurrencePlugin,
    start: usize,
    last: usize,
) -> Result<Vec<Term>, ArcExecutorError> {
    let end = last + 1;
    plugin.check_index(last).map_err(ExecutorError::from)?;

    let seq = plugin.create();
    let wrap = |source| ExecutorError::Sequence {
        name: plugin.name,
        source,
    };
    seq.try_reserve(end).map_err(wrap)?;
    seq.try_prefetch_up_to(last).map_err(wrap)?;
    let values = seq.try_slice(start, end).map_err(wrap)?.to_vec();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use autoseq::catalog::CatalogBuilder;
    use clap::Parser;

    fn executor(cli: &[&str]) -> Executor {
        let args = Args::parse_from(std::iter::once("autoseq").chain(cli.iter().copied()));
        let config = Config::from_args(args).unwrap();
        let catalog = CatalogBuilder::new().register_all_plugins().unwrap().build();
        Executor::new(catalog, &config).unwrap()
    }

    fn run(executor: &Executor) -> Vec<SequenceResult> {
        let work_items = executor.collect_work_items().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(work_items, tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| r.index);
        results
    }

    #[test]
    fn test_requested_names_keep_order_and_dedupe() {
        let executor = executor(&["pell", "fibonacci", "pell"]);
        let items = executor.collect_work_items().unwrap();
        let names: Vec<_> = items.iter().map(|w| w.plugin.name).collect();
        assert_eq!(names, vec!["pell", "fibonacci"]);
        assert_eq!(items[1].index, 1);
    }

    #[test]
    fn test_unknown_name_is_error() {
        let executor = executor(&["fibonacci", "nope"]);
        assert_eq!(
            executor.collect_work_items().unwrap_err(),
            CatalogError::NotFound("nope".to_string())
        );
    }

    #[test]
    fn test_execute_sends_values() {
        let results = run(&executor(&["fibonacci", "catalan", "--start", "3", "-n", "5", "--threads", "2"]));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "fibonacci");
        assert_eq!(results[0].start, 3);
        assert_eq!(results[0].values.as_ref().unwrap(), &vec![2, 3, 5, 8, 13]);
        assert_eq!(results[1].values.as_ref().unwrap(), &vec![5, 14, 42, 132, 429]);
    }

    #[test]
    fn test_last_index_taken_from_config() {
        let at_limit = executor(&["pell", "--start", "95", "-n", "7"]);
        assert_eq!(at_limit.last, 101);
        let results = run(&at_limit);
        assert_eq!(results[0].values.as_ref().unwrap().len(), 7);

        // One more element is past the pell limit
        let past_limit = executor(&["pell", "--start", "95", "-n", "8"]);
        assert_eq!(past_limit.last, 102);
        assert!(run(&past_limit)[0].values.is_err());
    }

    #[test]
    fn test_limit_reported_per_sequence() {
        let results = run(&executor(&["factorial", "triangular", "--start", "30", "-n", "10"]));
        let factorial = &results[0];
        assert!(matches!(
            factorial.values.as_ref().unwrap_err().inner(),
            ExecutorError::Catalog(CatalogError::LimitExceeded { requested: 39, limit: 34, .. })
        ));
        assert_eq!(results[1].values.as_ref().unwrap()[0], 465);
    }
}
