//! Workload runner
//!
//! Seeds a store, starts one [`Worker`] per thread on a
//! [`std::thread::scope`] and aggregates their results.

use crate::config::WorkloadConfiguration;
use crate::error::WorkloadError;
use crate::generator::BookSetGenerator;
use crate::report::WorkloadReport;
use crate::worker::Worker;
use certainstore_engine::{BookStore, StockManager, Store};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Offset between the seed of the initial book set and the worker seeds
const INITIAL_SET_SEED_OFFSET: u64 = 0x9E37_79B9_7F4A_7C15;

/// Add `config.initial_books` generated books to `store`
///
/// Returns the number of books added.
pub fn initialize_store(
    store: &Arc<dyn Store>,
    config: &WorkloadConfiguration,
) -> Result<usize, WorkloadError> {
    let seed = config.seed.map(|s| s.wrapping_add(INITIAL_SET_SEED_OFFSET));
    let mut generator = BookSetGenerator::from_config(config, seed)?;
    let books = generator.next_set_of_stock_books(config.initial_books);
    store.add_books(&books)?;
    let isbns: Vec<_> = books.iter().map(|b| b.isbn).collect();
    let added = store.get_books_by_isbn(&isbns)?.len();
    info!(books = added, "store initialized");
    Ok(added)
}

/// Seed `store` and run `threads` workers against it
pub fn run_workload(
    store: Arc<dyn Store>,
    config: &WorkloadConfiguration,
    threads: usize,
) -> Result<WorkloadReport, WorkloadError> {
    let workers = (0..threads)
        .map(|id| Worker::new(id, Arc::clone(&store), config.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    let initial_books = initialize_store(&store, config)?;

    let results = thread::scope(|scope| {
        let handles: Vec<_> = workers
            .into_iter()
            .map(|worker| scope.spawn(move || worker.run()))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(worker, handle)| {
                handle
                    .join()
                    .map_err(|_| WorkloadError::WorkerPanicked { worker })
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let report = WorkloadReport::from_results(initial_books, results);
    info!(
        threads,
        avg_success_rate = report.avg_success_rate,
        agg_throughput = report.throughput.agg,
        "workload finished"
    );
    Ok(report)
}
