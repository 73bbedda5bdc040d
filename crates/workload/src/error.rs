//! Workload errors

use crate::config::ConfigError;
use thiserror::Error;

/// Errors running a workload
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// The configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The store rejected the initial book set
    #[error("failed to initialize store: {0}")]
    Store(#[from] certainstore_core::Error),

    /// A worker thread panicked
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker
        worker: usize,
    },
}
