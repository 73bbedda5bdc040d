//! Synthetic workload harness for certainstore
//!
//! Drives a [`Store`](certainstore_engine::Store) with a mix of customer and
//! stock-manager interactions from several threads and reports throughput,
//! goodput and latency.
//!
//! # Example
//!
//! ```no_run
//! use certainstore_engine::StoreOptions;
//! use certainstore_workload::{run_workload, WorkloadConfiguration};
//!
//! let store = StoreOptions::new().open();
//! let report = run_workload(store, &WorkloadConfiguration::new(), 4)?;
//! println!("{}", report.to_csv());
//! # Ok::<(), certainstore_workload::WorkloadError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod runner;
pub mod worker;

pub use config::{ConfigError, RangeConfig, WorkloadConfiguration};
pub use error::WorkloadError;
pub use generator::BookSetGenerator;
pub use report::{Stat, WorkerRunResult, WorkloadReport};
pub use runner::{initialize_store, run_workload};
pub use worker::{Interaction, Worker};
