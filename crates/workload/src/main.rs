//! certainstore-workload: sweep thread counts and store variants, print CSV.
//!
//! ```text
//! certainstore-workload --threads 1,2,4 --locking two_level --seed 42
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod cli;

use std::process;

use certainstore_engine::StoreOptions;
use certainstore_workload::{run_workload, WorkerRunResult, WorkloadReport};
use tracing_subscriber::EnvFilter;

use cli::{build_cli, matches_to_plan};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let plan = match matches_to_plan(&matches) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    };

    println!("locking,{}", WorkloadReport::CSV_HEADER);
    let mut worker_rows = Vec::new();
    for &mode in &plan.locking {
        for &threads in &plan.threads {
            let mut options = StoreOptions::new()
                .locking(mode)
                .capacity(plan.config.initial_books);
            if let Some(seed) = plan.config.seed {
                options = options.seed(seed);
            }
            match run_workload(options.open(), &plan.config, threads) {
                Ok(report) => {
                    println!("{},{}", mode, report.to_csv());
                    if plan.per_worker {
                        worker_rows.extend(
                            report
                                .workers
                                .iter()
                                .map(|w| format!("{},{},{}", mode, threads, w.to_csv())),
                        );
                    }
                }
                Err(e) => {
                    eprintln!("{} with {} threads: {}", mode, threads, e);
                    process::exit(1);
                }
            }
        }
    }

    if plan.per_worker {
        println!();
        println!("locking,threads,{}", WorkerRunResult::CSV_HEADER);
        for row in worker_rows {
            println!("{}", row);
        }
    }
}
