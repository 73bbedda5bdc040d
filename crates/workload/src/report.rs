//! Run results and aggregated metrics
//!
//! Throughput, goodput and latency are measured over customer
//! (frequent bookstore) interactions, with time in milliseconds:
//!
//! - throughput: customer interactions per millisecond
//! - goodput: successful customer interactions per millisecond
//! - latency: milliseconds per customer interaction
//!
//! Each metric is reported as the sum over workers (`agg`), the mean (`avg`)
//! and the sample standard deviation (`std`). Diffput is throughput minus
//! goodput.

use std::fmt::Write as _;
use std::time::Duration;

/// Outcome of one worker's measured runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerRunResult {
    /// Interactions that returned success
    pub successful_interactions: usize,
    /// Measured interactions
    pub total_runs: usize,
    /// Wall time of the measured phase
    pub elapsed: Duration,
    /// Customer interactions that returned success
    pub successful_frequent_book_store_runs: usize,
    /// Customer interactions attempted
    pub total_frequent_book_store_runs: usize,
}

impl WorkerRunResult {
    /// CSV header matching [`WorkerRunResult::to_csv`]
    pub const CSV_HEADER: &'static str = "successful_interactions,elapsed_ns,total_runs,successful_frequent_book_store_runs,total_frequent_book_store_runs";

    /// One CSV row
    pub fn to_csv(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.successful_interactions,
            self.elapsed.as_nanos(),
            self.total_runs,
            self.successful_frequent_book_store_runs,
            self.total_frequent_book_store_runs
        )
    }

    fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1_000.0
    }

    fn throughput(&self) -> f64 {
        ratio(self.total_frequent_book_store_runs as f64, self.millis())
    }

    fn goodput(&self) -> f64 {
        ratio(self.successful_frequent_book_store_runs as f64, self.millis())
    }

    fn latency(&self) -> f64 {
        ratio(self.millis(), self.total_frequent_book_store_runs as f64)
    }
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Sum, mean and sample standard deviation of one metric
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stat {
    /// Sum over workers
    pub agg: f64,
    /// Mean over workers
    pub avg: f64,
    /// Sample standard deviation over workers
    pub std: f64,
}

impl Stat {
    fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Stat::default();
        }
        let n = samples.len() as f64;
        let agg: f64 = samples.iter().sum();
        let avg = agg / n;
        let squares: f64 = samples.iter().map(|s| (s - avg) * (s - avg)).sum();
        let divisor = if samples.len() > 1 { n - 1.0 } else { 1.0 };
        Stat {
            agg,
            avg,
            std: (squares / divisor).sqrt(),
        }
    }
}

/// Metrics of one workload run over all workers
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadReport {
    /// Books in the store before the workers started
    pub initial_books: usize,
    /// Worker threads
    pub threads: usize,
    /// Share of customer interactions, in percent
    pub frequent_percent: f64,
    /// Sum of measured phase times, in milliseconds
    pub total_time_ms: f64,
    /// Mean customer success rate, in percent
    pub avg_success_rate: f64,
    /// Customer interactions per millisecond
    pub throughput: Stat,
    /// Successful customer interactions per millisecond
    pub goodput: Stat,
    /// Milliseconds per customer interaction
    pub latency: Stat,
    /// Per-worker results
    pub workers: Vec<WorkerRunResult>,
}

impl WorkloadReport {
    /// CSV header matching [`WorkloadReport::to_csv`]
    pub const CSV_HEADER: &'static str = "initial_books,threads,frequent_percent,total_time_ms,avg_success_rate,agg_throughput,avg_throughput,std_throughput,agg_goodput,avg_goodput,std_goodput,agg_diffput,avg_diffput,std_diffput,agg_latency,avg_latency,std_latency";

    /// Aggregate worker results
    pub fn from_results(initial_books: usize, workers: Vec<WorkerRunResult>) -> Self {
        let n = workers.len();
        let mean = |f: &dyn Fn(&WorkerRunResult) -> f64| {
            ratio(workers.iter().map(f).sum::<f64>(), n as f64)
        };

        let frequent_percent =
            mean(&|w| ratio(w.total_frequent_book_store_runs as f64, w.total_runs as f64)) * 100.0;
        let avg_success_rate = mean(&|w| {
            ratio(
                w.successful_frequent_book_store_runs as f64,
                w.total_frequent_book_store_runs as f64,
            )
        }) * 100.0;
        let total_time_ms: f64 = workers.iter().map(WorkerRunResult::millis).sum();

        let samples = |f: fn(&WorkerRunResult) -> f64| workers.iter().map(f).collect::<Vec<_>>();
        let throughput = Stat::from_samples(&samples(WorkerRunResult::throughput));
        let goodput = Stat::from_samples(&samples(WorkerRunResult::goodput));
        let latency = Stat::from_samples(&samples(WorkerRunResult::latency));

        WorkloadReport {
            initial_books,
            threads: n,
            frequent_percent,
            total_time_ms,
            avg_success_rate,
            throughput,
            goodput,
            latency,
            workers,
        }
    }

    /// Throughput minus goodput, per statistic
    pub fn diffput(&self) -> Stat {
        Stat {
            agg: self.throughput.agg - self.goodput.agg,
            avg: self.throughput.avg - self.goodput.avg,
            std: self.throughput.std - self.goodput.std,
        }
    }

    /// One CSV row
    pub fn to_csv(&self) -> String {
        let mut row = format!(
            "{},{},{},{},{}",
            self.initial_books,
            self.threads,
            self.frequent_percent,
            self.total_time_ms,
            self.avg_success_rate
        );
        for stat in [self.throughput, self.goodput, self.diffput(), self.latency] {
            let _ = write!(row, ",{},{},{}", stat.agg, stat.avg, stat.std);
        }
        row
    }
}
