//! Command-line interface of the workload binary

use certainstore_engine::LockingMode;
use clap::builder::RangedU64ValueParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use certainstore_workload::{ConfigError, WorkloadConfiguration};

/// Thread counts swept when `--threads` is absent
pub const DEFAULT_THREADS: [usize; 6] = [1, 2, 4, 8, 16, 32];

/// Everything the binary needs to run
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub config: WorkloadConfiguration,
    pub threads: Vec<usize>,
    pub locking: Vec<LockingMode>,
    pub per_worker: bool,
}

pub fn build_cli() -> Command {
    Command::new("certainstore-workload")
        .about("Drive a certainstore with synthetic traffic and print CSV metrics")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .help("TOML workload configuration"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .short('t')
                .value_name("N,..")
                .value_delimiter(',')
                .value_parser(RangedU64ValueParser::<usize>::new().range(1..))
                .help("Worker thread counts to sweep [default: 1,2,4,8,16,32]"),
        )
        .arg(
            Arg::new("locking")
                .long("locking")
                .short('l')
                .value_name("MODE")
                .value_delimiter(',')
                .value_parser(|s: &str| s.parse::<LockingMode>())
                .help("Store variants to measure: two_level, single_lock [default: both]"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .help("Seed every random choice"),
        )
        .arg(
            Arg::new("runs")
                .long("runs")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Measured runs per worker"),
        )
        .arg(
            Arg::new("warm-up")
                .long("warm-up")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Warm-up runs per worker"),
        )
        .arg(
            Arg::new("books")
                .long("books")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Books added before the workers start"),
        )
        .arg(
            Arg::new("per-worker")
                .long("per-worker")
                .action(ArgAction::SetTrue)
                .help("Also print one CSV row per worker"),
        )
}

/// Turn parsed arguments into a [`RunPlan`]
pub fn matches_to_plan(matches: &ArgMatches) -> Result<RunPlan, ConfigError> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => WorkloadConfiguration::from_file(path)?,
        None => WorkloadConfiguration::new(),
    };
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = Some(*seed);
    }
    if let Some(runs) = matches.get_one::<usize>("runs") {
        config.num_actual_runs = *runs;
    }
    if let Some(warm_up) = matches.get_one::<usize>("warm-up") {
        config.warm_up_runs = *warm_up;
    }
    if let Some(books) = matches.get_one::<usize>("books") {
        config.initial_books = *books;
    }
    config.validate()?;

    let threads = matches
        .get_many::<usize>("threads")
        .map(|t| t.copied().collect())
        .unwrap_or_else(|| DEFAULT_THREADS.to_vec());
    let locking = matches
        .get_many::<LockingMode>("locking")
        .map(|l| l.copied().collect())
        .unwrap_or_else(|| vec![LockingMode::TwoLevel, LockingMode::SingleLock]);

    Ok(RunPlan {
        config,
        threads,
        locking,
        per_worker: matches.get_flag("per-worker"),
    })
}
