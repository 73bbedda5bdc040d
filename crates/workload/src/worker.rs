//! Workload worker
//!
//! A worker runs a warm-up phase, then a measured phase. Each run picks one
//! interaction by rolling a number in `[0, 100)`:
//!
//! | Roll | Interaction |
//! |------|-------------|
//! | `< rare` | add a few new books |
//! | `< rare + frequent` | restock the least stocked books |
//! | otherwise | fetch editor picks and buy some of them |

use crate::config::{ConfigError, WorkloadConfiguration};
use crate::generator::BookSetGenerator;
use crate::report::WorkerRunResult;
use certainstore_core::error::Result;
use certainstore_core::types::{BookCopy, Isbn, StockBook};
use certainstore_engine::{BookStore, StockManager, Store};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// The three kinds of interaction a worker performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Add newly generated books
    RareStockManager,
    /// Restock the least stocked books
    FrequentStockManager,
    /// Fetch editor picks and buy a sample of them
    FrequentBookStore,
}

impl Interaction {
    /// Map a roll in `[0, 100)` to an interaction
    pub fn choose(roll: f32, config: &WorkloadConfiguration) -> Self {
        let rare = config.percent_rare_stock_manager_interaction;
        let frequent = config.percent_frequent_stock_manager_interaction;
        if roll < rare {
            Interaction::RareStockManager
        } else if roll < rare + frequent {
            Interaction::FrequentStockManager
        } else {
            Interaction::FrequentBookStore
        }
    }
}

/// Runs interactions against a shared store
pub struct Worker {
    id: usize,
    store: Arc<dyn Store>,
    config: WorkloadConfiguration,
    generator: BookSetGenerator,
    rng: StdRng,
    frequent_book_store_total: usize,
    frequent_book_store_successful: usize,
}

impl Worker {
    /// Create worker `id`; seeded workers derive their seeds from `id`
    ///
    /// Fails with [`ConfigError`] when `config` does not validate.
    pub fn new(
        id: usize,
        store: Arc<dyn Store>,
        config: WorkloadConfiguration,
    ) -> std::result::Result<Self, ConfigError> {
        let seed = config.seed.map(|s| s.wrapping_add(id as u64));
        let generator = BookSetGenerator::from_config(&config, seed)?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.rotate_left(17)),
            None => StdRng::from_entropy(),
        };
        Ok(Worker {
            id,
            store,
            config,
            generator,
            rng,
            frequent_book_store_total: 0,
            frequent_book_store_successful: 0,
        })
    }

    /// Run the warm-up and measured phases
    pub fn run(mut self) -> WorkerRunResult {
        for _ in 0..self.config.warm_up_runs {
            self.run_once();
        }
        self.frequent_book_store_total = 0;
        self.frequent_book_store_successful = 0;

        let mut successful = 0;
        let start = Instant::now();
        for _ in 0..self.config.num_actual_runs {
            if self.run_once() {
                successful += 1;
            }
        }
        let elapsed = start.elapsed();

        let result = WorkerRunResult {
            successful_interactions: successful,
            total_runs: self.config.num_actual_runs,
            elapsed,
            successful_frequent_book_store_runs: self.frequent_book_store_successful,
            total_frequent_book_store_runs: self.frequent_book_store_total,
        };
        debug!(
            worker = self.id,
            successful,
            elapsed_ms = elapsed.as_millis() as u64,
            "worker finished"
        );
        result
    }

    /// Run one randomly chosen interaction, returning whether it succeeded
    pub fn run_once(&mut self) -> bool {
        let roll: f32 = self.rng.gen::<f32>() * 100.0;
        let interaction = Interaction::choose(roll, &self.config);
        let outcome = match interaction {
            Interaction::RareStockManager => self.run_rare_stock_manager_interaction(),
            Interaction::FrequentStockManager => self.run_frequent_stock_manager_interaction(),
            Interaction::FrequentBookStore => {
                self.frequent_book_store_total += 1;
                let outcome = self.run_frequent_book_store_interaction();
                if outcome.is_ok() {
                    self.frequent_book_store_successful += 1;
                }
                outcome
            }
        };
        if let Err(e) = &outcome {
            trace!(worker = self.id, ?interaction, code = e.code(), "interaction failed");
        }
        outcome.is_ok()
    }

    /// Add generated books that are not in stock yet
    fn run_rare_stock_manager_interaction(&mut self) -> Result<()> {
        let stock: BTreeSet<Isbn> = self.store.get_books()?.into_iter().map(|b| b.isbn).collect();
        let new_books: Vec<StockBook> = self
            .generator
            .next_set_of_stock_books(self.config.num_books_to_add)
            .into_iter()
            .filter(|b| !stock.contains(&b.isbn))
            .collect();
        self.store.add_books(&new_books)
    }

    /// Restock the books with the fewest copies
    fn run_frequent_stock_manager_interaction(&mut self) -> Result<()> {
        let mut stock = self.store.get_books()?;
        stock.sort_by_key(|b| b.num_copies);
        let copies: Vec<BookCopy> = stock
            .iter()
            .take(self.config.num_books_with_least_copies)
            .map(|b| BookCopy::new(b.isbn, self.config.num_add_copies))
            .collect();
        self.store.add_copies(&copies)
    }

    /// Fetch editor picks and buy a sample of them
    fn run_frequent_book_store_interaction(&mut self) -> Result<()> {
        let picks = self
            .store
            .get_editor_picks(self.config.num_editor_picks_to_get)?;
        if picks.is_empty() {
            return Ok(());
        }
        let isbns: Vec<Isbn> = picks.iter().map(|b| b.isbn).collect();
        let copies: Vec<BookCopy> = self
            .generator
            .sample_isbns(&isbns, self.config.num_books_to_buy)
            .into_iter()
            .map(|isbn| BookCopy::new(isbn, self.config.num_book_copies_to_buy))
            .collect();
        self.store.buy_books(&copies)
    }
}
