//! Read-only aggregates over consistent snapshots
//!
//! The functions here never touch locks: stores build a snapshot under their
//! own locking scheme and hand it over.

use certainstore_core::error::{Error, Result};
use certainstore_core::types::{Book, StockBook};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;
use std::cmp::Ordering;

/// Validate the size argument of a top-rated query (must be positive)
pub fn top_rated_count(n: i32) -> Result<usize> {
    if n <= 0 {
        return Err(Error::InvalidArgument(format!(
            "number of top rated books must be positive, got {n}"
        )));
    }
    Ok(n as usize)
}

/// Validate the size argument of an editor-picks query (must not be negative)
pub fn editor_pick_count(n: i32) -> Result<usize> {
    if n < 0 {
        return Err(Error::InvalidArgument(format!(
            "number of editor picks must not be negative, got {n}"
        )));
    }
    Ok(n as usize)
}

/// Ranking order: average rating descending, then ISBN ascending
pub fn rank_order(a: &StockBook, b: &StockBook) -> Ordering {
    b.average_rating()
        .total_cmp(&a.average_rating())
        .then_with(|| a.isbn.cmp(&b.isbn))
}

/// The first `n` entries by [`rank_order`]
pub fn top_rated(mut books: Vec<StockBook>, n: usize) -> Vec<Book> {
    books.sort_by(rank_order);
    books.truncate(n);
    books.into_iter().map(Book::from).collect()
}

/// Entries with at least one sale miss, order preserved
pub fn in_demand(books: Vec<StockBook>) -> Vec<StockBook> {
    books
        .into_iter()
        .filter(|b| b.num_sale_misses > 0)
        .collect()
}

/// Uniform sampling of editor picks
///
/// The generator is shared by every caller of a store; sampling holds it only
/// for the duration of one index draw, never while an inventory lock is held.
#[derive(Debug)]
pub struct PickSampler {
    rng: Mutex<StdRng>,
}

impl PickSampler {
    /// Create a sampler, deterministic when `seed` is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        PickSampler {
            rng: Mutex::new(rng),
        }
    }

    /// Draw `min(n, candidates.len())` distinct candidates
    pub fn sample(&self, mut candidates: Vec<Book>, n: usize) -> Vec<Book> {
        let amount = n.min(candidates.len());
        if amount == candidates.len() {
            return candidates;
        }
        let picked = index::sample(&mut *self.rng.lock(), candidates.len(), amount);
        let mut slots: Vec<Option<Book>> = candidates.drain(..).map(Some).collect();
        picked
            .into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .collect()
    }
}
