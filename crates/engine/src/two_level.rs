//! Two-level locking store
//!
//! Every operation follows the same sequence:
//!
//! ```text
//! 1. Validate the request shape (no locks held)
//! 2. Take the structural lock: exclusive to add/remove entries, shared otherwise
//! 3. Check that every key exists
//! 4. Lock every touched entry, ascending ISBN, each key once
//! 5. Plan the change against the locked state; abort on any failure
//! 6. Apply the change
//! 7. Release entry locks in reverse order, then the structural lock
//! ```
//!
//! Steps 6 and 7 are skipped on failure, except that a failed purchase still
//! records its sale misses before releasing.

use crate::batch::{check_restock, purchase_shortfalls};
use crate::query::{self, PickSampler};
use crate::traits::{BookStore, StockManager};
use certainstore_core::error::{Error, Result};
use certainstore_core::types::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
use certainstore_core::validation;
use certainstore_storage::{BookEntry, EntryWriteSet, Inventory};
use tracing::debug;

/// Store with one structural lock plus one lock per entry
///
/// Value mutations on disjoint entries run in parallel; mutations that share
/// an entry serialize on it.
///
/// # Example
///
/// ```
/// use certainstore_core::types::{BookCopy, Isbn, StockBook};
/// use certainstore_engine::{BookStore, StockManager, TwoLevelLockingStore};
///
/// let store = TwoLevelLockingStore::new();
/// store
///     .add_books(&[StockBook::new(Isbn(3044560), "Harry Potter and JUnit", "JK Unit", 10.0, 5, false)])
///     .unwrap();
/// store.buy_books(&[BookCopy::new(3044560, 1)]).unwrap();
///
/// let books = store.get_stock_books_by_isbn(&[Isbn(3044560)]).unwrap();
/// assert_eq!(books[0].num_copies, 4);
/// ```
#[derive(Debug)]
pub struct TwoLevelLockingStore {
    inventory: Inventory,
    sampler: PickSampler,
}

impl TwoLevelLockingStore {
    /// Create an empty store with an entropy-seeded pick sampler
    pub fn new() -> Self {
        Self::with_options(0, None)
    }

    /// Create an empty store with pre-allocated capacity and optional seed
    pub fn with_options(capacity: usize, seed: Option<u64>) -> Self {
        TwoLevelLockingStore {
            inventory: Inventory::with_capacity(capacity),
            sampler: PickSampler::new(seed),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }
}

impl Default for TwoLevelLockingStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The locked entry for `isbn`
fn held<'l>(locks: &'l mut EntryWriteSet<'_>, isbn: Isbn) -> Result<&'l mut BookEntry> {
    locks
        .get_mut(&isbn)
        .map(|guard| &mut **guard)
        .ok_or(Error::UnknownKey { isbn })
}

impl BookStore for TwoLevelLockingStore {
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()> {
        let totals = validation::sum_copies(copies)?;

        let table = self.inventory.read();
        table.require(copies.iter().map(|c| &c.isbn))?;
        let mut locks = table.lock_write("buy_books", totals.keys().copied())?;

        let shortfalls = purchase_shortfalls(&totals, |isbn| {
            locks.get(&isbn).map(|e| e.num_copies())
        })?;
        if !shortfalls.is_empty() {
            for shortfall in &shortfalls {
                held(&mut locks, shortfall.isbn)?.add_sale_misses(shortfall.missing());
            }
            debug!(
                misses = shortfalls.len(),
                "purchase rejected, sale misses recorded"
            );
            return Err(Error::InsufficientStock { shortfalls });
        }

        for (&isbn, &n) in &totals {
            held(&mut locks, isbn)?.buy_copies(n);
        }
        debug!(books = totals.len(), "purchase committed");
        Ok(())
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        validation::validate_isbns(isbns)?;
        let table = self.inventory.read();
        let books = table.snapshot_by_keys(isbns)?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    fn get_editor_picks(&self, n: i32) -> Result<Vec<Book>> {
        let n = query::editor_pick_count(n)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let candidates: Vec<Book> = {
            let table = self.inventory.read();
            let locks = table.lock_all_read("get_editor_picks")?;
            locks
                .iter()
                .filter(|(_, e)| e.editor_pick())
                .map(|(_, e)| e.to_book())
                .collect()
        };
        Ok(self.sampler.sample(candidates, n))
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        validation::validate_ratings(ratings)?;

        let table = self.inventory.read();
        table.require(ratings.iter().map(|r| &r.isbn))?;
        let mut locks = table.lock_write("rate_books", ratings.iter().map(|r| r.isbn))?;

        for rating in ratings {
            held(&mut locks, rating.isbn)?.add_rating(rating.rating);
        }
        debug!(ratings = ratings.len(), "ratings committed");
        Ok(())
    }

    fn get_top_rated_books(&self, n: i32) -> Result<Vec<Book>> {
        let n = query::top_rated_count(n)?;
        let snapshot = self.inventory.read().snapshot_all()?;
        Ok(query::top_rated(snapshot, n))
    }
}

impl StockManager for TwoLevelLockingStore {
    fn add_books(&self, books: &[StockBook]) -> Result<()> {
        validation::validate_new_books(books)?;
        let entries = books.iter().map(BookEntry::from_stock_book).collect();
        self.inventory.write().insert_all(entries)
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let totals = validation::sum_copies(copies)?;

        let table = self.inventory.read();
        table.require(copies.iter().map(|c| &c.isbn))?;
        let mut locks = table.lock_write("add_copies", totals.keys().copied())?;

        check_restock(&totals, |isbn, delta| {
            locks.get(&isbn).map(|e| e.copies_after_add(delta))
        })?;
        for (&isbn, &n) in &totals {
            held(&mut locks, isbn)?.add_copies(n);
        }
        debug!(books = totals.len(), "restock committed");
        Ok(())
    }

    fn get_books(&self) -> Result<Vec<StockBook>> {
        self.inventory.read().snapshot_all()
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        validation::validate_isbns(picks.iter().map(|p| &p.isbn))?;

        let table = self.inventory.read();
        table.require(picks.iter().map(|p| &p.isbn))?;
        let mut locks = table.lock_write("update_editor_picks", picks.iter().map(|p| p.isbn))?;

        for pick in picks {
            held(&mut locks, pick.isbn)?.set_editor_pick(pick.editor_pick);
        }
        debug!(picks = picks.len(), "editor picks committed");
        Ok(())
    }

    fn get_stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        validation::validate_isbns(isbns)?;
        self.inventory.read().snapshot_by_keys(isbns)
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let snapshot = self.inventory.read().snapshot_all()?;
        Ok(query::in_demand(snapshot))
    }

    fn remove_all_books(&self) -> Result<()> {
        self.inventory.write().clear();
        Ok(())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        validation::validate_isbns(isbns)?;
        self.inventory.write().remove_all(isbns).map(|_| ())
    }
}
