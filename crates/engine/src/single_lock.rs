//! Single-lock baseline store
//!
//! One RwLock guards the whole map: every mutation is exclusive, every query
//! shared. Validation and error semantics match
//! [`TwoLevelLockingStore`](crate::TwoLevelLockingStore), which makes this
//! store the reference for behavioural and throughput comparisons.

use crate::batch::{check_restock, purchase_shortfalls};
use crate::query::{self, PickSampler};
use crate::traits::{BookStore, StockManager};
use certainstore_core::error::{Error, Result};
use certainstore_core::types::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
use certainstore_core::validation;
use certainstore_storage::BookEntry;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;

type Entries = FxHashMap<Isbn, BookEntry>;

/// Store with one global reader/writer lock
#[derive(Debug)]
pub struct SingleLockStore {
    entries: RwLock<Entries>,
    sampler: PickSampler,
}

impl SingleLockStore {
    /// Create an empty store with an entropy-seeded pick sampler
    pub fn new() -> Self {
        Self::with_options(0, None)
    }

    /// Create an empty store with pre-allocated capacity and optional seed
    pub fn with_options(capacity: usize, seed: Option<u64>) -> Self {
        SingleLockStore {
            entries: RwLock::new(FxHashMap::with_capacity_and_hasher(
                capacity,
                Default::default(),
            )),
            sampler: PickSampler::new(seed),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for SingleLockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn require<'i>(entries: &Entries, isbns: impl IntoIterator<Item = &'i Isbn>) -> Result<()> {
    for isbn in isbns {
        if !entries.contains_key(isbn) {
            return Err(Error::UnknownKey { isbn: *isbn });
        }
    }
    Ok(())
}

fn entry_mut(entries: &mut Entries, isbn: Isbn) -> Result<&mut BookEntry> {
    entries.get_mut(&isbn).ok_or(Error::UnknownKey { isbn })
}

/// Snapshots of every entry, ascending ISBN
fn sorted_snapshot(entries: &Entries) -> Vec<StockBook> {
    let mut books: Vec<StockBook> = entries.values().map(BookEntry::to_stock_book).collect();
    books.sort_unstable_by_key(|b| b.isbn);
    books
}

fn snapshot_by_keys(entries: &Entries, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
    isbns
        .iter()
        .map(|isbn| {
            entries
                .get(isbn)
                .map(BookEntry::to_stock_book)
                .ok_or(Error::UnknownKey { isbn: *isbn })
        })
        .collect()
}

impl BookStore for SingleLockStore {
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()> {
        let totals = validation::sum_copies(copies)?;

        let mut entries = self.entries.write();
        require(&entries, copies.iter().map(|c| &c.isbn))?;

        let shortfalls =
            purchase_shortfalls(&totals, |isbn| entries.get(&isbn).map(BookEntry::num_copies))?;
        if !shortfalls.is_empty() {
            for shortfall in &shortfalls {
                entry_mut(&mut entries, shortfall.isbn)?.add_sale_misses(shortfall.missing());
            }
            debug!(
                misses = shortfalls.len(),
                "purchase rejected, sale misses recorded"
            );
            return Err(Error::InsufficientStock { shortfalls });
        }

        for (&isbn, &n) in &totals {
            entry_mut(&mut entries, isbn)?.buy_copies(n);
        }
        debug!(books = totals.len(), "purchase committed");
        Ok(())
    }

    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        validation::validate_isbns(isbns)?;
        let books = snapshot_by_keys(&self.entries.read(), isbns)?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    fn get_editor_picks(&self, n: i32) -> Result<Vec<Book>> {
        let n = query::editor_pick_count(n)?;
        if n == 0 {
            return Ok(Vec::new());
        }
        let candidates: Vec<Book> = {
            let entries = self.entries.read();
            let mut picks: Vec<Book> = entries
                .values()
                .filter(|e| e.editor_pick())
                .map(BookEntry::to_book)
                .collect();
            picks.sort_unstable_by_key(|b| b.isbn);
            picks
        };
        Ok(self.sampler.sample(candidates, n))
    }

    fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        validation::validate_ratings(ratings)?;

        let mut entries = self.entries.write();
        require(&entries, ratings.iter().map(|r| &r.isbn))?;
        for rating in ratings {
            entry_mut(&mut entries, rating.isbn)?.add_rating(rating.rating);
        }
        debug!(ratings = ratings.len(), "ratings committed");
        Ok(())
    }

    fn get_top_rated_books(&self, n: i32) -> Result<Vec<Book>> {
        let n = query::top_rated_count(n)?;
        let snapshot = sorted_snapshot(&self.entries.read());
        Ok(query::top_rated(snapshot, n))
    }
}

impl StockManager for SingleLockStore {
    fn add_books(&self, books: &[StockBook]) -> Result<()> {
        validation::validate_new_books(books)?;

        let mut entries = self.entries.write();
        if let Some(book) = books.iter().find(|b| entries.contains_key(&b.isbn)) {
            return Err(Error::DuplicateKey { isbn: book.isbn });
        }
        for book in books {
            entries.insert(book.isbn, BookEntry::from_stock_book(book));
        }
        debug!(count = books.len(), total = entries.len(), "entries inserted");
        Ok(())
    }

    fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        let totals = validation::sum_copies(copies)?;

        let mut entries = self.entries.write();
        require(&entries, copies.iter().map(|c| &c.isbn))?;
        check_restock(&totals, |isbn, delta| {
            entries.get(&isbn).map(|e| e.copies_after_add(delta))
        })?;
        for (&isbn, &n) in &totals {
            entry_mut(&mut entries, isbn)?.add_copies(n);
        }
        debug!(books = totals.len(), "restock committed");
        Ok(())
    }

    fn get_books(&self) -> Result<Vec<StockBook>> {
        Ok(sorted_snapshot(&self.entries.read()))
    }

    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        validation::validate_isbns(picks.iter().map(|p| &p.isbn))?;

        let mut entries = self.entries.write();
        require(&entries, picks.iter().map(|p| &p.isbn))?;
        for pick in picks {
            entry_mut(&mut entries, pick.isbn)?.set_editor_pick(pick.editor_pick);
        }
        debug!(picks = picks.len(), "editor picks committed");
        Ok(())
    }

    fn get_stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        validation::validate_isbns(isbns)?;
        snapshot_by_keys(&self.entries.read(), isbns)
    }

    fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        let snapshot = sorted_snapshot(&self.entries.read());
        Ok(query::in_demand(snapshot))
    }

    fn remove_all_books(&self) -> Result<()> {
        let mut entries = self.entries.write();
        let removed = entries.len();
        entries.clear();
        debug!(removed, "table cleared");
        Ok(())
    }

    fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        validation::validate_isbns(isbns)?;

        let mut entries = self.entries.write();
        require(&entries, isbns)?;
        let distinct: BTreeSet<Isbn> = isbns.iter().copied().collect();
        for isbn in &distinct {
            entries.remove(isbn);
        }
        debug!(removed = distinct.len(), total = entries.len(), "entries removed");
        Ok(())
    }
}
