//! Store interfaces
//!
//! [`BookStore`] is the customer side, [`StockManager`] the administration
//! side. Both are implemented by every store variant and are object safe, so
//! callers hold an `Arc<dyn Store>` without caring which locking scheme sits
//! behind it.
//!
//! Every operation is atomic with respect to the others: a failed call leaves
//! the inventory unchanged, with one exception. A purchase that fails with
//! [`Error::InsufficientStock`](certainstore_core::Error::InsufficientStock)
//! still records the shortfall in each under-stocked entry's sale-miss counter.

use certainstore_core::error::Result;
use certainstore_core::types::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};

/// Customer-facing operations
pub trait BookStore: Send + Sync {
    /// Buy copies, all or nothing
    ///
    /// Quantities for a repeated ISBN are summed.
    fn buy_books(&self, copies: &[BookCopy]) -> Result<()>;

    /// Public snapshots of the given entries, in request order
    fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<Book>>;

    /// Up to `n` editor picks, sampled uniformly without replacement
    fn get_editor_picks(&self, n: i32) -> Result<Vec<Book>>;

    /// Apply ratings, all or nothing
    ///
    /// Every item is applied, including repeats of the same ISBN.
    fn rate_books(&self, ratings: &[BookRating]) -> Result<()>;

    /// The `n` best rated entries, highest average first
    ///
    /// Ties are broken by ascending ISBN.
    fn get_top_rated_books(&self, n: i32) -> Result<Vec<Book>>;
}

/// Administration operations
pub trait StockManager: Send + Sync {
    /// Add new entries, all or nothing
    fn add_books(&self, books: &[StockBook]) -> Result<()>;

    /// Restock existing entries, all or nothing
    fn add_copies(&self, copies: &[BookCopy]) -> Result<()>;

    /// Full snapshots of every entry, ascending ISBN
    fn get_books(&self) -> Result<Vec<StockBook>>;

    /// Set editor-pick flags, all or nothing
    ///
    /// The last update for a repeated ISBN wins.
    fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()>;

    /// Full snapshots of the given entries, in request order
    fn get_stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>>;

    /// Full snapshots of entries with at least one sale miss, ascending ISBN
    fn get_books_in_demand(&self) -> Result<Vec<StockBook>>;

    /// Remove every entry
    fn remove_all_books(&self) -> Result<()>;

    /// Remove the given entries, all or nothing
    fn remove_books(&self, isbns: &[Isbn]) -> Result<()>;
}

/// A complete store: both interfaces behind one object
pub trait Store: BookStore + StockManager {}

impl<T: BookStore + StockManager> Store for T {}
