//! # certainstore
//!
//! Concurrent in-memory bookstore inventory with two-level locking.
//!
//! certainstore keeps a keyed table of books and serves two interfaces over it:
//! [`BookStore`] for customers (buy, browse, rate) and [`StockManager`] for
//! the shop owner (add titles, restock, curate editor picks, inspect demand).
//! Every multi-entry operation is all-or-nothing.
//!
//! ## Quick Start
//!
//! ```
//! use certainstore::prelude::*;
//!
//! let store = certainstore::open();
//! store.add_books(&[StockBook::new(Isbn(3044560), "Harry Potter and JUnit", "JK Unit", 10.0, 5, true)])?;
//! store.buy_books(&[BookCopy::new(3044560, 2)])?;
//!
//! let stock = store.get_stock_books_by_isbn(&[Isbn(3044560)])?;
//! assert_eq!(stock[0].num_copies, 3);
//! # Ok::<(), certainstore::Error>(())
//! ```
//!
//! ## Locking
//!
//! The default [`TwoLevelLockingStore`] takes a table-wide lock in shared mode
//! for every value operation and in exclusive mode only to add or remove
//! entries. Value operations then lock just the entries they touch, in
//! ascending ISBN order, so purchases and restocks on disjoint books run in
//! parallel. [`SingleLockStore`] guards the whole table with one lock and is
//! kept as a baseline; pick one with [`StoreOptions::locking`].
//!
//! ## Layers
//!
//! - [`executor`]: serializable [`Command`](executor::Command) boundary and typed
//!   [`Client`](executor::Client)
//! - [`workload`]: synthetic multi-threaded workload and metrics

#![warn(missing_docs)]

use std::sync::Arc;

pub mod prelude;

pub use certainstore_core::{
    average_rating, Book, BookCopy, BookEditorPick, BookRating, Error, Isbn, Result, Shortfall,
    StockBook,
};
pub use certainstore_engine::{
    BookStore, LockingMode, OptionsError, SingleLockStore, StockManager, Store, StoreOptions,
    TwoLevelLockingStore,
};

pub use certainstore_executor as executor;
pub use certainstore_workload as workload;

/// Open a store with default options (two-level locking, entropy-seeded picks)
pub fn open() -> Arc<dyn Store> {
    StoreOptions::new().open()
}
