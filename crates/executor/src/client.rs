//! High-level typed wrapper for the Executor.
//!
//! The [`Client`] struct wraps the [`Executor`] and the [`Command`]/[`Output`]
//! enums with typed method calls, one per store operation.
//!
//! # Example
//!
//! ```
//! use certainstore_core::types::{BookCopy, Isbn, StockBook};
//! use certainstore_engine::StoreOptions;
//! use certainstore_executor::Client;
//!
//! let client = Client::new(StoreOptions::new().open());
//! client
//!     .add_books(&[StockBook::new(Isbn(1), "Dune", "Frank Herbert", 9.5, 3, true)])
//!     .unwrap();
//! client.buy_books(&[BookCopy::new(1, 2)]).unwrap();
//! assert_eq!(client.get_books().unwrap()[0].num_copies, 1);
//! ```

use std::sync::Arc;

use certainstore_core::types::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
use certainstore_engine::Store;

use crate::{Command, Error, Executor, Output, Result};

/// Typed access to a store through the command boundary
///
/// Each method:
///
/// 1. Creates the appropriate [`Command`]
/// 2. Executes it via the [`Executor`]
/// 3. Extracts and returns the typed result
#[derive(Debug, Clone)]
pub struct Client {
    executor: Executor,
}

fn unexpected(command: &str) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {command}"),
    }
}

impl Client {
    /// Create a client over `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Client {
            executor: Executor::new(store),
        }
    }

    /// Get the underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    fn unit(&self, command: Command) -> Result<()> {
        let name = command.name();
        match self.executor.execute(command)? {
            Output::Unit => Ok(()),
            _ => Err(unexpected(name)),
        }
    }

    fn books(&self, command: Command) -> Result<Vec<Book>> {
        let name = command.name();
        match self.executor.execute(command)? {
            Output::Books(books) => Ok(books),
            _ => Err(unexpected(name)),
        }
    }

    fn stock_books(&self, command: Command) -> Result<Vec<StockBook>> {
        let name = command.name();
        match self.executor.execute(command)? {
            Output::StockBooks(books) => Ok(books),
            _ => Err(unexpected(name)),
        }
    }

    // =========================================================================
    // Stock manager
    // =========================================================================

    /// Add new entries.
    pub fn add_books(&self, books: &[StockBook]) -> Result<()> {
        self.unit(Command::AddBooks {
            books: Some(books.to_vec()),
        })
    }

    /// Restock existing entries.
    pub fn add_copies(&self, copies: &[BookCopy]) -> Result<()> {
        self.unit(Command::AddCopies {
            copies: Some(copies.to_vec()),
        })
    }

    /// Full snapshots of every entry.
    pub fn get_books(&self) -> Result<Vec<StockBook>> {
        self.stock_books(Command::GetBooks)
    }

    /// Set editor-pick flags.
    pub fn update_editor_picks(&self, picks: &[BookEditorPick]) -> Result<()> {
        self.unit(Command::UpdateEditorPicks {
            picks: Some(picks.to_vec()),
        })
    }

    /// Full snapshots of the given entries.
    pub fn get_stock_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.stock_books(Command::GetStockBooksByIsbn {
            isbns: Some(isbns.to_vec()),
        })
    }

    /// Entries with at least one sale miss.
    pub fn get_books_in_demand(&self) -> Result<Vec<StockBook>> {
        self.stock_books(Command::GetBooksInDemand)
    }

    /// Remove every entry.
    pub fn remove_all_books(&self) -> Result<()> {
        self.unit(Command::RemoveAllBooks)
    }

    /// Remove the given entries.
    pub fn remove_books(&self, isbns: &[Isbn]) -> Result<()> {
        self.unit(Command::RemoveBooks {
            isbns: Some(isbns.to_vec()),
        })
    }

    // =========================================================================
    // Book store
    // =========================================================================

    /// Buy copies.
    pub fn buy_books(&self, copies: &[BookCopy]) -> Result<()> {
        self.unit(Command::BuyBooks {
            copies: Some(copies.to_vec()),
        })
    }

    /// Public snapshots of the given entries.
    pub fn get_books_by_isbn(&self, isbns: &[Isbn]) -> Result<Vec<Book>> {
        self.books(Command::GetBooksByIsbn {
            isbns: Some(isbns.to_vec()),
        })
    }

    /// Sample of up to `n` editor picks.
    pub fn get_editor_picks(&self, n: i32) -> Result<Vec<Book>> {
        self.books(Command::GetEditorPicks { n })
    }

    /// Apply ratings.
    pub fn rate_books(&self, ratings: &[BookRating]) -> Result<()> {
        self.unit(Command::RateBooks {
            ratings: Some(ratings.to_vec()),
        })
    }

    /// The `n` best rated entries.
    pub fn get_top_rated_books(&self, n: i32) -> Result<Vec<Book>> {
        self.books(Command::GetTopRatedBooks { n })
    }
}
