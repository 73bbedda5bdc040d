//! Command and output types
//!
//! A [`Command`] is one engine operation in serializable form. Collection
//! arguments are optional so that a transport can represent an absent
//! collection; the executor rejects those with `NullInput`.

use certainstore_core::types::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
use serde::{Deserialize, Serialize};

/// A single engine operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // =========================================================================
    // Stock manager
    // =========================================================================
    /// Add new entries
    AddBooks {
        /// Entries to add
        #[serde(default)]
        books: Option<Vec<StockBook>>,
    },
    /// Restock existing entries
    AddCopies {
        /// Copies to add per ISBN
        #[serde(default)]
        copies: Option<Vec<BookCopy>>,
    },
    /// Full snapshots of every entry
    GetBooks,
    /// Set editor-pick flags
    UpdateEditorPicks {
        /// Flag per ISBN
        #[serde(default)]
        picks: Option<Vec<BookEditorPick>>,
    },
    /// Full snapshots of the given entries
    GetStockBooksByIsbn {
        /// Requested entries
        #[serde(default)]
        isbns: Option<Vec<Isbn>>,
    },
    /// Entries with at least one sale miss
    GetBooksInDemand,
    /// Remove every entry
    RemoveAllBooks,
    /// Remove the given entries
    RemoveBooks {
        /// Entries to remove
        #[serde(default)]
        isbns: Option<Vec<Isbn>>,
    },

    // =========================================================================
    // Book store
    // =========================================================================
    /// Buy copies
    BuyBooks {
        /// Copies to buy per ISBN
        #[serde(default)]
        copies: Option<Vec<BookCopy>>,
    },
    /// Public snapshots of the given entries
    GetBooksByIsbn {
        /// Requested entries
        #[serde(default)]
        isbns: Option<Vec<Isbn>>,
    },
    /// Sample of editor picks
    GetEditorPicks {
        /// Maximum number of picks
        n: i32,
    },
    /// Apply ratings
    RateBooks {
        /// Ratings per ISBN
        #[serde(default)]
        ratings: Option<Vec<BookRating>>,
    },
    /// Best rated entries
    GetTopRatedBooks {
        /// Number of entries
        n: i32,
    },
}

impl Command {
    /// Operation name, as used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddBooks { .. } => "add_books",
            Command::AddCopies { .. } => "add_copies",
            Command::GetBooks => "get_books",
            Command::UpdateEditorPicks { .. } => "update_editor_picks",
            Command::GetStockBooksByIsbn { .. } => "get_stock_books_by_isbn",
            Command::GetBooksInDemand => "get_books_in_demand",
            Command::RemoveAllBooks => "remove_all_books",
            Command::RemoveBooks { .. } => "remove_books",
            Command::BuyBooks { .. } => "buy_books",
            Command::GetBooksByIsbn { .. } => "get_books_by_isbn",
            Command::GetEditorPicks { .. } => "get_editor_picks",
            Command::RateBooks { .. } => "rate_books",
            Command::GetTopRatedBooks { .. } => "get_top_rated_books",
        }
    }

    /// Check if the command can change inventory state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::AddBooks { .. }
                | Command::AddCopies { .. }
                | Command::UpdateEditorPicks { .. }
                | Command::RemoveAllBooks
                | Command::RemoveBooks { .. }
                | Command::BuyBooks { .. }
                | Command::RateBooks { .. }
        )
    }
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Output {
    /// Mutation applied
    Unit,
    /// Public snapshots
    Books(Vec<Book>),
    /// Full snapshots
    StockBooks(Vec<StockBook>),
}
