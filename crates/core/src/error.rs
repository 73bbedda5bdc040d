//! Error types for inventory operations
//!
//! Every failure of an engine operation is one [`Error`] variant. Each variant
//! maps to a stable error code (see [`Error::code`]) that a transport can ship
//! unchanged.
//!
//! ## Error Codes
//!
//! | Code | Description |
//! |------|-------------|
//! | NullInput | Input collection absent |
//! | InvalidKey | Malformed ISBN |
//! | UnknownKey | Well-formed ISBN not in the inventory |
//! | DuplicateKey | ISBN already present, or repeated in one request |
//! | InvalidQuantity | Non-positive or overflowing copy count |
//! | InvalidRating | Rating outside `[0, 5]` |
//! | InvalidBook | Empty title/author or invalid price |
//! | InsufficientStock | A purchase exceeded available copies |
//! | InvalidArgument | Invalid scalar argument (e.g. result size) |

use crate::types::Isbn;
use std::fmt;
use thiserror::Error;

/// A purchase request that could not be covered by the stock on hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    /// Entry that was under-stocked
    pub isbn: Isbn,
    /// Copies requested
    pub requested: i32,
    /// Copies available when the request was validated
    pub available: i32,
}

impl Shortfall {
    /// Number of copies that could not be sold
    pub fn missing(&self) -> i64 {
        i64::from(self.requested) - i64::from(self.available)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ISBN {}: requested {}, available {}",
            self.isbn, self.requested, self.available
        )
    }
}

/// All inventory errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The request carried no collection at all
    #[error("null input: {what}")]
    NullInput {
        /// Name of the missing collection
        what: &'static str,
    },

    /// Malformed identifier
    #[error("ISBN {isbn} is invalid")]
    InvalidKey {
        /// Offending identifier
        isbn: Isbn,
    },

    /// Well-formed identifier that is not in the inventory
    #[error("ISBN {isbn} is not available")]
    UnknownKey {
        /// Offending identifier
        isbn: Isbn,
    },

    /// Identifier already present, or repeated within one request
    #[error("ISBN {isbn} is duplicated")]
    DuplicateKey {
        /// Offending identifier
        isbn: Isbn,
    },

    /// Copy count is non-positive or would overflow the stock counter
    #[error("number of copies {quantity} for ISBN {isbn} is invalid")]
    InvalidQuantity {
        /// Entry the count applies to
        isbn: Isbn,
        /// Offending count
        quantity: i64,
    },

    /// Rating outside the accepted range
    #[error("rating {rating} for ISBN {isbn} is invalid, expected between 0 and 5")]
    InvalidRating {
        /// Entry the rating applies to
        isbn: Isbn,
        /// Offending rating
        rating: i32,
    },

    /// New entry with an empty title or author, or an invalid price
    #[error("book {isbn} is invalid: {reason}")]
    InvalidBook {
        /// Entry identifier
        isbn: Isbn,
        /// What is wrong with it
        reason: &'static str,
    },

    /// At least one purchase exceeded the stock on hand
    #[error("insufficient stock for {} book(s), first: {}", .shortfalls.len(), first_shortfall(.shortfalls))]
    InsufficientStock {
        /// Every under-stocked request, in ascending ISBN order
        shortfalls: Vec<Shortfall>,
    },

    /// Invalid scalar argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

fn first_shortfall(shortfalls: &[Shortfall]) -> String {
    shortfalls
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable error code for the wire
    pub fn code(&self) -> &'static str {
        match self {
            Error::NullInput { .. } => "NullInput",
            Error::InvalidKey { .. } => "InvalidKey",
            Error::UnknownKey { .. } => "UnknownKey",
            Error::DuplicateKey { .. } => "DuplicateKey",
            Error::InvalidQuantity { .. } => "InvalidQuantity",
            Error::InvalidRating { .. } => "InvalidRating",
            Error::InvalidBook { .. } => "InvalidBook",
            Error::InsufficientStock { .. } => "InsufficientStock",
            Error::InvalidArgument(_) => "InvalidArgument",
        }
    }

    /// Check if this is an unknown-key error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownKey { .. })
    }

    /// Check if this error was caused by the shape of the request alone
    ///
    /// Such errors are independent of the inventory state: retrying the same
    /// request can never succeed.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::NullInput { .. }
                | Error::InvalidKey { .. }
                | Error::InvalidQuantity { .. }
                | Error::InvalidRating { .. }
                | Error::InvalidBook { .. }
                | Error::InvalidArgument(_)
        )
    }

    /// Check if this is a stock shortage
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, Error::InsufficientStock { .. })
    }
}
