//! Core types for the bookstore inventory
//!
//! This module defines the values that cross the engine boundary:
//! - [`Isbn`]: Identifier of an inventory entry
//! - [`StockBook`]: Full snapshot of an entry (also the shape of new entries)
//! - [`Book`]: Public snapshot of an entry
//! - [`BookCopy`], [`BookRating`], [`BookEditorPick`]: Per-key request items
//!
//! Snapshots are plain owned copies. Callers never hold references into live
//! entry state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an inventory entry
///
/// An ISBN is well-formed iff it is strictly positive. Malformed identifiers
/// are representable so that request validation can reject them explicitly.
///
/// # Examples
///
/// ```
/// use certainstore_core::types::Isbn;
///
/// assert!(Isbn(3044560).is_valid());
/// assert!(!Isbn(0).is_valid());
/// assert!(!Isbn(-1).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Isbn(pub i32);

impl Isbn {
    /// Check whether the identifier is well-formed
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 > 0
    }

    /// Raw integer value
    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for Isbn {
    fn from(value: i32) -> Self {
        Isbn(value)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Average of `total` over `count`, or 0 when nothing was rated yet
pub fn average_rating(total: i64, count: i64) -> f32 {
    if count > 0 {
        (total as f64 / count as f64) as f32
    } else {
        0.0
    }
}

/// Full snapshot of an inventory entry
///
/// Returned by stock-manager queries, and used as the input shape when adding
/// new entries (only identity, price, copies and the editor-pick flag are read
/// from a new entry; counters always start at zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBook {
    /// Entry identifier
    pub isbn: Isbn,
    /// Title, non-empty
    pub title: String,
    /// Author, non-empty
    pub author: String,
    /// Unit price, never negative
    pub price: f32,
    /// Copies currently in stock
    pub num_copies: i32,
    /// Copies requested by buyers while out of stock
    pub num_sale_misses: i64,
    /// Number of ratings applied
    pub num_times_rated: i64,
    /// Sum of all ratings applied
    pub total_rating: i64,
    /// Editor-pick flag
    pub editor_pick: bool,
}

impl StockBook {
    /// Create a fresh entry description with zeroed counters
    ///
    /// # Examples
    ///
    /// ```
    /// use certainstore_core::types::{Isbn, StockBook};
    ///
    /// let book = StockBook::new(Isbn(3044560), "Harry Potter and JUnit", "JK Unit", 10.0, 5, false);
    /// assert_eq!(book.num_copies, 5);
    /// assert_eq!(book.average_rating(), 0.0);
    /// ```
    pub fn new(
        isbn: Isbn,
        title: impl Into<String>,
        author: impl Into<String>,
        price: f32,
        num_copies: i32,
        editor_pick: bool,
    ) -> Self {
        Self {
            isbn,
            title: title.into(),
            author: author.into(),
            price,
            num_copies,
            num_sale_misses: 0,
            num_times_rated: 0,
            total_rating: 0,
            editor_pick,
        }
    }

    /// Average rating, 0 when never rated
    pub fn average_rating(&self) -> f32 {
        average_rating(self.total_rating, self.num_times_rated)
    }

    /// Project onto the public view
    pub fn to_book(&self) -> Book {
        Book {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            editor_pick: self.editor_pick,
        }
    }
}

/// Public snapshot of an inventory entry
///
/// Exposes only non-sensitive catalogue facts: no stock levels, sale misses or
/// rating data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Entry identifier
    pub isbn: Isbn,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Unit price
    pub price: f32,
    /// Editor-pick flag
    pub editor_pick: bool,
}

impl From<StockBook> for Book {
    fn from(book: StockBook) -> Self {
        Book {
            isbn: book.isbn,
            title: book.title,
            author: book.author,
            price: book.price,
            editor_pick: book.editor_pick,
        }
    }
}

/// A number of copies of one entry, used by restocking and buying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookCopy {
    /// Entry identifier
    pub isbn: Isbn,
    /// Number of copies, must be at least 1
    pub num_copies: i32,
}

impl BookCopy {
    /// Create a copy request
    pub fn new(isbn: impl Into<Isbn>, num_copies: i32) -> Self {
        Self {
            isbn: isbn.into(),
            num_copies,
        }
    }
}

/// A single rating of one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookRating {
    /// Entry identifier
    pub isbn: Isbn,
    /// Rating, must lie in `[MIN_RATING, MAX_RATING]`
    ///
    /// [`MIN_RATING`]: crate::validation::MIN_RATING
    /// [`MAX_RATING`]: crate::validation::MAX_RATING
    pub rating: i32,
}

impl BookRating {
    /// Create a rating request
    pub fn new(isbn: impl Into<Isbn>, rating: i32) -> Self {
        Self {
            isbn: isbn.into(),
            rating,
        }
    }
}

/// Editor-pick flag update for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookEditorPick {
    /// Entry identifier
    pub isbn: Isbn,
    /// New flag value
    pub editor_pick: bool,
}

impl BookEditorPick {
    /// Create an editor-pick update
    pub fn new(isbn: impl Into<Isbn>, editor_pick: bool) -> Self {
        Self {
            isbn: isbn.into(),
            editor_pick,
        }
    }
}
