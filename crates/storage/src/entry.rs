//! Live state of one inventory entry
//!
//! A [`BookEntry`] is only ever reached through its per-entry lock. Mutators
//! assume the caller already validated the change (see [`BookEntry::copies_after_add`]
//! and [`BookEntry::num_copies`]), so a commit phase never fails halfway.

use certainstore_core::types::{average_rating, Book, Isbn, StockBook};

/// Mutable state of one title
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    isbn: Isbn,
    title: String,
    author: String,
    price: f32,
    num_copies: i32,
    num_sale_misses: i64,
    num_times_rated: i64,
    total_rating: i64,
    editor_pick: bool,
}

impl BookEntry {
    /// Build a fresh entry from a new-book description
    ///
    /// Counters in `book` are ignored: a new entry has no sale misses and no
    /// ratings.
    pub fn from_stock_book(book: &StockBook) -> Self {
        BookEntry {
            isbn: book.isbn,
            title: book.title.clone(),
            author: book.author.clone(),
            price: book.price,
            num_copies: book.num_copies,
            num_sale_misses: 0,
            num_times_rated: 0,
            total_rating: 0,
            editor_pick: book.editor_pick,
        }
    }

    /// Entry identifier
    #[inline]
    pub fn isbn(&self) -> Isbn {
        self.isbn
    }

    /// Copies in stock
    #[inline]
    pub fn num_copies(&self) -> i32 {
        self.num_copies
    }

    /// Copies requested while out of stock
    #[inline]
    pub fn num_sale_misses(&self) -> i64 {
        self.num_sale_misses
    }

    /// Number of ratings applied
    #[inline]
    pub fn num_times_rated(&self) -> i64 {
        self.num_times_rated
    }

    /// Sum of all ratings applied
    #[inline]
    pub fn total_rating(&self) -> i64 {
        self.total_rating
    }

    /// Editor-pick flag
    #[inline]
    pub fn editor_pick(&self) -> bool {
        self.editor_pick
    }

    /// Average rating, 0 when never rated
    pub fn average_rating(&self) -> f32 {
        average_rating(self.total_rating, self.num_times_rated)
    }

    /// Stock level after adding `n` copies, or None on overflow
    pub fn copies_after_add(&self, n: i32) -> Option<i32> {
        self.num_copies.checked_add(n)
    }

    /// Add copies; the caller checked [`copies_after_add`](Self::copies_after_add)
    pub fn add_copies(&mut self, n: i32) {
        self.num_copies = self.num_copies.saturating_add(n);
    }

    /// Remove sold copies; the caller checked `n <= num_copies`
    pub fn buy_copies(&mut self, n: i32) {
        debug_assert!(n <= self.num_copies, "sold more copies than in stock");
        self.num_copies = (self.num_copies - n).max(0);
    }

    /// Record copies that were requested but not in stock
    pub fn add_sale_misses(&mut self, n: i64) {
        self.num_sale_misses = self.num_sale_misses.saturating_add(n);
    }

    /// Apply one rating
    pub fn add_rating(&mut self, rating: i32) {
        self.total_rating = self.total_rating.saturating_add(i64::from(rating));
        self.num_times_rated = self.num_times_rated.saturating_add(1);
    }

    /// Set the editor-pick flag
    pub fn set_editor_pick(&mut self, editor_pick: bool) {
        self.editor_pick = editor_pick;
    }

    /// Owned full snapshot
    pub fn to_stock_book(&self) -> StockBook {
        StockBook {
            isbn: self.isbn,
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            num_copies: self.num_copies,
            num_sale_misses: self.num_sale_misses,
            num_times_rated: self.num_times_rated,
            total_rating: self.total_rating,
            editor_pick: self.editor_pick,
        }
    }

    /// Owned public snapshot
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
