//! Request validation shared by every store implementation
//!
//! These checks depend only on the request itself, never on inventory state,
//! so they run before any lock is taken. State-dependent checks (existence,
//! stock levels) belong to the stores.

use crate::error::{Error, Result};
use crate::types::{BookCopy, BookRating, Isbn, StockBook};
use std::collections::{BTreeMap, BTreeSet};

/// Lowest accepted rating
pub const MIN_RATING: i32 = 0;

/// Highest accepted rating
pub const MAX_RATING: i32 = 5;

/// Reject malformed identifiers
#[inline]
pub fn validate_isbn(isbn: Isbn) -> Result<()> {
    if isbn.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidKey { isbn })
    }
}

/// Reject the first malformed identifier, in request order
pub fn validate_isbns<'i, I>(isbns: I) -> Result<()>
where
    I: IntoIterator<Item = &'i Isbn>,
{
    isbns.into_iter().try_for_each(|isbn| validate_isbn(*isbn))
}

/// Reject non-positive copy counts
#[inline]
pub fn validate_copies(isbn: Isbn, num_copies: i32) -> Result<()> {
    if num_copies >= 1 {
        Ok(())
    } else {
        Err(Error::InvalidQuantity {
            isbn,
            quantity: i64::from(num_copies),
        })
    }
}

/// Reject ratings outside `[MIN_RATING, MAX_RATING]`
#[inline]
pub fn validate_rating(isbn: Isbn, rating: i32) -> Result<()> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(Error::InvalidRating { isbn, rating })
    }
}

/// Validate the shape of one new entry
pub fn validate_new_book(book: &StockBook) -> Result<()> {
    validate_isbn(book.isbn)?;
    if book.title.is_empty() {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "title is empty",
        });
    }
    if book.author.is_empty() {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "author is empty",
        });
    }
    validate_copies(book.isbn, book.num_copies)?;
    if !(book.price >= 0.0 && book.price.is_finite()) {
        return Err(Error::InvalidBook {
            isbn: book.isbn,
            reason: "price must be a non-negative number",
        });
    }
    Ok(())
}

/// Validate a batch of new entries, including repeats within the batch
pub fn validate_new_books(books: &[StockBook]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for book in books {
        validate_new_book(book)?;
        if !seen.insert(book.isbn) {
            return Err(Error::DuplicateKey { isbn: book.isbn });
        }
    }
    Ok(())
}

/// Validate copy requests and fold them into one total per ISBN
///
/// The result is keyed in ascending ISBN order, which is also the order in
/// which entry locks must be acquired. A total that does not fit the stock
/// counter is rejected as an invalid quantity.
pub fn sum_copies(copies: &[BookCopy]) -> Result<BTreeMap<Isbn, i32>> {
    let mut totals: BTreeMap<Isbn, i32> = BTreeMap::new();
    for copy in copies {
        validate_isbn(copy.isbn)?;
        validate_copies(copy.isbn, copy.num_copies)?;
        let total = totals.entry(copy.isbn).or_insert(0);
        *total = total
            .checked_add(copy.num_copies)
            .ok_or(Error::InvalidQuantity {
                isbn: copy.isbn,
                quantity: i64::from(*total) + i64::from(copy.num_copies),
            })?;
    }
    Ok(totals)
}

/// Validate rating requests
pub fn validate_ratings(ratings: &[BookRating]) -> Result<()> {
    for rating in ratings {
        validate_isbn(rating.isbn)?;
        validate_rating(rating.isbn, rating.rating)?;
    }
    Ok(())
}
