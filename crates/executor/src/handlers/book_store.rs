//! Book store command handlers

use std::sync::Arc;

use certainstore_core::types::{BookCopy, BookRating, Isbn};
use certainstore_engine::{BookStore, Store};

use super::require;
use crate::{Output, Result};

/// Handle BuyBooks command.
pub fn buy_books(store: &Arc<dyn Store>, copies: Option<Vec<BookCopy>>) -> Result<Output> {
    store.buy_books(&require(copies, "copies")?)?;
    Ok(Output::Unit)
}

/// Handle GetBooksByIsbn command.
pub fn get_books_by_isbn(store: &Arc<dyn Store>, isbns: Option<Vec<Isbn>>) -> Result<Output> {
    let books = store.get_books_by_isbn(&require(isbns, "isbns")?)?;
    Ok(Output::Books(books))
}

/// Handle GetEditorPicks command.
pub fn get_editor_picks(store: &Arc<dyn Store>, n: i32) -> Result<Output> {
    Ok(Output::Books(store.get_editor_picks(n)?))
}

/// Handle RateBooks command.
pub fn rate_books(store: &Arc<dyn Store>, ratings: Option<Vec<BookRating>>) -> Result<Output> {
    store.rate_books(&require(ratings, "ratings")?)?;
    Ok(Output::Unit)
}

/// Handle GetTopRatedBooks command.
pub fn get_top_rated_books(store: &Arc<dyn Store>, n: i32) -> Result<Output> {
    Ok(Output::Books(store.get_top_rated_books(n)?))
}
