//! Stock manager command handlers

use std::sync::Arc;

use certainstore_core::types::{BookCopy, BookEditorPick, Isbn, StockBook};
use certainstore_engine::{StockManager, Store};

use super::require;
use crate::{Output, Result};

/// Handle AddBooks command.
pub fn add_books(store: &Arc<dyn Store>, books: Option<Vec<StockBook>>) -> Result<Output> {
    store.add_books(&require(books, "books")?)?;
    Ok(Output::Unit)
}

/// Handle AddCopies command.
pub fn add_copies(store: &Arc<dyn Store>, copies: Option<Vec<BookCopy>>) -> Result<Output> {
    store.add_copies(&require(copies, "copies")?)?;
    Ok(Output::Unit)
}

/// Handle GetBooks command.
pub fn get_books(store: &Arc<dyn Store>) -> Result<Output> {
    Ok(Output::StockBooks(store.get_books()?))
}

/// Handle UpdateEditorPicks command.
pub fn update_editor_picks(
    store: &Arc<dyn Store>,
    picks: Option<Vec<BookEditorPick>>,
) -> Result<Output> {
    store.update_editor_picks(&require(picks, "editor picks")?)?;
    Ok(Output::Unit)
}

/// Handle GetStockBooksByIsbn command.
pub fn get_stock_books_by_isbn(
    store: &Arc<dyn Store>,
    isbns: Option<Vec<Isbn>>,
) -> Result<Output> {
    let books = store.get_stock_books_by_isbn(&require(isbns, "isbns")?)?;
    Ok(Output::StockBooks(books))
}

/// Handle GetBooksInDemand command.
pub fn get_books_in_demand(store: &Arc<dyn Store>) -> Result<Output> {
    Ok(Output::StockBooks(store.get_books_in_demand()?))
}

/// Handle RemoveAllBooks command.
pub fn remove_all_books(store: &Arc<dyn Store>) -> Result<Output> {
    store.remove_all_books()?;
    Ok(Output::Unit)
}

/// Handle RemoveBooks command.
pub fn remove_books(store: &Arc<dyn Store>, isbns: Option<Vec<Isbn>>) -> Result<Output> {
    store.remove_books(&require(isbns, "isbns")?)?;
    Ok(Output::Unit)
}
