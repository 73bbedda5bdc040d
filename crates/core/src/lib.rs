//! Core types for certainstore
//!
//! This crate defines the vocabulary shared by every layer:
//! - Identifiers and snapshots ([`types`])
//! - The error type and its wire codes ([`error`])
//! - State-independent request validation ([`validation`])

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;
pub mod validation;

pub use error::{Error, Result, Shortfall};
pub use types::{average_rating, Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
