//! Command dispatch
//!
//! The [`Executor`] is the single entry point a transport needs: it takes a
//! [`Command`], runs it against the store and returns an [`Output`] or an
//! [`Error`]. [`Executor::handle`] folds both into a serializable [`Response`].

use std::sync::Arc;

use certainstore_engine::Store;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::handlers::{book_store, stock_manager};
use crate::{Command, Output, Result, WireError};

/// Serializable outcome of one command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// The command succeeded
    Ok(Output),
    /// The command failed
    Err(WireError),
}

/// Dispatches commands to a store
#[derive(Clone)]
pub struct Executor {
    store: Arc<dyn Store>,
}

impl Executor {
    /// Create an executor over `store`
    pub fn new(store: Arc<dyn Store>) -> Self {
        Executor { store }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Execute one command
    pub fn execute(&self, command: Command) -> Result<Output> {
        let name = command.name();
        trace!(command = name, "executing");

        let result = match command {
            Command::AddBooks { books } => stock_manager::add_books(&self.store, books),
            Command::AddCopies { copies } => stock_manager::add_copies(&self.store, copies),
            Command::GetBooks => stock_manager::get_books(&self.store),
            Command::UpdateEditorPicks { picks } => {
                stock_manager::update_editor_picks(&self.store, picks)
            }
            Command::GetStockBooksByIsbn { isbns } => {
                stock_manager::get_stock_books_by_isbn(&self.store, isbns)
            }
            Command::GetBooksInDemand => stock_manager::get_books_in_demand(&self.store),
            Command::RemoveAllBooks => stock_manager::remove_all_books(&self.store),
            Command::RemoveBooks { isbns } => stock_manager::remove_books(&self.store, isbns),
            Command::BuyBooks { copies } => book_store::buy_books(&self.store, copies),
            Command::GetBooksByIsbn { isbns } => book_store::get_books_by_isbn(&self.store, isbns),
            Command::GetEditorPicks { n } => book_store::get_editor_picks(&self.store, n),
            Command::RateBooks { ratings } => book_store::rate_books(&self.store, ratings),
            Command::GetTopRatedBooks { n } => book_store::get_top_rated_books(&self.store, n),
        };

        if let Err(e) = &result {
            debug!(command = name, code = e.code(), error = %e, "command failed");
        }
        result
    }

    /// Execute one command and fold the outcome into a [`Response`]
    pub fn handle(&self, command: Command) -> Response {
        match self.execute(command) {
            Ok(output) => Response::Ok(output),
            Err(e) => Response::Err(e.to_wire()),
        }
    }

    /// Execute a JSON-encoded command, returning a JSON-encoded [`Response`]
    pub fn handle_json(&self, request: &str) -> String {
        let response = match serde_json::from_str::<Command>(request) {
            Ok(command) => self.handle(command),
            Err(e) => Response::Err(WireError::new("InvalidRequest", e.to_string())),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            serde_json::json!({
                "err": { "code": "Internal", "message": format!("response encoding failed: {e}") }
            })
            .to_string()
        })
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor").finish_non_exhaustive()
    }
}
