//! Command execution layer for certainstore
//!
//! This crate is the boundary a transport talks to:
//! - [`Command`] / [`Output`]: serializable operations and results
//! - [`Executor`]: dispatches commands to any [`Store`](certainstore_engine::Store)
//! - [`Client`]: typed method-per-operation wrapper
//! - [`WireError`]: stable `{code, message, details}` error encoding

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod command;
mod error;
mod executor;
mod handlers;


pub use client::Client;
pub use command::{Command, Output};
pub use error::{Error, Result, WireError};
pub use executor::{Executor, Response};
