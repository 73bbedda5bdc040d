//! Inventory engine for certainstore
//!
//! This crate implements the store operations on top of the storage layer:
//! - TwoLevelLockingStore: structural lock plus per-entry locks
//! - SingleLockStore: one global lock, the comparison baseline
//! - BookStore / StockManager: the interfaces both stores implement
//! - StoreOptions: builder and TOML configuration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod options;
pub mod query;
pub mod single_lock;
pub mod traits;
pub mod two_level;

pub use options::{LockingMode, OptionsError, StoreOptions};
pub use single_lock::SingleLockStore;
pub use traits::{BookStore, StockManager, Store};
pub use two_level::TwoLevelLockingStore;
