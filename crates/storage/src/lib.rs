//! Storage layer for certainstore
//!
//! This crate holds the live inventory state:
//! - BookEntry: mutable state of one title
//! - Table: FxHashMap of entries, each behind its own RwLock
//! - Inventory: the table behind the structural RwLock

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod inventory;

pub use entry::BookEntry;
pub use inventory::{EntryReadSet, EntryWriteSet, Inventory, Table};
