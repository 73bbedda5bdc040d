//! Two-level locked inventory table
//!
//! # Design
//!
//! - Structural lock: one RwLock around the whole [`Table`]. Exclusive for
//!   insert/remove/clear, shared for everything else.
//! - Entry locks: one RwLock per [`BookEntry`]. Exclusive to mutate an entry,
//!   shared to read it.
//!
//! Value mutations hold the structural lock shared (it acts as an intention
//! lock) plus exclusive entry locks, so mutations on disjoint entries run in
//! parallel while structural changes still exclude everyone. Structural
//! changes take no entry locks: holding the table exclusively already means no
//! entry guard can be alive.
//!
//! # Example
//!
//! ```
//! use certainstore_core::types::{Isbn, StockBook};
//! use certainstore_storage::{BookEntry, Inventory};
//!
//! let inventory = Inventory::new();
//! let book = StockBook::new(Isbn(7), "Dune", "Frank Herbert", 9.5, 3, false);
//! inventory.write().insert_all(vec![BookEntry::from_stock_book(&book)]).unwrap();
//!
//! let table = inventory.read();
//! let mut locks = table.lock_write("restock", [Isbn(7)]).unwrap();
//! locks.get_mut(&Isbn(7)).unwrap().add_copies(2);
//! drop(locks);
//! assert_eq!(table.lock_read("peek", [Isbn(7)]).unwrap().get(&Isbn(7)).unwrap().num_copies(), 5);
//! ```

use crate::entry::BookEntry;
use certainstore_concurrency::{GuardStack, ReadSet, WriteSet};
use certainstore_core::error::{Error, Result};
use certainstore_core::types::{Isbn, StockBook};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use rustc_hash::FxHashMap;
use tracing::debug;

/// Entry guards held for reading
pub type EntryReadSet<'a> = ReadSet<'a, Isbn, BookEntry>;

/// Entry guards held for writing
pub type EntryWriteSet<'a> = WriteSet<'a, Isbn, BookEntry>;

/// Map of entries, each behind its own lock
#[derive(Debug, Default)]
pub struct Table {
    entries: FxHashMap<Isbn, RwLock<BookEntry>>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `isbn` is present
    pub fn contains(&self, isbn: Isbn) -> bool {
        self.entries.contains_key(&isbn)
    }

    /// All identifiers, ascending
    pub fn keys(&self) -> Vec<Isbn> {
        let mut keys: Vec<Isbn> = self.entries.keys().copied().collect();
        // Sort for consistent ordering
        keys.sort_unstable();
        keys
    }

    /// Fail with [`Error::UnknownKey`] on the first absent identifier, in
    /// request order
    pub fn require<'i, I>(&self, isbns: I) -> Result<()>
    where
        I: IntoIterator<Item = &'i Isbn>,
    {
        for isbn in isbns {
            if !self.contains(*isbn) {
                return Err(Error::UnknownKey { isbn: *isbn });
            }
        }
        Ok(())
    }

    /// Lock the given entries for reading, ascending
    pub fn lock_read<I>(&self, label: &'static str, isbns: I) -> Result<EntryReadSet<'_>>
    where
        I: IntoIterator<Item = Isbn>,
    {
        GuardStack::acquire(label, isbns, |isbn| {
            self.entries.get(&isbn).map(|slot| slot.read())
        })
        .map_err(|isbn| Error::UnknownKey { isbn })
    }

    /// Lock the given entries for writing, ascending
    pub fn lock_write<I>(&self, label: &'static str, isbns: I) -> Result<EntryWriteSet<'_>>
    where
        I: IntoIterator<Item = Isbn>,
    {
        GuardStack::acquire(label, isbns, |isbn| {
            self.entries.get(&isbn).map(|slot| slot.write())
        })
        .map_err(|isbn| Error::UnknownKey { isbn })
    }

    /// Lock every entry for reading, ascending
    pub fn lock_all_read(&self, label: &'static str) -> Result<EntryReadSet<'_>> {
        self.lock_read(label, self.entries.keys().copied())
    }

    /// Consistent full snapshot of every entry, ascending
    pub fn snapshot_all(&self) -> Result<Vec<StockBook>> {
        let locks = self.lock_all_read("snapshot_all")?;
        Ok(locks.iter().map(|(_, e)| e.to_stock_book()).collect())
    }

    /// Consistent full snapshots in request order, one per requested item
    ///
    /// Fails with [`Error::UnknownKey`] on the first absent identifier.
    pub fn snapshot_by_keys(&self, isbns: &[Isbn]) -> Result<Vec<StockBook>> {
        self.require(isbns)?;
        let locks = self.lock_read("snapshot_by_keys", isbns.iter().copied())?;
        isbns
            .iter()
            .map(|isbn| {
                locks
                    .get(isbn)
                    .map(|e| e.to_stock_book())
                    .ok_or(Error::UnknownKey { isbn: *isbn })
            })
            .collect()
    }

    /// Insert new entries, all or nothing
    ///
    /// Fails with [`Error::DuplicateKey`] if any identifier is already present
    /// or repeated in `entries`; the table is then unchanged.
    pub fn insert_all(&mut self, entries: Vec<BookEntry>) -> Result<()> {
        let mut incoming: Vec<Isbn> = Vec::with_capacity(entries.len());
        for entry in &entries {
            let isbn = entry.isbn();
            if self.contains(isbn) || incoming.contains(&isbn) {
                return Err(Error::DuplicateKey { isbn });
            }
            incoming.push(isbn);
        }

        self.entries.reserve(entries.len());
        for entry in entries {
            self.entries.insert(entry.isbn(), RwLock::new(entry));
        }
        debug!(count = incoming.len(), total = self.entries.len(), "entries inserted");
        Ok(())
    }

    /// Remove entries, all or nothing
    ///
    /// Fails with [`Error::UnknownKey`] on the first absent identifier; the
    /// table is then unchanged. Repeated identifiers are removed once.
    pub fn remove_all(&mut self, isbns: &[Isbn]) -> Result<usize> {
        self.require(isbns)?;
        let removed = isbns
            .iter()
            .filter(|isbn| self.entries.remove(*isbn).is_some())
            .count();
        debug!(removed, total = self.entries.len(), "entries removed");
        Ok(removed)
    }

    /// Remove every entry
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        debug!(removed, "table cleared");
        removed
    }
}

/// The inventory: a [`Table`] behind the structural lock
#[derive(Debug, Default)]
pub struct Inventory {
    table: RwLock<Table>,
}

impl Inventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Inventory {
            table: RwLock::new(Table::with_capacity(capacity)),
        }
    }

    /// Take the structural lock shared
    ///
    /// Required before touching any entry lock.
    pub fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read()
    }

    /// Take the structural lock exclusively
    pub fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Check if the inventory is empty
    pub fn is_empty(&self) -> bool {
        self.table.read().is_empty()
    }
}
