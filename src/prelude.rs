//! Convenient imports for certainstore.
//!
//! ```
//! use certainstore::prelude::*;
//!
//! let store = StoreOptions::new().locking(LockingMode::SingleLock).open();
//! assert!(store.get_books()?.is_empty());
//! # Ok::<(), certainstore::Error>(())
//! ```

// Interfaces and construction
pub use crate::{BookStore, LockingMode, StockManager, Store, StoreOptions};

// Error handling
pub use crate::{Error, Result};

// Request and snapshot types
pub use crate::{Book, BookCopy, BookEditorPick, BookRating, Isbn, StockBook};
