//! Command handlers
//!
//! Each handler unwraps its arguments, calls the store and wraps the result
//! in an [`Output`](crate::Output). Absent collections are rejected here, the
//! only place they are representable.

pub mod book_store;
pub mod stock_manager;

use certainstore_core::error::Error as StoreError;

/// Unwrap a collection argument, or fail with `NullInput`
pub(crate) fn require<T>(value: Option<Vec<T>>, what: &'static str) -> Result<Vec<T>, StoreError> {
    value.ok_or(StoreError::NullInput { what })
}
