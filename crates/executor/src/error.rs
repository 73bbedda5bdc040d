//! Executor errors and their wire form
//!
//! All errors encode to JSON as:
//! ```json
//! {
//!   "code": "UnknownKey",
//!   "message": "ISBN 42 is not available",
//!   "details": {"isbn": 42}
//! }
//! ```

use certainstore_core::error::Error as StoreError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors returned by the executor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The store rejected the operation
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The executor produced an output of the wrong shape
    #[error("internal error: {reason}")]
    Internal {
        /// What went wrong
        reason: String,
    },
}

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable error code for the wire
    pub fn code(&self) -> &'static str {
        match self {
            Error::Store(e) => e.code(),
            Error::Internal { .. } => "Internal",
        }
    }

    /// The store error, if this is one
    pub fn as_store_error(&self) -> Option<&StoreError> {
        match self {
            Error::Store(e) => Some(e),
            Error::Internal { .. } => None,
        }
    }

    /// Convert to the wire representation
    pub fn to_wire(&self) -> WireError {
        let details = match self {
            Error::Store(StoreError::NullInput { what }) => Some(json!({ "what": what })),
            Error::Store(
                StoreError::InvalidKey { isbn }
                | StoreError::UnknownKey { isbn }
                | StoreError::DuplicateKey { isbn },
            ) => Some(json!({ "isbn": isbn })),
            Error::Store(StoreError::InvalidQuantity { isbn, quantity }) => {
                Some(json!({ "isbn": isbn, "quantity": quantity }))
            }
            Error::Store(StoreError::InvalidRating { isbn, rating }) => {
                Some(json!({ "isbn": isbn, "rating": rating }))
            }
            Error::Store(StoreError::InvalidBook { isbn, reason }) => {
                Some(json!({ "isbn": isbn, "reason": reason }))
            }
            Error::Store(StoreError::InsufficientStock { shortfalls }) => {
                let items: Vec<Value> = shortfalls
                    .iter()
                    .map(|s| {
                        json!({
                            "isbn": s.isbn,
                            "requested": s.requested,
                            "available": s.available,
                        })
                    })
                    .collect();
                Some(json!({ "shortfalls": items }))
            }
            Error::Store(StoreError::InvalidArgument(_)) | Error::Internal { .. } => None,
        };
        WireError {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

/// Wire error representation for JSON encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// The canonical error code (e.g. "UnknownKey")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl WireError {
    /// Create a wire error without details
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        WireError {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}
