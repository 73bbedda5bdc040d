//! Store configuration
//!
//! Use the builder to configure a store in code, or read the same options from
//! TOML:
//!
//! ```
//! use certainstore_engine::{LockingMode, StoreOptions};
//!
//! let opts = StoreOptions::new().locking(LockingMode::SingleLock).seed(7);
//! let from_file = StoreOptions::from_toml_str("locking = \"single_lock\"\nseed = 7").unwrap();
//! assert_eq!(opts, from_file);
//! ```

use crate::single_lock::SingleLockStore;
use crate::traits::Store;
use crate::two_level::TwoLevelLockingStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Locking scheme of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockingMode {
    /// Structural lock plus one lock per entry
    TwoLevel,
    /// One global lock
    SingleLock,
}

impl Default for LockingMode {
    fn default() -> Self {
        LockingMode::TwoLevel
    }
}

impl fmt::Display for LockingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockingMode::TwoLevel => write!(f, "two_level"),
            LockingMode::SingleLock => write!(f, "single_lock"),
        }
    }
}

impl FromStr for LockingMode {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "two_level" | "two-level" => Ok(LockingMode::TwoLevel),
            "single_lock" | "single-lock" => Ok(LockingMode::SingleLock),
            other => Err(OptionsError::UnknownLockingMode(other.to_string())),
        }
    }
}

/// Errors reading store options
#[derive(Debug, Error)]
pub enum OptionsError {
    /// TOML could not be parsed into options
    #[error("invalid store options: {0}")]
    Toml(#[from] toml::de::Error),

    /// Unrecognised locking mode name
    #[error("unknown locking mode '{0}', expected two_level or single_lock")]
    UnknownLockingMode(String),
}

/// Options for opening a store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Locking scheme
    pub locking: LockingMode,
    /// Expected number of entries, pre-allocated up front
    pub capacity: usize,
    /// Seed for editor-pick sampling; entropy when absent
    pub seed: Option<u64>,
}

impl StoreOptions {
    /// Default options: two-level locking, no pre-allocation, entropy seed
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the locking scheme
    pub fn locking(mut self, mode: LockingMode) -> Self {
        self.locking = mode;
        self
    }

    /// Set the expected number of entries
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Make editor-pick sampling deterministic
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse options from TOML; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        Ok(toml::from_str(s)?)
    }

    /// Open an empty store with these options
    pub fn open(&self) -> Arc<dyn Store> {
        debug!(
            locking = %self.locking,
            capacity = self.capacity,
            seeded = self.seed.is_some(),
            "opening store"
        );
        match self.locking {
            LockingMode::TwoLevel => Arc::new(TwoLevelLockingStore::with_options(
                self.capacity,
                self.seed,
            )),
            LockingMode::SingleLock => {
                Arc::new(SingleLockStore::with_options(self.capacity, self.seed))
            }
        }
    }
}
