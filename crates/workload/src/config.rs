//! Workload configuration
//!
//! Defaults describe the reference workload: 1000 seeded titles, 10% rare
//! stock-manager interactions, 30% frequent stock-manager interactions and the
//! rest customer interactions. Any subset of the fields can be overridden from
//! TOML:
//!
//! ```toml
//! warm_up_runs = 50
//! num_actual_runs = 200
//! percent_rare_stock_manager_interaction = 5.0
//!
//! [copies_range]
//! low = 1
//! high = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The file is not valid TOML for this configuration
    #[error("invalid workload configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid workload configuration: {0}")]
    Invalid(String),
}

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Lowest value
    pub low: i32,
    /// Highest value
    pub high: i32,
}

impl RangeConfig {
    /// Create a range
    pub const fn new(low: i32, high: i32) -> Self {
        RangeConfig { low, high }
    }

    pub(crate) fn validate(&self, name: &str, min: i32) -> Result<(), ConfigError> {
        if self.low < min || self.high < self.low {
            return Err(ConfigError::Invalid(format!(
                "{name} must satisfy {min} <= low <= high, got {}..={}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_editor_bias(editor_bias: f32) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&editor_bias) {
        return Err(ConfigError::Invalid(format!(
            "editor_bias must lie in [0, 1], got {editor_bias}"
        )));
    }
    Ok(())
}

/// Length range of generated titles and authors
pub const STRING_RANGE: RangeConfig = RangeConfig::new(25, 50);

/// Range of initial copies of generated books
pub const COPIES_RANGE: RangeConfig = RangeConfig::new(1, 25);

/// Probability that a generated book is an editor pick
pub const EDITOR_BIAS: f32 = 0.1;

/// Parameters of one worker's run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadConfiguration {
    /// Distinct books bought per customer interaction
    pub num_books_to_buy: usize,
    /// Copies bought of each book
    pub num_book_copies_to_buy: i32,
    /// Editor picks fetched per customer interaction
    pub num_editor_picks_to_get: i32,
    /// Copies added per restocked book
    pub num_add_copies: i32,
    /// New books generated per rare stock-manager interaction
    pub num_books_to_add: usize,
    /// Books restocked per frequent stock-manager interaction
    pub num_books_with_least_copies: usize,
    /// Unmeasured runs before measurement starts
    pub warm_up_runs: usize,
    /// Measured runs
    pub num_actual_runs: usize,
    /// Share of rare stock-manager interactions, in percent
    pub percent_rare_stock_manager_interaction: f32,
    /// Share of frequent stock-manager interactions, in percent
    pub percent_frequent_stock_manager_interaction: f32,
    /// Length range of generated strings
    pub string_range: RangeConfig,
    /// Range of generated copy counts
    pub copies_range: RangeConfig,
    /// Probability that a generated book is an editor pick
    pub editor_bias: f32,
    /// Books added to the store before the workers start
    pub initial_books: usize,
    /// Seed for every random choice; entropy when absent
    pub seed: Option<u64>,
}

impl Default for WorkloadConfiguration {
    fn default() -> Self {
        WorkloadConfiguration {
            num_books_to_buy: 5,
            num_book_copies_to_buy: 1,
            num_editor_picks_to_get: 10,
            num_add_copies: 10,
            num_books_to_add: 5,
            num_books_with_least_copies: 5,
            warm_up_runs: 100,
            num_actual_runs: 500,
            percent_rare_stock_manager_interaction: 10.0,
            percent_frequent_stock_manager_interaction: 30.0,
            string_range: STRING_RANGE,
            copies_range: COPIES_RANGE,
            editor_bias: EDITOR_BIAS,
            initial_books: 1000,
            seed: None,
        }
    }
}

impl WorkloadConfiguration {
    /// Reference configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a configuration; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: WorkloadConfiguration = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rare = self.percent_rare_stock_manager_interaction;
        let frequent = self.percent_frequent_stock_manager_interaction;
        if !(0.0..=100.0).contains(&rare)
            || !(0.0..=100.0).contains(&frequent)
            || rare + frequent > 100.0
        {
            return Err(ConfigError::Invalid(format!(
                "interaction percentages must lie in [0, 100] and sum to at most 100, got {rare} and {frequent}"
            )));
        }
        validate_editor_bias(self.editor_bias)?;
        self.string_range.validate("string_range", 1)?;
        self.copies_range.validate("copies_range", 1)?;
        if self.num_book_copies_to_buy < 1 || self.num_add_copies < 1 {
            return Err(ConfigError::Invalid(
                "num_book_copies_to_buy and num_add_copies must be positive".into(),
            ));
        }
        if self.num_editor_picks_to_get < 0 {
            return Err(ConfigError::Invalid(
                "num_editor_picks_to_get must not be negative".into(),
            ));
        }
        Ok(())
    }
}
