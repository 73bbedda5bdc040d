//! Random book generation
//!
//! Strings mix spaces (5%), digits (5%), upper-case (25%) and lower-case (65%)
//! characters; prices are uniform in `[0, 50)`.

use crate::config::{validate_editor_bias, ConfigError, RangeConfig, WorkloadConfiguration};
use certainstore_core::types::{Isbn, StockBook};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const SPACE_PROB: f32 = 0.05;
const DIGIT_PROB: f32 = 0.10;
const UPPER_PROB: f32 = 0.35;
const MAX_PRICE: f32 = 50.0;

/// Generator of random books and ISBN samples
#[derive(Debug)]
pub struct BookSetGenerator {
    rng: StdRng,
    string_range: RangeConfig,
    copies_range: RangeConfig,
    editor_bias: f32,
}

impl BookSetGenerator {
    /// Create a generator, deterministic when `seed` is given
    ///
    /// Fails with [`ConfigError::Invalid`] on an empty or non-positive range or
    /// an editor bias outside `[0, 1]`.
    pub fn new(
        string_range: RangeConfig,
        copies_range: RangeConfig,
        editor_bias: f32,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        string_range.validate("string_range", 1)?;
        copies_range.validate("copies_range", 1)?;
        validate_editor_bias(editor_bias)?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(BookSetGenerator {
            rng,
            string_range,
            copies_range,
            editor_bias,
        })
    }

    /// Create a generator from a validated workload configuration
    pub fn from_config(
        config: &WorkloadConfiguration,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(
            config.string_range,
            config.copies_range,
            config.editor_bias,
            seed,
        )
    }

    /// Uniform integer in the inclusive range
    pub fn random_in(&mut self, range: RangeConfig) -> i32 {
        self.rng.gen_range(range.low..=range.high)
    }

    fn random_char(&mut self) -> char {
        let decision: f32 = self.rng.gen();
        if decision < SPACE_PROB {
            ' '
        } else if decision < DIGIT_PROB {
            char::from(b'0' + self.rng.gen_range(0..10u8))
        } else if decision < UPPER_PROB {
            char::from(b'A' + self.rng.gen_range(0..26u8))
        } else {
            char::from(b'a' + self.rng.gen_range(0..26u8))
        }
    }

    /// Random string with a length in the configured range
    pub fn random_string(&mut self) -> String {
        let len = self.random_in(self.string_range).max(1) as usize;
        (0..len).map(|_| self.random_char()).collect()
    }

    fn random_isbn(&mut self) -> Isbn {
        Isbn(self.rng.gen_range(1..=i32::MAX))
    }

    /// `num` new books with distinct ISBNs and zeroed counters
    pub fn next_set_of_stock_books(&mut self, num: usize) -> Vec<StockBook> {
        let mut seen = BTreeSet::new();
        let mut books = Vec::with_capacity(num);
        while books.len() < num {
            let isbn = self.random_isbn();
            if !seen.insert(isbn) {
                continue;
            }
            let title = self.random_string();
            let author = self.random_string();
            let price = self.rng.gen::<f32>() * MAX_PRICE;
            let copies = self.random_in(self.copies_range);
            let editor_pick = self.rng.gen::<f32>() < self.editor_bias;
            books.push(StockBook::new(isbn, title, author, price, copies, editor_pick));
        }
        books
    }

    /// Up to `num` distinct ISBNs drawn uniformly from `isbns`
    ///
    /// Returns every input ISBN when there are at most `num` of them.
    pub fn sample_isbns(&mut self, isbns: &[Isbn], num: usize) -> Vec<Isbn> {
        if isbns.len() <= num {
            return isbns.to_vec();
        }
        index::sample(&mut self.rng, isbns.len(), num)
            .into_iter()
            .map(|i| isbns[i])
            .collect()
    }
}
