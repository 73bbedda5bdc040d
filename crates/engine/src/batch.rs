//! Commit planning for multi-key mutations
//!
//! Stores lock every target entry, then run one of these planners against the
//! locked state. Planners only read; a store mutates entries only after its
//! planner returned Ok, which keeps every operation all-or-nothing.

use certainstore_core::error::{Error, Result, Shortfall};
use certainstore_core::types::Isbn;
use std::collections::BTreeMap;

/// Every purchase the stock on hand cannot cover, ascending ISBN
///
/// `stock` returns the copies in stock of a locked entry.
pub fn purchase_shortfalls<F>(totals: &BTreeMap<Isbn, i32>, mut stock: F) -> Result<Vec<Shortfall>>
where
    F: FnMut(Isbn) -> Option<i32>,
{
    let mut shortfalls = Vec::new();
    for (&isbn, &requested) in totals {
        let available = stock(isbn).ok_or(Error::UnknownKey { isbn })?;
        if requested > available {
            shortfalls.push(Shortfall {
                isbn,
                requested,
                available,
            });
        }
    }
    Ok(shortfalls)
}

/// Check that no restock overflows the stock counter
///
/// `after_add` returns the stock level of a locked entry after adding the
/// given copies, or None on overflow.
pub fn check_restock<F>(totals: &BTreeMap<Isbn, i32>, mut after_add: F) -> Result<()>
where
    F: FnMut(Isbn, i32) -> Option<Option<i32>>,
{
    for (&isbn, &delta) in totals {
        match after_add(isbn, delta) {
            None => return Err(Error::UnknownKey { isbn }),
            Some(None) => {
                return Err(Error::InvalidQuantity {
                    isbn,
                    quantity: i64::from(delta),
                })
            }
            Some(Some(_)) => {}
        }
    }
    Ok(())
}
