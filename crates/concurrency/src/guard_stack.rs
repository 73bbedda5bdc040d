//! Ordered acquisition of per-entry locks
//!
//! A [`GuardStack`] owns the guards of one operation. Keys are sorted and
//! deduplicated before any lock is taken, so two operations that lock
//! overlapping key sets always contend in the same order and can never form a
//! wait cycle.
//!
//! ## Lifecycle
//!
//! ```text
//! 1. acquire()      - lock every distinct key, ascending
//! 2. get()/get_mut()- read or mutate through the held guards
//! 3. release_all()  - drop guards in reverse order (also runs on Drop)
//! ```
//!
//! Nothing in this module knows about the protected values: the caller supplies
//! the locking function, so the same stack serves read and write guards.

use parking_lot::{RwLockReadGuard, RwLockWriteGuard};
use smallvec::SmallVec;
use std::fmt;
use tracing::{trace, warn};

/// Guards held for reading, keyed by `K`
pub type ReadSet<'a, K, T> = GuardStack<K, RwLockReadGuard<'a, T>>;

/// Guards held for writing, keyed by `K`
pub type WriteSet<'a, K, T> = GuardStack<K, RwLockWriteGuard<'a, T>>;

/// Sort and deduplicate keys into lock-acquisition order
///
/// # Examples
///
/// ```
/// use certainstore_concurrency::canonical_order;
///
/// assert_eq!(canonical_order([5, 1, 5, 3]), vec![1, 3, 5]);
/// ```
pub fn canonical_order<K, I>(keys: I) -> Vec<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut ordered: Vec<K> = keys.into_iter().collect();
    ordered.sort_unstable();
    ordered.dedup();
    ordered
}

/// Guards of one operation, held in ascending key order
///
/// Dropping the stack releases every guard in reverse acquisition order.
pub struct GuardStack<K, G>
where
    K: Ord + Copy + fmt::Debug,
{
    /// Operation name, used in log output
    label: &'static str,
    /// Held guards; keys strictly ascending
    held: SmallVec<[(K, G); 8]>,
}

impl<K, G> GuardStack<K, G>
where
    K: Ord + Copy + fmt::Debug,
{
    /// Create an empty stack
    pub fn new(label: &'static str) -> Self {
        GuardStack {
            label,
            held: SmallVec::new(),
        }
    }

    /// Lock every distinct key in ascending order
    ///
    /// `lock` is called once per distinct key and returns `None` when the key
    /// has nothing to lock. In that case every guard taken so far is released
    /// and the offending key is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use certainstore_concurrency::GuardStack;
    /// use parking_lot::RwLock;
    ///
    /// let cells: Vec<RwLock<i32>> = (0..4).map(RwLock::new).collect();
    /// let mut locks = GuardStack::acquire("bump", [3usize, 1, 3], |k| {
    ///     cells.get(k).map(|cell| cell.write())
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(locks.len(), 2);
    /// **locks.get_mut(&3).unwrap() += 10;
    /// drop(locks);
    /// assert_eq!(*cells[3].read(), 13);
    /// ```
    pub fn acquire<I, F>(label: &'static str, keys: I, mut lock: F) -> Result<Self, K>
    where
        I: IntoIterator<Item = K>,
        F: FnMut(K) -> Option<G>,
    {
        let mut stack = GuardStack::new(label);
        for key in canonical_order(keys) {
            match lock(key) {
                Some(guard) => stack.held.push((key, guard)),
                None => {
                    trace!(label, key = ?key, "acquire aborted on missing key");
                    return Err(key);
                }
            }
        }

        trace!(label, count = stack.held.len(), "locks acquired");
        Ok(stack)
    }

    /// Operation name
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Number of held guards
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Check if no guard is held
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Check if `key` is held
    pub fn holds(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    /// Held keys, ascending
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.held.iter().map(|(k, _)| *k)
    }

    /// Guard held for `key`
    pub fn get(&self, key: &K) -> Option<&G> {
        self.position(key).map(|i| &self.held[i].1)
    }

    /// Mutable guard held for `key`
    pub fn get_mut(&mut self, key: &K) -> Option<&mut G> {
        self.position(key).map(move |i| &mut self.held[i].1)
    }

    /// Held guards, ascending by key
    pub fn iter(&self) -> impl Iterator<Item = (K, &G)> + '_ {
        self.held.iter().map(|(k, g)| (*k, g))
    }

    /// Mutable held guards, ascending by key
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut G)> + '_ {
        self.held.iter_mut().map(|(k, g)| (*k, g))
    }

    /// Release the guard for `key` ahead of the others
    ///
    /// Returns false, with a warning, when `key` is not held.
    pub fn release(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(i) => {
                let (key, guard) = self.held.remove(i);
                drop(guard);
                trace!(label = self.label, key = ?key, "lock released");
                true
            }
            None => {
                warn!(label = self.label, key = ?key, "release of a lock that is not held");
                false
            }
        }
    }

    /// Release every guard in reverse acquisition order
    pub fn release_all(&mut self) {
        if self.held.is_empty() {
            return;
        }
        let count = self.held.len();
        while let Some((_, guard)) = self.held.pop() {
            drop(guard);
        }
        trace!(label = self.label, count, "locks released");
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.held.binary_search_by(|(k, _)| k.cmp(key)).ok()
    }
}

impl<K, G> Drop for GuardStack<K, G>
where
    K: Ord + Copy + fmt::Debug,
{
    fn drop(&mut self) {
        self.release_all();
    }
}

impl<K, G> fmt::Debug for GuardStack<K, G>
where
    K: Ord + Copy + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardStack")
            .field("label", &self.label)
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}
