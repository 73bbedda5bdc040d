//! Lock-ordering primitives for certainstore
//!
//! Operations that touch several entries take one lock per entry. To stay
//! deadlock-free every caller acquires those locks through a [`GuardStack`]:
//! - Keys are locked in ascending order, each distinct key exactly once
//! - Guards are released in reverse acquisition order
//! - Releasing a key that is not held is logged and ignored

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod guard_stack;

pub use guard_stack::{canonical_order, GuardStack, ReadSet, WriteSet};
