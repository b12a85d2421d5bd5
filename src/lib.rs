//! An in-memory multiway tree keyed by `u32`. A node at depth `d` files its children by
//! `key % PRIMES[d]` over the first ten primes; a key whose slot is taken moves down a level.
//! The tree is not synchronized.

pub use crate::error::{HashTreeError, Result};
pub use crate::item::{Item, Keyed};
pub use crate::iter::Iter;
pub use crate::stats::{DepthStats, TreeStats};
pub use crate::tree::{HashTree, Put};

pub mod error;
pub mod item;
pub mod iter;
mod mapping;
mod node;
pub mod primes;
pub mod stats;
pub mod tree;

#[cfg(test)]
mod proptests;
