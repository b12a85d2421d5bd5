//! The prime ladder used to derive per-level residues.
//!
//! The product of all ten primes is 6469693230, which exceeds `u32::MAX`, so two distinct `u32`
//! keys differ in at least one residue. Every prime places nodes, so the tree has at most
//! [`PRIME_COUNT`] levels below the root.

/// Primes assigned to each depth, root first.
pub const PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Number of levels the ladder can distinguish.
pub const PRIME_COUNT: usize = PRIMES.len();

/// Deepest depth a node may sit at. The sentinel root is depth 0 and places its children with
/// `PRIMES[0]`; nodes at this depth were placed with the last prime and never get children.
pub const MAX_DEPTH: u8 = PRIME_COUNT as u8;

/// Residue of `key` against the prime assigned to `depth`. The result is always below 29, so it
/// fits a `u8`.
#[inline(always)]
pub fn residue(key: u32, depth: u8) -> u8 {
    (key % PRIMES[depth as usize]) as u8
}

/// Width of the sibling array hanging off a node at `depth`; i.e. the most children it can have.
#[inline]
pub fn width_at(depth: u8) -> usize {
    PRIMES[depth as usize] as usize
}
