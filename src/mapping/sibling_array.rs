use std::ops::{Index, IndexMut};

use crate::mapping::Remainder;

/// Outcome of a binary search over a [`SiblingArray`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Seek {
    /// A child with the searched remainder sits at this index.
    Found(usize),
    /// No child matched. Carries the right-hand boundary the search stopped at, which
    /// [`SiblingArray::place`] uses to decide between appending and inserting.
    Vacant(usize),
}

/// Children of a node, kept sorted ascending by remainder.
///
/// Unlike the fixed-width keyed mappings a radix node would use, slots are only allocated for
/// children that exist, so every slot holds a live node. Lookup is a binary search over the
/// remainders; insertion and deletion shift the neighbours to keep the order. The fan-out is
/// bounded by the prime at the owning node's depth (at most 29), so the shifting is cheap.
///
/// Remainders are assumed unique. Nothing here checks it: the tree only ever places a child
/// after a search for its remainder came back [`Seek::Vacant`].
pub struct SiblingArray<N> {
    children: Vec<N>,
}

impl<N> Default for SiblingArray<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> SiblingArray<N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.children.capacity()
    }

    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut N> {
        self.children.first_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[N] {
        &self.children
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.children.iter()
    }

    /// Insert `node` at `idx`, shifting everything at and after `idx` one slot to the right.
    pub fn insert_at(&mut self, idx: usize, node: N) {
        self.children.insert(idx, node);
    }

    /// Remove and return the node at `idx`, shifting everything after it one slot to the left.
    pub fn delete_at(&mut self, idx: usize) -> N {
        self.children.remove(idx)
    }
}

impl<N: Remainder> SiblingArray<N> {
    /// Binary search for the child holding `remainder`.
    pub fn search(&self, remainder: u8) -> Seek {
        if self.children.is_empty() {
            return Seek::Vacant(0);
        }

        let mut left = 0;
        let mut right = self.children.len() - 1;
        while left < right {
            let mid = (left + right) >> 1;
            if remainder > self.children[mid].remainder() {
                left = mid + 1;
            } else {
                right = mid;
            }
        }

        if self.children[left].remainder() == remainder {
            Seek::Found(left)
        } else {
            Seek::Vacant(right)
        }
    }

    /// Place a new child using the boundary from a [`Seek::Vacant`] search, returning the index it
    /// landed at. The search stops at the last slot when the remainder is larger than every
    /// existing one, in which case the node is appended instead.
    pub fn place(&mut self, right: usize, node: N) -> usize {
        let remainder = node.remainder();
        let last = self.children.len().wrapping_sub(1);
        if self.children.is_empty()
            || (right == last && remainder >= self.children[right].remainder())
        {
            self.children.push(node);
            self.children.len() - 1
        } else {
            self.insert_at(right, node);
            right
        }
    }
}

impl<N> Index<usize> for SiblingArray<N> {
    type Output = N;

    fn index(&self, idx: usize) -> &N {
        &self.children[idx]
    }
}

impl<N> IndexMut<usize> for SiblingArray<N> {
    fn index_mut(&mut self, idx: usize) -> &mut N {
        &mut self.children[idx]
    }
}

impl<'a, N> IntoIterator for &'a SiblingArray<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}
