//! The hash tree itself.

use std::fmt::{self, Debug};

use crate::error::{HashTreeError, Result};
use crate::item::Item;
use crate::iter::Iter;
use crate::mapping::sibling_array::{Seek, SiblingArray};
use crate::node::Node;
use crate::primes::{residue, MAX_DEPTH, PRIME_COUNT};

/// Prime-residue hash tree. Puts never overwrite; deleting an inner node promotes the leaf at
/// the end of its first-child chain into its slot.
///
/// ```rust
/// use htree::HashTree;
///
/// let mut tree: HashTree<u32> = (0..10).collect();
/// assert_eq!(tree.get(&7u32), Some(&7));
/// assert_eq!(tree.put(7u32), Some(&7));
/// assert_eq!(tree.conflicts(), 1);
/// assert_eq!(tree.delete(&0u32), Some(0));
/// ```
pub struct HashTree<T> {
    /// Children of the sentinel root, which sits at depth 0 and holds no item.
    pub(crate) root: SiblingArray<Node<T>>,
    length: usize,
    conflicts: usize,
}

/// Outcome of a successful [`HashTree::try_put`].
#[derive(Debug, PartialEq, Eq)]
pub enum Put<'a, T> {
    /// A new node was created for the item.
    Inserted(&'a T),
    /// An item with the same key was already present. The new item was dropped and the stored
    /// one is returned untouched.
    Conflict(&'a T),
}

impl<'a, T> Put<'a, T> {
    /// The item stored under the key after the put.
    pub fn item(&self) -> &'a T {
        match *self {
            Put::Inserted(item) | Put::Conflict(item) => item,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Put::Conflict(_))
    }
}

/// Positions taken at each level on the way down, root first.
#[derive(Clone, Copy)]
struct Path {
    positions: [u8; PRIME_COUNT],
    len: usize,
}

impl Path {
    fn new() -> Self {
        Self {
            positions: [0; PRIME_COUNT],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, idx: usize) {
        // Sibling arrays never exceed 29 entries.
        self.positions[self.len] = idx as u8;
        self.len += 1;
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.positions[..self.len]
    }
}

/// Where a key lives, or would live, in the tree.
enum Probe {
    /// A node with the key sits at `idx` in the array reached by `parent`.
    Found { parent: Path, idx: usize },
    /// The key is absent. A new node would go into the array reached by `parent`, at the boundary
    /// `right`, with the given remainder and depth.
    Vacant {
        parent: Path,
        right: usize,
        remainder: u8,
        depth: u8,
    },
    /// The key is absent and its residue path runs past the last prime.
    Overflow,
}

impl<T> Default for HashTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HashTree<T> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            root: SiblingArray::new(),
            length: 0,
            conflicts: 0,
        }
    }

    /// Number of items stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of puts that found their key already present.
    #[inline]
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Drop every item. The conflict counter is kept.
    pub fn clear(&mut self) {
        self.root = SiblingArray::new();
        self.length = 0;
    }

    /// Pre-order traversal over the stored items, siblings in ascending remainder order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.length)
    }

    /// Same as [`HashTree::iter`], for callers driving the traversal through
    /// [`Iter::advance`] and [`Iter::current`].
    pub fn new_iterator(&self) -> Iter<'_, T> {
        self.iter()
    }

    fn children_at(&self, path: &[u8]) -> &SiblingArray<Node<T>> {
        let mut children = &self.root;
        for &idx in path {
            children = &children[idx as usize].children;
        }
        children
    }

    fn children_at_mut(&mut self, path: &[u8]) -> &mut SiblingArray<Node<T>> {
        let mut children = &mut self.root;
        for &idx in path {
            children = &mut children[idx as usize].children;
        }
        children
    }
}

impl<T: Item> HashTree<T> {
    /// Look up the stored item with the same key as `probe`.
    ///
    /// Anything implementing [`Item`] can serve as the probe, so a bare `u32` key works for any
    /// item type.
    pub fn get<Q: Item + ?Sized>(&self, probe: &Q) -> Option<&T> {
        let key = probe.key();
        let mut children = &self.root;
        let mut depth = 0;
        loop {
            // A node at the deepest level matches every residue, so only a drifted key gets here.
            if depth >= MAX_DEPTH {
                return None;
            }
            let remainder = residue(key, depth);
            let Seek::Found(idx) = children.search(remainder) else {
                #[cfg(feature = "tracing")]
                tracing::trace!(key, depth, remainder, "get: not found");
                return None;
            };

            let child = &children[idx];
            if child.item.key() == key {
                return Some(&child.item);
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(key, depth, remainder, occupant = child.item.key(), "get: descend");
            children = &child.children;
            depth = child.depth;
        }
    }

    /// Like [`HashTree::get`], but reports a missing key as [`HashTreeError::NotFound`].
    pub fn try_get<Q: Item + ?Sized>(&self, probe: &Q) -> Result<&T> {
        let key = probe.key();
        self.get(probe).ok_or(HashTreeError::NotFound { key })
    }

    /// Whether an item with the same key as `probe` is stored.
    pub fn contains<Q: Item + ?Sized>(&self, probe: &Q) -> bool {
        self.get(probe).is_some()
    }

    /// Store `item`, returning the item now stored under its key.
    ///
    /// If the key is already present the existing item is kept and returned, the new one is
    /// dropped, and the conflict counter goes up. Puts never overwrite. `None` means the item
    /// could not be placed, which takes a stored item whose key changed.
    pub fn put(&mut self, item: T) -> Option<&T> {
        self.try_put(item).ok().map(|put| put.item())
    }

    /// Like [`HashTree::put`], but tells an insert apart from a conflict and reports a failed
    /// placement as [`HashTreeError::DepthOverflow`].
    pub fn try_put(&mut self, item: T) -> Result<Put<'_, T>> {
        let key = item.key();
        match self.probe(key) {
            Probe::Found { parent, idx } => {
                self.conflicts += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(key, conflicts = self.conflicts, "put: key already present");

                Ok(Put::Conflict(&self.children_at(parent.as_slice())[idx].item))
            }
            Probe::Vacant {
                parent,
                right,
                remainder,
                depth,
            } => {
                self.length += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(key, depth, remainder, "put: new node");

                let children = self.children_at_mut(parent.as_slice());
                let idx = children.place(right, Node::new(item, depth, remainder));
                Ok(Put::Inserted(&children[idx].item))
            }
            Probe::Overflow => {
                #[cfg(feature = "tracing")]
                tracing::debug!(key, "put: depth overflow");
                Err(HashTreeError::DepthOverflow {
                    key,
                    max_depth: MAX_DEPTH,
                })
            }
        }
    }

    /// Remove the item with the same key as `probe` and return it.
    ///
    /// A leaf is simply unlinked. A node with children keeps its place, depth, remainder and
    /// children, and takes over the item of the leaf found by repeatedly following first
    /// children; that leaf is unlinked instead. Nothing above the deleted node moves.
    pub fn delete<Q: Item + ?Sized>(&mut self, probe: &Q) -> Option<T> {
        self.try_delete(probe).ok()
    }

    /// Like [`HashTree::delete`], but reports a missing key as [`HashTreeError::NotFound`].
    pub fn try_delete<Q: Item + ?Sized>(&mut self, probe: &Q) -> Result<T> {
        let key = probe.key();
        let Probe::Found { parent, idx } = self.probe(key) else {
            return Err(HashTreeError::NotFound { key });
        };

        let siblings = self.children_at_mut(parent.as_slice());
        let node = &mut siblings[idx];
        let removed = match node.children.detach_leftmost_leaf() {
            None => siblings.delete_at(idx).item,
            Some(leaf) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    key,
                    promoted = leaf.item.key(),
                    depth = node.depth,
                    "delete: promoting leaf"
                );
                std::mem::replace(&mut node.item, leaf.item)
            }
        };

        self.length -= 1;
        Ok(removed)
    }

    /// Walk the residue path for `key`, recording the position taken at each level.
    fn probe(&self, key: u32) -> Probe {
        let mut path = Path::new();
        let mut children = &self.root;
        let mut depth = 0;
        loop {
            if depth >= MAX_DEPTH {
                return Probe::Overflow;
            }
            let remainder = residue(key, depth);
            match children.search(remainder) {
                Seek::Found(idx) => {
                    let child = &children[idx];
                    if child.item.key() == key {
                        return Probe::Found { parent: path, idx };
                    }
                    path.push(idx);
                    #[cfg(feature = "tracing")]
                    tracing::trace!(key, depth, remainder, occupant = child.item.key(), "descend");
                    children = &child.children;
                    depth = child.depth;
                }
                Seek::Vacant(right) => {
                    return Probe::Vacant {
                        parent: path,
                        right,
                        remainder,
                        depth: depth + 1,
                    };
                }
            }
        }
    }

    /// Dump the structure to stderr, one node per line, indented by depth.
    pub fn print_tree(&self) {
        if self.root.is_empty() {
            eprintln!("[]");
            return;
        }

        eprintln!("root, {} #children", self.root.len());
        HashTree::print_tree_recurse(&self.root, 1);
    }

    fn print_tree_recurse(children: &SiblingArray<Node<T>>, depth: usize) {
        let indent = "  ".repeat(depth);
        for child in children.iter() {
            eprintln!(
                "{}({:02}) key {} depth {}, {} #children",
                indent,
                child.remainder,
                child.item.key(),
                child.depth,
                child.num_children()
            );
            HashTree::print_tree_recurse(&child.children, depth + 1);
        }
    }
}

impl<T: Debug> Debug for HashTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a HashTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Item> Extend<T> for HashTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.put(item);
        }
    }
}

impl<T: Item> FromIterator<T> for HashTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = HashTree::new();
        tree.extend(iter);
        tree
    }
}
