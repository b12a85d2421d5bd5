use crate::mapping::sibling_array::SiblingArray;
use crate::mapping::Remainder;

/// A stored entry. The sentinel root is not a `Node`; the tree holds its children directly.
pub(crate) struct Node<T> {
    pub(crate) item: T,
    /// Depth in the tree, 1 for children of the root.
    pub(crate) depth: u8,
    /// Residue of the item's key against the prime of the parent's depth.
    pub(crate) remainder: u8,
    pub(crate) children: SiblingArray<Node<T>>,
}

impl<T> Remainder for Node<T> {
    #[inline(always)]
    fn remainder(&self) -> u8 {
        self.remainder
    }
}

impl<T> Node<T> {
    #[inline]
    pub(crate) fn new(item: T, depth: u8, remainder: u8) -> Self {
        Self {
            item,
            depth,
            remainder,
            children: SiblingArray::new(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) fn num_children(&self) -> usize {
        self.children.len()
    }
}

impl<T> SiblingArray<Node<T>> {
    /// Detach the leaf reached by following first children down from this array, starting with
    /// its first element. Returns `None` only if the array is empty.
    pub(crate) fn detach_leftmost_leaf(&mut self) -> Option<Node<T>> {
        let first = self.first_mut()?;
        if first.is_leaf() {
            return Some(self.delete_at(0));
        }
        first.children.detach_leftmost_leaf()
    }
}

#[cfg(test)]
mod tests {
    use crate::node::Node;

    fn chain(keys: &[u32]) -> Node<u32> {
        // Build a node whose first-child chain carries `keys[1..]`.
        let mut nodes: Vec<Node<u32>> = keys
            .iter()
            .enumerate()
            .map(|(d, &k)| Node::new(k, d as u8 + 1, 0))
            .collect();
        let mut tail = nodes.pop().unwrap();
        while let Some(mut parent) = nodes.pop() {
            parent.children.insert_at(0, tail);
            tail = parent;
        }
        tail
    }

    #[test]
    fn test_new_node_is_leaf() {
        let node = Node::new(7u32, 1, 1);
        assert!(node.is_leaf());
        assert_eq!(node.num_children(), 0);
        assert_eq!(node.depth, 1);
        assert_eq!(node.remainder, 1);
    }

    #[test]
    fn test_detach_leftmost_leaf() {
        let mut top = chain(&[0, 6, 12, 18]);
        top.children.insert_at(1, Node::new(4, 2, 1));

        let leaf = top.children.detach_leftmost_leaf().unwrap();
        assert_eq!(leaf.item, 18);
        assert!(leaf.is_leaf());

        // The node that held the leaf is a leaf itself now, and the sibling is untouched.
        assert_eq!(top.num_children(), 2);
        assert!(top.children[0].children[0].is_leaf());
        assert_eq!(top.children[1].item, 4);

        assert_eq!(top.children.detach_leftmost_leaf().unwrap().item, 12);
        assert_eq!(top.children.detach_leftmost_leaf().unwrap().item, 6);
        assert_eq!(top.children.detach_leftmost_leaf().unwrap().item, 4);
        assert!(top.children.detach_leftmost_leaf().is_none());
        assert!(top.is_leaf());
    }
}
