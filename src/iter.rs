use std::iter::FusedIterator;

use crate::mapping::sibling_array::SiblingArray;
use crate::node::Node;
use crate::primes::PRIME_COUNT;

/// One level of the traversal: the siblings being walked and the position among them.
struct Frame<'a, T> {
    siblings: &'a [Node<T>],
    index: usize,
}

/// Depth-first, pre-order traversal over a [`HashTree`](crate::tree::HashTree).
///
/// The traversal keeps its own stack of frames instead of recursing, so it can be paused and
/// resumed at any point. The top frame names the current node; the frames below it are its
/// ancestors, each with the index of the child currently being walked. Siblings are visited in
/// ascending remainder order.
///
/// It can be driven either as a plain [`Iterator`] or, cursor style, through
/// [`Iter::advance`] and [`Iter::current`]:
///
/// ```rust
/// use htree::HashTree;
///
/// let tree: HashTree<u32> = (0..6).collect();
/// let mut iter = tree.new_iterator();
/// let mut seen = vec![];
/// while iter.advance() {
///     seen.push(*iter.current().unwrap());
/// }
/// assert_eq!(seen, vec![0, 4, 2, 1, 3, 5]);
/// ```
pub struct Iter<'a, T> {
    root: &'a SiblingArray<Node<T>>,
    stack: Vec<Frame<'a, T>>,
    started: bool,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a SiblingArray<Node<T>>, len: usize) -> Self {
        Self {
            root,
            stack: Vec::with_capacity(PRIME_COUNT),
            started: false,
            remaining: len,
        }
    }

    /// Move to the next node. Returns false once every node has been visited, and keeps returning
    /// false after that.
    pub fn advance(&mut self) -> bool {
        // Children of the current node, or of the root on the first call.
        let children = match self.stack.last() {
            Some(frame) => {
                let siblings: &'a [Node<T>] = frame.siblings;
                siblings[frame.index].children.as_slice()
            }
            None if !self.started => {
                let root: &'a SiblingArray<Node<T>> = self.root;
                root.as_slice()
            }
            None => return false,
        };
        self.started = true;

        if !children.is_empty() {
            self.stack.push(Frame {
                siblings: children,
                index: 0,
            });
            self.remaining = self.remaining.saturating_sub(1);
            return true;
        }

        // A leaf: climb until some ancestor still has a sibling to the right.
        while let Some(frame) = self.stack.last_mut() {
            if frame.index + 1 < frame.siblings.len() {
                frame.index += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return true;
            }
            self.stack.pop();
        }
        false
    }

    /// Item at the current position. `None` before the first successful [`Iter::advance`] and
    /// after the traversal is exhausted.
    pub fn current(&self) -> Option<&'a T> {
        let frame = self.stack.last()?;
        let siblings: &'a [Node<T>] = frame.siblings;
        Some(&siblings[frame.index].item)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance() {
            self.current()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
