//! Statistics and introspection for hash trees.
//!
//! Useful for checking how full the sibling arrays are at each level, how deep the tree has
//! grown, and how much memory the nodes take.

use std::collections::BTreeMap;
use std::mem::size_of;

use crate::mapping::sibling_array::SiblingArray;
use crate::node::Node;
use crate::primes::width_at;
use crate::tree::HashTree;

/// Per-depth counts for nodes that have children.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DepthStats {
    /// Most children a node at this depth can have: the prime for this depth.
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    /// `total_children / (width * total_nodes)`.
    pub density: f64,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TreeStats {
    /// Keyed by depth. The root is depth 0 and shows up once it has children.
    pub depth_stats: BTreeMap<u8, DepthStats>,
    pub num_values: usize,
    pub num_leaves: usize,
    pub num_inner_nodes: usize,
    pub total_density: f64,
    pub max_height: usize,
    pub conflicts: usize,
    /// Bytes held by sibling array buffers, node headers included. Heap data owned by the items
    /// themselves is not counted.
    pub allocated_bytes: usize,
}

impl<T> HashTree<T> {
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            conflicts: self.conflicts(),
            ..Default::default()
        };

        update_tree_stats(&mut stats, &self.root, 0);

        let mut total_children = 0;
        let mut total_width = 0;
        for ds in stats.depth_stats.values_mut() {
            total_children += ds.total_children;
            total_width += ds.width * ds.total_nodes;
            ds.density = ds.total_children as f64 / (ds.width * ds.total_nodes) as f64;
        }
        stats.num_inner_nodes = stats
            .depth_stats
            .iter()
            .filter(|(depth, _)| **depth > 0)
            .map(|(_, ds)| ds.total_nodes)
            .sum();
        if total_width > 0 {
            stats.total_density = total_children as f64 / total_width as f64;
        }

        stats
    }
}

fn update_tree_stats<T>(stats: &mut TreeStats, children: &SiblingArray<Node<T>>, depth: u8) {
    stats.allocated_bytes += children.capacity() * size_of::<Node<T>>();
    if children.is_empty() {
        return;
    }

    stats
        .depth_stats
        .entry(depth)
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += children.len();
        })
        .or_insert(DepthStats {
            width: width_at(depth),
            total_nodes: 1,
            total_children: children.len(),
            density: 0.0,
        });

    for child in children {
        stats.num_values += 1;
        stats.max_height = stats.max_height.max(child.depth as usize);
        if child.is_leaf() {
            stats.num_leaves += 1;
        }
        update_tree_stats(stats, &child.children, child.depth);
    }
}
