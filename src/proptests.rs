use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

use crate::mapping::sibling_array::SiblingArray;
use crate::node::Node;
use crate::primes::{residue, MAX_DEPTH};

/// Walk every node and check the structural invariants the lookups rely on.
fn validate_tree<T: Item>(t: &HashTree<T>) {
    fn walk<T: Item>(
        t: &HashTree<T>,
        children: &SiblingArray<Node<T>>,
        parent_depth: u8,
        count: &mut usize,
    ) {
        let mut prev: Option<u8> = None;
        for child in children.iter() {
            *count += 1;
            assert_eq!(child.depth, parent_depth + 1, "child depth must follow parent");
            assert!(child.depth <= MAX_DEPTH, "node deeper than the ladder");
            if child.depth == MAX_DEPTH {
                assert!(child.is_leaf(), "nodes on the last prime have no children");
            }
            assert_eq!(
                child.remainder,
                residue(child.item.key(), parent_depth),
                "remainder must match the key at the parent's prime"
            );
            if let Some(prev) = prev {
                assert!(
                    child.remainder > prev,
                    "sibling remainders must be strictly ascending"
                );
            }
            prev = Some(child.remainder);

            let found = t.get(&child.item.key()).map(|item| item.key());
            assert_eq!(found, Some(child.item.key()), "every node must be reachable");

            walk(t, &child.children, child.depth, count);
        }
    }

    let mut count = 0;
    walk(t, &t.root, 0, &mut count);
    assert_eq!(count, t.len(), "reachable node count must match HashTree::len");
}

#[derive(Clone, Debug)]
enum Op {
    Put(u32, u64),
    Delete(u32),
    Get(u32),
}

fn key_strategy() -> impl Strategy<Value = u32> + Clone {
    // Mostly a narrow range so puts collide and deletes hit, with some full-width keys to reach
    // the deeper levels.
    prop_oneof![
        3 => 0u32..512,
        1 => any::<u32>(),
    ]
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(k, v)| Op::Put(k, v)),
        25 => key.clone().prop_map(Op::Delete),
        25 => key.clone().prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=2000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: HashTree<Keyed<u32, u64>> = HashTree::new();
        let mut m: BTreeMap<u32, u64> = BTreeMap::new();
        let mut conflicts = 0;

        for op in ops {
            match op {
                Op::Put(key, value) => {
                    // Puts never overwrite: the first value for a key sticks.
                    let stored = t.put(Keyed::new(key, value)).map(|e| e.value);
                    if m.contains_key(&key) {
                        conflicts += 1;
                    }
                    let expected = *m.entry(key).or_insert(value);
                    prop_assert_eq!(stored, Some(expected));
                }
                Op::Delete(key) => {
                    let got_t = t.delete(&key).map(|e| e.value);
                    let got_m = m.remove(&key);
                    prop_assert_eq!(got_t, got_m);
                }
                Op::Get(key) => {
                    let got_t = t.get(&key).map(|e| e.value);
                    let got_m = m.get(&key).copied();
                    prop_assert_eq!(got_t, got_m);
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.conflicts(), conflicts);
        }

        validate_tree(&t);
        let got: BTreeMap<u32, u64> = t.iter().map(|e| (e.key, e.value)).collect();
        prop_assert_eq!(got, m);
    }

    #[test]
    fn prop_delete_all(keys in prop::collection::btree_set(any::<u32>(), 0..=500)) {
        let mut t: HashTree<u32> = keys.iter().copied().collect();
        prop_assert_eq!(t.len(), keys.len());
        validate_tree(&t);

        for (i, key) in keys.iter().enumerate() {
            prop_assert_eq!(t.delete(key), Some(*key));
            prop_assert_eq!(t.get(key), None);
            prop_assert_eq!(t.len(), keys.len() - i - 1);
        }
        prop_assert!(t.is_empty());
        prop_assert_eq!(t.iter().count(), 0);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_then_delete_order_small_set() {
    // Keys sharing residues with one another, so every order builds chains and deletes promote.
    let keys: Vec<u32> = vec![0, 6, 30, 210, 2310, 1, 7];

    for_each_permutation(&keys, |perm| {
        let mut t: HashTree<u32> = HashTree::new();
        for k in &perm {
            assert_eq!(t.put(*k), Some(k));
        }
        validate_tree(&t);

        let mut remaining: Vec<u32> = perm.clone();
        remaining.sort_unstable();
        for k in perm.iter().rev() {
            assert_eq!(t.delete(k), Some(*k));
            remaining.retain(|r| r != k);
            validate_tree(&t);

            let mut got: Vec<u32> = t.iter().copied().collect();
            got.sort_unstable();
            assert_eq!(got, remaining);
        }
        assert!(t.is_empty());
    });
}

#[test]
fn full_depth_chain_deletes_from_every_level() {
    // Each key descends one level past the previous; the last two share the deepest parent.
    let keys: [u32; 11] = [
        0, 6, 30, 210, 2310, 30030, 510510, 9699690, 223092870, 446185740, 669278610,
    ];

    for first in 0..keys.len() {
        let mut t: HashTree<u32> = keys.iter().copied().collect();
        assert_eq!(t.len(), keys.len());
        validate_tree(&t);

        // Start at one level, then work through the rest top down.
        let order = std::iter::once(first).chain((0..keys.len()).filter(|&i| i != first));
        for (n, i) in order.enumerate() {
            assert_eq!(t.delete(&keys[i]), Some(keys[i]));
            assert_eq!(t.len(), keys.len() - n - 1);
            validate_tree(&t);
        }
        assert!(t.is_empty());
    }
}
