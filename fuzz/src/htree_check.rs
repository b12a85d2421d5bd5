#![no_main]

use std::collections::BTreeMap;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use htree::{HashTree, Keyed};

#[derive(Arbitrary, Debug)]
enum MapMethod {
    Get { key: u32 },
    Put { key: u32, val: u64 },
    Delete { key: u32 },
    Iterate,
}

fuzz_target!(|methods: Vec<MapMethod>| {
    let capacity = 10_000_000;
    let mut tree = HashTree::<Keyed<u32, u64>>::new();
    let mut bt_map = BTreeMap::<u32, u64>::new();

    for m_c in methods.chunks(1024) {
        for m in m_c {
            match m {
                MapMethod::Get { key } => {
                    let tree_v = tree.get(key).map(|e| e.value);
                    let bt_v = bt_map.get(key).copied();
                    assert_eq!(tree_v, bt_v);
                }
                MapMethod::Put { key, val } => {
                    if bt_map.len() < capacity {
                        // The first value put for a key is kept.
                        let bt_v = *bt_map.entry(*key).or_insert(*val);
                        let tree_v = tree.put(Keyed::new(*key, *val)).map(|e| e.value);
                        eprintln!("Put: {:?} {:?} {:?}", key, val, tree_v);
                        assert_eq!(tree_v, Some(bt_v));
                    }
                }
                MapMethod::Delete { key } => {
                    let btr = bt_map.remove(key);
                    let treer = tree.delete(key).map(|e| e.value);
                    eprintln!("Delete: {:?} {:?} {:?}", key, treer, btr);
                    assert_eq!(treer, btr);
                }
                MapMethod::Iterate => {
                    let mut seen: Vec<(u32, u64)> = tree.iter().map(|e| (e.key, e.value)).collect();
                    seen.sort_unstable();
                    let expected: Vec<(u32, u64)> = bt_map.iter().map(|(k, v)| (*k, *v)).collect();
                    assert_eq!(seen, expected);
                }
            }
            assert_eq!(tree.len(), bt_map.len());
        }
    }

    for (k, expected_value) in bt_map.iter() {
        let result = tree.get(k).map(|e| e.value);
        eprintln!("Cmp key {:?} {:?} {:?}", k, result, expected_value);
        assert_eq!(
            result,
            Some(*expected_value),
            "Expected value for key {}: {:?} != {:?}",
            k,
            result,
            *expected_value
        );
    }
});
