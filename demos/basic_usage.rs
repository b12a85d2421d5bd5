//! Basic usage of the hash tree.

use htree::{HashTree, HashTreeError, Item, Keyed, Put};

#[derive(Debug)]
struct Account {
    id: u32,
    owner: &'static str,
    balance: i64,
}

impl Item for Account {
    fn key(&self) -> u32 {
        self.id
    }
}

fn main() {
    example_keys();
    example_keyed();
    example_custom_item();
}

fn example_keys() {
    println!("=== Bare u32 keys ===\n");

    let mut tree: HashTree<u32> = (0..10).collect();

    // The first six keys fill the root and its first children
    println!("Iteration order: {:?}", tree.iter().take(6).collect::<Vec<_>>());
    println!("Contains 7: {}", tree.contains(&7u32));

    // Deleting an inner node promotes a leaf from below it
    println!("Deleted 0: {:?}", tree.delete(&0u32));
    println!("Count: {}\n", tree.len());
    tree.print_tree();
    println!();
}

fn example_keyed() {
    println!("=== Keyed values ===\n");

    let mut tree = HashTree::new();
    tree.put(Keyed::new(123u32, "data1"));
    tree.put(Keyed::new(456u32, "data2"));

    // Puts never overwrite; the stored item comes back instead
    let stored = tree.put(Keyed::new(123u32, "replacement")).map(|e| e.value);
    println!("put 123 again -> {:?}", stored);
    println!("conflicts: {}", tree.conflicts());

    println!("123 = {:?}", tree.get(&123u32).map(|e| e.value));
    println!("999 = {:?}\n", tree.get(&999u32).map(|e| e.value));
}

fn example_custom_item() {
    println!("=== Custom items ===\n");

    let mut tree = HashTree::new();
    for (id, owner) in [(1001, "ada"), (1002, "grace"), (1003, "edsger")] {
        tree.put(Account {
            id,
            owner,
            balance: 0,
        });
    }

    match tree.try_put(Account {
        id: 1002,
        owner: "mallory",
        balance: 1_000_000,
    }) {
        Ok(Put::Conflict(existing)) => println!("1002 already held by {}", existing.owner),
        Ok(Put::Inserted(_)) => println!("1002 inserted"),
        Err(e) => println!("put failed: {}", e),
    }

    match tree.try_delete(&4040u32) {
        Err(HashTreeError::NotFound { key }) => println!("no account {}", key),
        other => println!("unexpected: {:?}", other),
    }

    let total: i64 = tree.iter().map(|a| a.balance).sum();
    println!("{} accounts, total balance {}", tree.len(), total);
}
