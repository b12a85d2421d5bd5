//! Reports how much memory the tree's nodes take per entry for random keys.

use rand::{thread_rng, Rng};

use htree::HashTree;

const SIZES: [usize; 4] = [1_000, 10_000, 100_000, 1_000_000];

fn main() {
    let mut rng = thread_rng();

    println!(
        "{:>10} {:>12} {:>10} {:>8} {:>8}",
        "entries", "bytes", "per entry", "height", "density"
    );
    for size in SIZES {
        let mut tree = HashTree::new();
        while tree.len() < size {
            tree.put(rng.gen::<u32>());
        }

        let stats = tree.stats();
        println!(
            "{:>10} {:>12} {:>10.1} {:>8} {:>8.3}",
            stats.num_values,
            stats.allocated_bytes,
            stats.allocated_bytes as f64 / stats.num_values as f64,
            stats.max_height,
            stats.total_density,
        );
    }

    let tree: HashTree<u32> = (0..100_000).map(|_| rng.gen()).collect();
    println!("\nPer-depth breakdown for {} random keys:", tree.len());
    for (depth, ds) in tree.stats().depth_stats {
        println!(
            "  depth {}: width {:>2}, {:>6} nodes, {:>7} children, density {:.3}",
            depth, ds.width, ds.total_nodes, ds.total_children, ds.density
        );
    }
}
