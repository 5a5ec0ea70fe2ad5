// bounded-pool demo binary
// Run the full walkthroughs with: cargo run --example basic

use bounded_pool::BoundedPool;

fn main() {
    println!("=== bounded-pool ===");
    println!("See demos/ for full walkthroughs");
    println!("Run: cargo run --example basic");
    println!();

    println!("Quick Demo:");
    let pool = BoundedPool::new(vec![1, 2, 3]).expect("non-empty item set");

    {
        let item = pool.acquire();
        println!("  Got item: {}", *item);
    }

    println!("  Available after return: {}", pool.available());
}
