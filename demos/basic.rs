//! Basic usage walkthrough

use bounded_pool::{BoundedPool, PoolError};
use std::thread;
use std::time::Duration;

fn main() {
    println!("=== bounded-pool - Basic Walkthrough ===\n");

    // Example 1: Simple pool
    simple_pool();

    // Example 2: Blocking hand-off between threads
    blocking_handoff();

    // Example 3: Try and timeout variants
    try_and_timeout();

    // Example 4: Metrics
    metrics();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = BoundedPool::new(vec![1, 2, 3]).expect("non-empty item set");

    {
        let item = pool.acquire();
        println!("   Got item: {}", *item);
        // Item automatically returned when dropped
    }

    println!("   Available after return: {}\n", pool.available());
}

fn blocking_handoff() {
    println!("2. Blocking Hand-off:");
    let pool = BoundedPool::new(vec!["shared resource"]).expect("non-empty item set");

    let held = pool.acquire();
    println!("   Main thread holds the only item");

    let worker = {
        let pool = pool.clone();
        thread::spawn(move || {
            // Blocks until the main thread lets go
            let item = pool.acquire();
            println!("   Worker acquired: {}", *item);
        })
    };

    thread::sleep(Duration::from_millis(100));
    println!("   Releasing from main thread...");
    drop(held);

    worker.join().expect("worker thread panicked");
    println!("   Available at the end: {}\n", pool.available());
}

fn try_and_timeout() {
    println!("3. Try and Timeout:");
    let pool = BoundedPool::new(vec![42]).expect("non-empty item set");

    let first = pool.try_acquire();
    println!("   First try: {}", if first.is_some() { "Success" } else { "None" });

    let second = pool.try_acquire();
    println!(
        "   Second try: {}",
        if second.is_some() { "Success" } else { "None (pool exhausted)" }
    );

    match pool.acquire_timeout(Duration::from_millis(50)) {
        Ok(_) => println!("   Timed acquire: Success"),
        Err(PoolError::Timeout(bound)) => println!("   Timed acquire: timed out after {:?}", bound),
        Err(e) => println!("   Timed acquire: {}", e),
    }

    drop(first);
    println!("   After return: {} available\n", pool.available());
}

fn metrics() {
    println!("4. Metrics:");
    let pool = BoundedPool::new(vec![1, 2, 3, 4, 5]).expect("non-empty item set");

    {
        let _a = pool.acquire();
        let _b = pool.acquire();
        let metrics = pool.metrics();
        println!("   In use: {}", metrics.in_use);
        println!("   Utilization: {:.0}%", metrics.utilization * 100.0);
    }

    for (key, value) in pool.export_metrics() {
        println!("   {key} = {value}");
    }
}
