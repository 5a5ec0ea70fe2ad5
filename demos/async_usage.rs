//! Async usage walkthrough

use bounded_pool::{BoundedPool, PoolConfiguration};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    println!("=== bounded-pool - Async Walkthrough ===\n");

    // Example 1: Async acquire
    async_get().await;

    // Example 2: Async with timeout
    async_with_timeout().await;

    // Example 3: Concurrent tasks
    concurrent_tasks().await;
}

async fn async_get() {
    println!("1. Async Acquire:");
    let pool = BoundedPool::new(vec![1, 2, 3]).expect("non-empty item set");

    {
        let item = pool.acquire_async().await.expect("pool is not exhausted");
        println!("   Got item asynchronously: {}", *item);
    }

    println!();
}

async fn async_with_timeout() {
    println!("2. Async with Timeout:");

    let config = PoolConfiguration::new().with_timeout(Duration::from_millis(100));
    let pool = BoundedPool::with_config(vec![42], config).expect("non-empty item set");

    // Hold the only item so the async acquire has to wait
    let _held = pool.acquire();

    match pool.acquire_async().await {
        Ok(_) => println!("   Got item"),
        Err(e) => println!("   Error: {}", e),
    }

    println!();
}

async fn concurrent_tasks() {
    println!("3. Concurrent Tasks:");

    let pool = BoundedPool::new(vec![1, 2, 3, 4, 5]).expect("non-empty item set");

    let mut handles = vec![];

    for task in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            match pool.try_acquire_async().await {
                Some(item) => {
                    println!("   Task {} got item: {}", task, *item);
                    sleep(Duration::from_millis(50)).await;
                }
                None => println!("   Task {} timed out", task),
            }
        }));
    }

    for handle in handles {
        handle.await.expect("task panicked");
    }

    println!("   Final available: {}", pool.available());
}
