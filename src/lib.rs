//! # bounded-pool
//!
//! Thread-safe bounded object pool: a fixed set of items handed out
//! exclusively to concurrent borrowers, with blocking, timed, and async
//! acquisition.
//!
//! ## Features
//!
//! - Fixed capacity chosen at construction; the pool never creates or
//!   destroys items, it only loans them out and takes them back
//! - Blocking `acquire` that suspends while the pool is exhausted, plus
//!   non-blocking and bounded-wait variants
//! - Automatic return of items via RAII (Drop trait)
//! - Async acquisition with timeout on top of tokio
//! - Non-blocking release with over-release detection
//! - Metrics snapshots with Prometheus export
//!
//! ## Quick Start
//!
//! ```rust
//! use bounded_pool::BoundedPool;
//!
//! let pool = BoundedPool::new(vec![1, 2, 3]).unwrap();
//! {
//!     let item = pool.acquire();
//!     println!("Got: {}", *item);
//!     // Item automatically returned when `item` goes out of scope
//! }
//! assert_eq!(pool.available(), 3);
//! ```

mod config;
mod errors;
mod metrics;
mod pool;

pub use config::PoolConfiguration;
pub use errors::{PoolError, PoolResult};
#[cfg(feature = "metrics")]
pub use metrics::MetricsExporter;
pub use metrics::PoolMetrics;
pub use pool::{BoundedPool, PooledItem};
