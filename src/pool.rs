//! Core bounded pool implementation

use crate::config::PoolConfiguration;
use crate::errors::{PoolError, PoolResult};
#[cfg(feature = "metrics")]
use crate::metrics::MetricsExporter;
use crate::metrics::{MetricsTracker, PoolMetrics};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError, bounded};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;

/// State shared by every pool handle and outstanding loan.
///
/// The bounded channel is the available store and the permit counter in
/// one: a `recv` takes a permit and removes its item as a single step, so
/// no caller can observe a non-empty store and then lose the item to a
/// faster thread. Both endpoints live here, which keeps the channel
/// connected for as long as any handle or loan exists.
struct PoolShared<T> {
    slot_tx: Sender<T>,
    slot_rx: Receiver<T>,
    capacity: usize,
    config: PoolConfiguration,
    metrics: MetricsTracker,
}

/// An item on loan from a [`BoundedPool`], returned automatically on drop
pub struct PooledItem<T: Send> {
    value: Option<T>,
    shared: Arc<PoolShared<T>>,
}

impl<T: Send> PooledItem<T> {
    fn new(value: T, shared: Arc<PoolShared<T>>) -> Self {
        Self {
            value: Some(value),
            shared,
        }
    }

    /// Detach the item from its loan without returning it.
    ///
    /// The loan stays outstanding: the pool operates with one slot fewer
    /// until the item is re-admitted with [`BoundedPool::release`].
    pub fn into_inner(mut self) -> T {
        self.value.take().expect("value already taken")
    }
}

impl<T: Send> Deref for PooledItem<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("value already taken")
    }
}

impl<T: Send> DerefMut for PooledItem<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("value already taken")
    }
}

impl<T: Send> Drop for PooledItem<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            // The slot this value came out of is still reserved for it,
            // so the send cannot block.
            if self.shared.slot_tx.try_send(value).is_ok() {
                self.shared.metrics.record_released();
            }
        }
    }
}

/// Thread-safe pool over a fixed set of items.
///
/// Capacity is set at construction and never changes; the pool never
/// creates or destroys items, it only loans them out and takes them back.
/// Exactly one caller holds any given item at a time. Cloning a pool
/// produces another handle to the same shared state.
///
/// # Examples
///
/// ```
/// use bounded_pool::BoundedPool;
///
/// let pool = BoundedPool::new(vec!["a", "b"]).unwrap();
/// {
///     let item = pool.acquire();
///     assert_eq!(pool.in_use(), 1);
///     drop(item);
/// }
/// assert_eq!(pool.available(), 2);
/// ```
pub struct BoundedPool<T: Send> {
    shared: Arc<PoolShared<T>>,
}

impl<T: Send> Clone for BoundedPool<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send> BoundedPool<T> {
    /// Create a pool owning `items`, with the default configuration
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] if `items` is empty; a pool that can
    /// never satisfy an acquire is rejected up front.
    pub fn new(items: impl IntoIterator<Item = T>) -> PoolResult<Self> {
        Self::with_config(items, PoolConfiguration::default())
    }

    /// Create a pool with an explicit configuration
    pub fn with_config(
        items: impl IntoIterator<Item = T>,
        config: PoolConfiguration,
    ) -> PoolResult<Self> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(PoolError::InvalidConfig);
        }

        let capacity = items.len();
        let (slot_tx, slot_rx) = bounded(capacity);
        for item in items {
            slot_tx
                .try_send(item)
                .expect("store is sized to the item count");
        }

        Ok(Self {
            shared: Arc::new(PoolShared {
                slot_tx,
                slot_rx,
                capacity,
                config,
                metrics: MetricsTracker::new(),
            }),
        })
    }

    /// Acquire an item, blocking while the pool is exhausted.
    ///
    /// Suspends the calling thread until another holder returns an item.
    /// The returned guard hands the item back when dropped; release on the
    /// other side never blocks, so a holder cannot be stalled by waiters.
    pub fn acquire(&self) -> PooledItem<T> {
        let value = self
            .shared
            .slot_rx
            .recv()
            .expect("pool holds its own sender");
        self.shared.metrics.record_acquired();
        PooledItem::new(value, Arc::clone(&self.shared))
    }

    /// Acquire an item without blocking; `None` if the pool is exhausted
    pub fn try_acquire(&self) -> Option<PooledItem<T>> {
        match self.shared.slot_rx.try_recv() {
            Ok(value) => {
                self.shared.metrics.record_acquired();
                Some(PooledItem::new(value, Arc::clone(&self.shared)))
            }
            Err(TryRecvError::Empty) => {
                self.shared.metrics.record_exhausted();
                None
            }
            Err(TryRecvError::Disconnected) => unreachable!("pool holds its own sender"),
        }
    }

    /// Acquire an item, waiting at most `timeout`
    ///
    /// # Errors
    ///
    /// [`PoolError::Timeout`] if no item was released within the bound
    pub fn acquire_timeout(&self, timeout: Duration) -> PoolResult<PooledItem<T>> {
        match self.shared.slot_rx.recv_timeout(timeout) {
            Ok(value) => {
                self.shared.metrics.record_acquired();
                Ok(PooledItem::new(value, Arc::clone(&self.shared)))
            }
            Err(RecvTimeoutError::Timeout) => {
                self.shared.metrics.record_timeout();
                Err(PoolError::Timeout(timeout))
            }
            Err(RecvTimeoutError::Disconnected) => unreachable!("pool holds its own sender"),
        }
    }

    /// Acquire an item asynchronously.
    ///
    /// Polls the pool at the configured interval, bounded by
    /// [`PoolConfiguration::operation_timeout`]. With an unbounded
    /// configuration this waits until an item is released. Dropping the
    /// future is safe at any point: a waiter holds nothing until an item
    /// has actually been handed over.
    ///
    /// # Errors
    ///
    /// [`PoolError::Timeout`] if the configured bound expires first
    pub async fn acquire_async(&self) -> PoolResult<PooledItem<T>> {
        match self.shared.config.operation_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.wait_for_item()).await {
                Ok(item) => Ok(item),
                Err(_) => {
                    self.shared.metrics.record_timeout();
                    Err(PoolError::Timeout(limit))
                }
            },
            None => Ok(self.wait_for_item().await),
        }
    }

    /// Acquire asynchronously, `None` instead of a timeout error
    pub async fn try_acquire_async(&self) -> Option<PooledItem<T>> {
        self.acquire_async().await.ok()
    }

    async fn wait_for_item(&self) -> PooledItem<T> {
        loop {
            if let Some(item) = self.try_acquire() {
                return item;
            }
            tokio::time::sleep(self.shared.config.poll_interval).await;
        }
    }

    /// Return a detached item to the pool.
    ///
    /// Only needed after [`PooledItem::into_inner`]; guarded loans return
    /// on drop. Never blocks.
    ///
    /// # Errors
    ///
    /// [`PoolError::Misuse`] if every slot is already filled, meaning no
    /// loan is outstanding; the rejected item is dropped. Substituting a
    /// different item of the same type while a loan is outstanding cannot
    /// be detected and leaves the pool's contents to the caller's
    /// judgement.
    pub fn release(&self, item: T) -> PoolResult<()> {
        match self.shared.slot_tx.try_send(item) {
            Ok(()) => {
                self.shared.metrics.record_released();
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(PoolError::Misuse),
            Err(TrySendError::Disconnected(_)) => unreachable!("pool holds its own receiver"),
        }
    }

    /// Fixed capacity chosen at construction
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Items currently available for acquisition
    pub fn available(&self) -> usize {
        self.shared.slot_rx.len()
    }

    /// Items currently on loan, detached items included
    pub fn in_use(&self) -> usize {
        self.shared.capacity.saturating_sub(self.shared.slot_rx.len())
    }

    /// Point-in-time metrics snapshot
    pub fn metrics(&self) -> PoolMetrics {
        self.shared
            .metrics
            .snapshot(self.in_use(), self.available(), self.shared.capacity)
    }

    /// Export metrics as a string map
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus exposition format
    #[cfg(feature = "metrics")]
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.metrics(), pool_name, tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_and_auto_return() {
        let pool = BoundedPool::new(vec![1, 2, 3]).unwrap();

        {
            let item = pool.acquire();
            assert!(vec![1, 2, 3].contains(&*item));
            assert_eq!(pool.in_use(), 1);
        }

        assert_eq!(pool.available(), 3);
    }

    #[test]
    fn empty_construction_is_rejected() {
        let result = BoundedPool::<i32>::new(vec![]);
        assert_eq!(result.err(), Some(PoolError::InvalidConfig));
    }

    #[test]
    fn try_acquire_exhausts() {
        let pool = BoundedPool::new(vec![42]).unwrap();

        let first = pool.try_acquire();
        assert!(first.is_some());
        assert!(pool.try_acquire().is_none());

        drop(first);
        assert!(pool.try_acquire().is_some());
    }

    #[test]
    fn into_inner_and_release_round_trip() {
        let pool = BoundedPool::new(vec![7]).unwrap();

        let value = pool.acquire().into_inner();
        assert_eq!(pool.available(), 0);

        pool.release(value).unwrap();
        assert_eq!(pool.available(), 1);
        assert_eq!(*pool.acquire(), 7);
    }

    #[test]
    fn over_release_is_misuse() {
        let pool = BoundedPool::new(vec![1]).unwrap();
        assert_eq!(pool.release(2), Err(PoolError::Misuse));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn acquire_timeout_expires_and_recovers() {
        let pool = BoundedPool::new(vec![1]).unwrap();
        let held = pool.acquire();

        let result = pool.acquire_timeout(Duration::from_millis(50));
        assert!(matches!(result, Err(PoolError::Timeout(_))));

        drop(held);
        assert!(pool.acquire_timeout(Duration::from_millis(50)).is_ok());
    }

    #[test]
    fn metrics_track_the_loan_cycle() {
        let pool = BoundedPool::new(vec![1, 2]).unwrap();

        {
            let _item = pool.acquire();
        }
        let metrics = pool.metrics();
        assert_eq!(metrics.total_acquired, 1);
        assert_eq!(metrics.total_released, 1);
        assert_eq!(metrics.available, 2);
    }

    #[tokio::test]
    async fn acquire_async_returns_an_item() {
        let pool = BoundedPool::new(vec![1, 2, 3]).unwrap();

        let item = pool.acquire_async().await.unwrap();
        assert!(vec![1, 2, 3].contains(&*item));
    }

    #[tokio::test]
    async fn acquire_async_times_out_on_exhausted_pool() {
        let config = PoolConfiguration::new()
            .with_timeout(Duration::from_millis(50))
            .with_poll_interval(Duration::from_millis(5));
        let pool = BoundedPool::with_config(vec![9], config).unwrap();

        let held = pool.acquire();
        let result = pool.acquire_async().await;
        assert!(matches!(result, Err(PoolError::Timeout(_))));

        drop(held);
        assert!(pool.acquire_async().await.is_ok());
    }
}
