//! Metrics collection and export for bounded pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time metrics for a pool
///
/// # Examples
///
/// ```
/// use bounded_pool::BoundedPool;
///
/// let pool = BoundedPool::new(vec![1, 2, 3]).unwrap();
///
/// {
///     let _item = pool.acquire();
///     let metrics = pool.metrics();
///     assert_eq!(metrics.total_acquired, 1);
///     assert_eq!(metrics.in_use, 1);
/// }
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Total items handed out over the pool's lifetime
    pub total_acquired: usize,

    /// Total items returned over the pool's lifetime
    pub total_released: usize,

    /// Items currently on loan
    pub in_use: usize,

    /// Items currently available
    pub available: usize,

    /// Acquire attempts that found the pool exhausted
    pub exhausted_events: usize,

    /// Bounded waits that expired before an item became available
    pub timeouts: usize,

    /// Loan ratio (0.0 to 1.0)
    pub utilization: f64,

    /// Fixed pool capacity
    pub capacity: usize,
}

impl PoolMetrics {
    /// Export metrics as a string map
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_acquired".to_string(), self.total_acquired.to_string());
        metrics.insert("total_released".to_string(), self.total_released.to_string());
        metrics.insert("in_use".to_string(), self.in_use.to_string());
        metrics.insert("available".to_string(), self.available.to_string());
        metrics.insert("exhausted_events".to_string(), self.exhausted_events.to_string());
        metrics.insert("timeouts".to_string(), self.timeouts.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics.insert("capacity".to_string(), self.capacity.to_string());
        metrics
    }
}

/// Prometheus exposition-format exporter
#[cfg(feature = "metrics")]
pub struct MetricsExporter;

#[cfg(feature = "metrics")]
impl MetricsExporter {
    /// Render a metrics snapshot in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_pool::BoundedPool;
    /// use std::collections::HashMap;
    ///
    /// let pool = BoundedPool::new(vec![1, 2, 3]).unwrap();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("my_pool", Some(&tags));
    /// assert!(output.contains("boundedpool_items_available"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Opts, Registry, TextEncoder};

        let registry = Registry::new();
        let mut labels = HashMap::new();
        labels.insert("pool".to_owned(), pool_name.to_owned());
        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.insert(key.clone(), value.clone());
            }
        }

        let gauges = [
            ("boundedpool_items_in_use", "Items currently on loan", metrics.in_use),
            ("boundedpool_items_available", "Items currently available", metrics.available),
            ("boundedpool_capacity", "Fixed pool capacity", metrics.capacity),
        ];
        for (name, help, value) in gauges {
            let gauge = IntGauge::with_opts(Opts::new(name, help).const_labels(labels.clone()))
                .expect("gauge options are static");
            gauge.set(value as i64);
            registry.register(Box::new(gauge)).expect("metric names are unique");
        }

        let utilization = Gauge::with_opts(
            Opts::new("boundedpool_utilization", "Loan ratio").const_labels(labels.clone()),
        )
        .expect("gauge options are static");
        utilization.set(metrics.utilization);
        registry.register(Box::new(utilization)).expect("metric names are unique");

        let counters = [
            ("boundedpool_acquired_total", "Total items handed out", metrics.total_acquired),
            ("boundedpool_released_total", "Total items returned", metrics.total_released),
            (
                "boundedpool_exhausted_total",
                "Acquire attempts that found the pool exhausted",
                metrics.exhausted_events,
            ),
            ("boundedpool_timeouts_total", "Bounded waits that expired", metrics.timeouts),
        ];
        for (name, help, value) in counters {
            let counter = IntCounter::with_opts(Opts::new(name, help).const_labels(labels.clone()))
                .expect("counter options are static");
            counter.inc_by(value as u64);
            registry.register(Box::new(counter)).expect("metric names are unique");
        }

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .expect("exposition text encodes into a Vec");
        String::from_utf8(buffer).expect("exposition text is utf-8")
    }
}

/// Internal counters; updated with relaxed ordering, the counts are
/// informational and not part of the pool's exclusivity guarantees
pub(crate) struct MetricsTracker {
    total_acquired: AtomicUsize,
    total_released: AtomicUsize,
    exhausted_events: AtomicUsize,
    timeouts: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            total_acquired: AtomicUsize::new(0),
            total_released: AtomicUsize::new(0),
            exhausted_events: AtomicUsize::new(0),
            timeouts: AtomicUsize::new(0),
        }
    }

    pub fn record_acquired(&self) {
        self.total_acquired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_released(&self) {
        self.total_released.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_exhausted(&self) {
        self.exhausted_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self, in_use: usize, available: usize, capacity: usize) -> PoolMetrics {
        let utilization = if capacity > 0 {
            in_use as f64 / capacity as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_acquired: self.total_acquired.load(Ordering::Relaxed),
            total_released: self.total_released.load(Ordering::Relaxed),
            in_use,
            available,
            exhausted_events: self.exhausted_events.load(Ordering::Relaxed),
            timeouts: self.timeouts.load(Ordering::Relaxed),
            utilization,
            capacity,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reports_utilization() {
        let tracker = MetricsTracker::new();
        tracker.record_acquired();
        tracker.record_acquired();
        tracker.record_released();

        let metrics = tracker.snapshot(1, 3, 4);
        assert_eq!(metrics.total_acquired, 2);
        assert_eq!(metrics.total_released, 1);
        assert_eq!(metrics.utilization, 0.25);
    }

    #[test]
    fn export_includes_every_counter() {
        let metrics = MetricsTracker::new().snapshot(0, 2, 2);
        let map = metrics.export();
        assert_eq!(map.get("available").map(String::as_str), Some("2"));
        assert!(map.contains_key("total_acquired"));
        assert!(map.contains_key("timeouts"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn prometheus_output_carries_labels() {
        let metrics = MetricsTracker::new().snapshot(1, 1, 2);
        let output = MetricsExporter::export_prometheus(&metrics, "test_pool", None);
        assert!(output.contains("boundedpool_items_in_use"));
        assert!(output.contains("pool=\"test_pool\""));
    }
}
