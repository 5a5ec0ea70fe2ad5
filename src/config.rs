//! Pool configuration options

use std::time::Duration;

/// Configuration for pool wait behavior
///
/// # Examples
///
/// ```
/// use bounded_pool::PoolConfiguration;
/// use std::time::Duration;
///
/// let config = PoolConfiguration::new()
///     .with_timeout(Duration::from_secs(5))
///     .with_poll_interval(Duration::from_millis(2));
///
/// assert_eq!(config.operation_timeout, Some(Duration::from_secs(5)));
/// assert_eq!(config.poll_interval, Duration::from_millis(2));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfiguration {
    /// Upper bound on how long async acquisition waits; `None` waits indefinitely
    pub operation_timeout: Option<Duration>,

    /// Interval at which async acquisition re-checks an exhausted pool
    pub poll_interval: Duration,
}

impl Default for PoolConfiguration {
    fn default() -> Self {
        Self {
            operation_timeout: Some(Duration::from_secs(30)),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl PoolConfiguration {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the async acquisition timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Let async acquisition wait indefinitely
    ///
    /// # Examples
    ///
    /// ```
    /// use bounded_pool::PoolConfiguration;
    ///
    /// let config = PoolConfiguration::new().with_unbounded_wait();
    /// assert!(config.operation_timeout.is_none());
    /// ```
    pub fn with_unbounded_wait(mut self) -> Self {
        self.operation_timeout = None;
        self
    }

    /// Set the interval at which async acquisition polls for a returned item
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = PoolConfiguration::default();
        assert_eq!(config.operation_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
    }
}
