//! Error types for the bounded pool

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("pool must be constructed with at least one item")]
    InvalidConfig,

    #[error("release does not correspond to an outstanding loan")]
    Misuse,

    #[error("acquire timed out after {0:?}")]
    Timeout(Duration),
}

pub type PoolResult<T> = Result<T, PoolError>;
