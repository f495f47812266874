//! Error types for the estimator.

use thiserror::Error;

/// Result type alias for estimator operations.
pub type EstimatorResult<T> = Result<T, ConfigError>;

/// Configuration values rejected before they reach the estimator.
///
/// The estimator itself is a total function; all range checking happens
/// at this boundary via [`crate::EndpointConfig::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Concurrent users must be at least 1, got {0}")]
    ConcurrentUsers(u32),

    #[error("Requests per user per hour must be at least 1, got {0}")]
    RequestsPerUserHour(u32),

    #[error("Daily active hours must be between 1 and 24, got {0}")]
    DailyActiveHours(u32),

    #[error("Days per month must be between 1 and 31, got {0}")]
    DaysPerMonth(u32),

    #[error("Max replicas must be at least 1, got {0}")]
    MaxReplicas(u32),

    #[error("Min replicas ({min}) must not exceed max replicas ({max})")]
    MinExceedsMax { min: u32, max: u32 },

    #[error("Batch size must be at least 1, got {0}")]
    BatchSize(u32),

    #[error("Instance base throughput must be positive, got {0}")]
    BaseThroughput(f64),

    #[error("Model size multiplier must be positive, got {0}")]
    ModelSizeMultiplier(f64),

    #[error("Regional multiplier must be positive, got {0}")]
    RegionalMultiplier(f64),

    #[error("Data transfer must be non-negative, got {0}")]
    DataTransfer(f64),

    #[error("Storage must be non-negative, got {0}")]
    Storage(f64),
}
