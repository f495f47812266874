//! # inferlab_estimator - Endpoint Capacity & Cost Estimator
//!
//! Deterministic, pure-function estimator that maps an endpoint
//! configuration (traffic, instance type, scaling limits) to derived
//! metrics: replica counts, throughput, latency, and monthly cost.
//!
//! ## Key Properties
//!
//! - **Pure**: [`evaluate`] performs no I/O, keeps no state between calls,
//!   and is safe to invoke concurrently with independent configurations.
//! - **Total**: for a validated [`EndpointConfig`] there is no error path.
//!   Capacity shortfall is not an error; it surfaces as utilization above
//!   100% or `actual_replicas == max_replicas`.
//! - **Recomputed fresh**: metrics are cheap (O(1)) and never cached.
//!
//! ## Example
//!
//! ```rust
//! use inferlab_estimator::{evaluate, EndpointConfig, PricingRates};
//!
//! let config = EndpointConfig::default();
//! config.validate().unwrap();
//! let metrics = evaluate(&config, &PricingRates::default());
//! assert_eq!(metrics.actual_replicas, 1);
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod scenario;
pub mod sweep;

pub use config::{
    EndpointConfig, InstanceProfile, InstanceType, ModelSize, PricingRates, Region,
};
pub use error::{ConfigError, EstimatorResult};
pub use metrics::{evaluate, EndpointMetrics};
pub use scenario::{evaluate_scenario, Scenario, ScenarioContext};
pub use sweep::{sweep_users, SweepPoint, DEFAULT_USER_LOADS};
