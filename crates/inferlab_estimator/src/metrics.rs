//! The core evaluation: configuration in, derived metrics out.
//!
//! All steps are pure arithmetic. The order of operations matters for
//! rounding semantics: replicas are ceiled from offered load first, then
//! clamped to the autoscaling ceiling, and only the clamped count feeds
//! cost and throughput.

use serde::{Deserialize, Serialize};

use crate::config::{EndpointConfig, PricingRates};

/// Derived metrics for one endpoint configuration.
///
/// Never mutated after computation; recompute on every configuration
/// change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointMetrics {
    /// Offered load: users x requests per user
    pub total_requests_per_hour: u64,
    /// Per-replica capacity in requests/minute after model and batch scaling
    pub adjusted_throughput: f64,
    /// Replicas demand calls for (diagnostic; floor applied, ceiling not)
    pub required_replicas: u32,
    /// Replicas actually provisioned: min(required, max_replicas)
    pub actual_replicas: u32,
    /// Compute cost per month in USD
    pub monthly_compute_cost: f64,
    /// Data egress cost per month in USD
    pub data_transfer_cost: f64,
    /// Model storage cost per month in USD
    pub storage_cost: f64,
    /// Sum of all monthly cost lines in USD
    pub total_monthly_cost: f64,
    /// Provisioned capacity in requests/hour
    pub max_requests_per_hour: f64,
    /// Offered load over provisioned capacity, as a percentage
    pub utilization_percentage: f64,
    /// Aggregate token generation rate across replicas
    pub tokens_per_second: f64,
    /// Aggregate request completion rate across replicas
    pub requests_per_second: f64,
    /// Modeled average latency including scale-from-zero penalty
    pub avg_response_time_seconds: f64,
}

/// Evaluate a configuration into metrics.
///
/// Total for validated input: callers are expected to have run
/// [`EndpointConfig::validate`], which guarantees a positive adjusted
/// throughput. Shortfall against `max_replicas` is deliberately not an
/// error; it shows up as utilization above 100% and
/// `actual_replicas == max_replicas`.
pub fn evaluate(config: &EndpointConfig, rates: &PricingRates) -> EndpointMetrics {
    let total_requests_per_hour =
        u64::from(config.concurrent_users) * u64::from(config.requests_per_user_hour);

    let adjusted_throughput = config.instance.base_throughput
        * config.model_size_multiplier
        * f64::from(config.batch_size);

    let demand = (total_requests_per_hour as f64 / 60.0 / adjusted_throughput).ceil() as u32;
    let required_replicas = demand.max(config.min_replicas);
    let actual_replicas = required_replicas.min(config.max_replicas);

    let base_hourly_cost = f64::from(actual_replicas) * config.instance.cost_per_hour;
    let regional_hourly_cost = base_hourly_cost * config.regional_multiplier;
    let daily_cost = regional_hourly_cost * f64::from(config.daily_active_hours);
    let monthly_compute_cost = daily_cost * f64::from(config.days_per_month);

    let data_transfer_cost = config.data_transfer_gb * rates.data_transfer_per_gb;
    let storage_cost = config.storage_gb * rates.storage_per_gb_month;
    let total_monthly_cost = monthly_compute_cost + data_transfer_cost + storage_cost;

    let max_requests_per_hour = f64::from(actual_replicas) * adjusted_throughput * 60.0;
    let utilization_percentage = if max_requests_per_hour > 0.0 {
        total_requests_per_hour as f64 / max_requests_per_hour * 100.0
    } else {
        0.0
    };

    // Scale-from-zero pays the full cold start on the modeled request
    // when no warm replica is guaranteed.
    let cold_start_penalty = if config.min_replicas == 0 {
        f64::from(config.cold_start_minutes) * 60.0
    } else {
        0.0
    };
    let avg_response_time_seconds =
        f64::from(config.request_timeout_seconds) * 0.1 + cold_start_penalty;

    let tokens_per_second = adjusted_throughput
        * f64::from(config.avg_response_tokens)
        * f64::from(actual_replicas)
        / 60.0;
    let requests_per_second = adjusted_throughput * f64::from(actual_replicas) / 60.0;

    EndpointMetrics {
        total_requests_per_hour,
        adjusted_throughput,
        required_replicas,
        actual_replicas,
        monthly_compute_cost,
        data_transfer_cost,
        storage_cost,
        total_monthly_cost,
        max_requests_per_hour,
        utilization_percentage,
        tokens_per_second,
        requests_per_second,
        avg_response_time_seconds,
    }
}

impl EndpointMetrics {
    /// Utilization high enough to risk degraded latency.
    pub fn is_high_utilization(&self) -> bool {
        self.utilization_percentage > 90.0
    }

    /// Demand hit the autoscaling ceiling; some load may go unserved.
    pub fn is_scaling_limited(&self, config: &EndpointConfig) -> bool {
        self.actual_replicas >= config.max_replicas
    }

    /// Cold start minutes a scale-from-zero request pays, if any.
    pub fn cold_start_impact(&self, config: &EndpointConfig) -> Option<u32> {
        (config.min_replicas == 0).then_some(config.cold_start_minutes)
    }

    /// Human-readable advisories for the presentation layer.
    pub fn advisories(&self, config: &EndpointConfig) -> Vec<String> {
        let mut notes = Vec::new();

        if self.is_high_utilization() {
            notes.push(format!(
                "High utilization: running at {:.1}% capacity. Consider increasing \
                 max replicas or upgrading the instance type.",
                self.utilization_percentage
            ));
        }

        if self.is_scaling_limited(config) {
            notes.push(format!(
                "Scaling limited: hit the max replica limit ({}). Increase the limit \
                 or upgrade the instance type to handle higher demand.",
                config.max_replicas
            ));
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InstanceProfile, InstanceType};

    fn reference_config() -> EndpointConfig {
        // 100 users x 10 req/h on an L40S at medium model size
        EndpointConfig::default()
    }

    #[test]
    fn test_worked_example() {
        let metrics = evaluate(&reference_config(), &PricingRates::default());

        assert_eq!(metrics.total_requests_per_hour, 1000);
        assert_eq!(metrics.adjusted_throughput, 80.0);
        // ceil(1000 / 60 / 80) = ceil(0.208) = 1
        assert_eq!(metrics.required_replicas, 1);
        assert_eq!(metrics.actual_replicas, 1);
    }

    #[test]
    fn test_cost_example() {
        // 1 replica x $1.80 x 1.0 regional x 12 h x 30 d = $648.00
        let metrics = evaluate(&reference_config(), &PricingRates::default());
        assert!((metrics.monthly_compute_cost - 648.00).abs() < 1e-9);
    }

    #[test]
    fn test_total_includes_transfer_and_storage() {
        let metrics = evaluate(&reference_config(), &PricingRates::default());
        // 100 GB x $0.09 + 5 GB x $0.10
        assert!((metrics.data_transfer_cost - 9.0).abs() < 1e-9);
        assert!((metrics.storage_cost - 0.5).abs() < 1e-9);
        assert!(
            (metrics.total_monthly_cost
                - (metrics.monthly_compute_cost + 9.0 + 0.5))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_replica_invariants() {
        for users in [1u32, 10, 100, 1000, 10_000] {
            let config = EndpointConfig {
                concurrent_users: users,
                min_replicas: 2,
                max_replicas: 8,
                ..reference_config()
            };
            let metrics = evaluate(&config, &PricingRates::default());

            assert!(metrics.required_replicas >= config.min_replicas);
            assert_eq!(
                metrics.actual_replicas,
                metrics.required_replicas.min(config.max_replicas)
            );
        }
    }

    #[test]
    fn test_required_replicas_monotone_in_users() {
        let rates = PricingRates::default();
        let mut previous = 0u32;
        for users in [1u32, 50, 100, 500, 1000, 5000, 10_000] {
            let config = EndpointConfig {
                concurrent_users: users,
                ..reference_config()
            };
            let metrics = evaluate(&config, &rates);
            assert!(metrics.required_replicas >= previous);
            previous = metrics.required_replicas;
        }
    }

    #[test]
    fn test_idempotent() {
        let config = reference_config();
        let rates = PricingRates::default();
        assert_eq!(evaluate(&config, &rates), evaluate(&config, &rates));
    }

    #[test]
    fn test_scaling_limited_surfaces_overload() {
        // Demand far beyond a tight ceiling: no error, utilization > 100.
        let config = EndpointConfig {
            concurrent_users: 10_000,
            requests_per_user_hour: 20,
            max_replicas: 2,
            ..reference_config()
        };
        let metrics = evaluate(&config, &PricingRates::default());

        assert_eq!(metrics.actual_replicas, 2);
        assert!(metrics.required_replicas > metrics.actual_replicas);
        assert!(metrics.utilization_percentage > 100.0);
        assert!(metrics.is_scaling_limited(&config));
        assert!(!metrics.advisories(&config).is_empty());
    }

    #[test]
    fn test_min_replicas_floor() {
        let config = EndpointConfig {
            concurrent_users: 1,
            requests_per_user_hour: 1,
            min_replicas: 3,
            ..reference_config()
        };
        let metrics = evaluate(&config, &PricingRates::default());
        assert_eq!(metrics.required_replicas, 3);
        assert_eq!(metrics.actual_replicas, 3);
    }

    #[test]
    fn test_cold_start_penalty_only_at_zero_floor() {
        let rates = PricingRates::default();

        let scale_to_zero = reference_config();
        let metrics = evaluate(&scale_to_zero, &rates);
        // 60s timeout x 0.1 + 2 min cold start
        assert!((metrics.avg_response_time_seconds - 126.0).abs() < 1e-9);
        assert_eq!(metrics.cold_start_impact(&scale_to_zero), Some(2));

        let warm = EndpointConfig {
            min_replicas: 1,
            ..reference_config()
        };
        let metrics = evaluate(&warm, &rates);
        assert!((metrics.avg_response_time_seconds - 6.0).abs() < 1e-9);
        assert_eq!(metrics.cold_start_impact(&warm), None);
    }

    #[test]
    fn test_speed_metrics() {
        let metrics = evaluate(&reference_config(), &PricingRates::default());
        // 80 rpm x 150 tokens x 1 replica / 60
        assert!((metrics.tokens_per_second - 200.0).abs() < 1e-9);
        // 80 rpm x 1 replica / 60
        assert!((metrics.requests_per_second - 80.0 / 60.0).abs() < 1e-9);
        assert!((metrics.max_requests_per_hour - 4800.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_pricing_rates() {
        let rates = PricingRates {
            data_transfer_per_gb: 0.12,
            storage_per_gb_month: 0.05,
        };
        let metrics = evaluate(&reference_config(), &rates);
        assert!((metrics.data_transfer_cost - 12.0).abs() < 1e-9);
        assert!((metrics.storage_cost - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_wire_format_is_camel_case() {
        let metrics = evaluate(&reference_config(), &PricingRates::default());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("totalMonthlyCost").is_some());
        assert!(json.get("actualReplicas").is_some());
        assert!(json.get("utilizationPercentage").is_some());
    }

    #[test]
    fn test_batch_size_scales_throughput() {
        let config = EndpointConfig {
            instance: InstanceProfile {
                cost_per_hour: InstanceType::T4.profile().cost_per_hour,
                base_throughput: 30.0,
            },
            model_size_multiplier: 0.7,
            batch_size: 4,
            ..reference_config()
        };
        let metrics = evaluate(&config, &PricingRates::default());
        assert!((metrics.adjusted_throughput - 30.0 * 0.7 * 4.0).abs() < 1e-9);
    }
}
