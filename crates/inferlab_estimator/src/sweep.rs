//! Cost scaling analysis: how replicas and monthly compute cost grow
//! as concurrent users increase, all other parameters held fixed.

use serde::{Deserialize, Serialize};

use crate::config::{EndpointConfig, PricingRates};
use crate::metrics::evaluate;

/// User loads for the standard cost scaling table.
pub const DEFAULT_USER_LOADS: [u32; 8] = [10, 50, 100, 250, 500, 1000, 2000, 5000];

/// One row of the cost scaling table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepPoint {
    pub concurrent_users: u32,
    pub total_requests_per_hour: u64,
    pub actual_replicas: u32,
    pub monthly_compute_cost: f64,
}

/// Evaluate the configuration at each user load.
///
/// Each point is a full [`evaluate`] with only `concurrent_users`
/// substituted, so the table agrees with the main estimate by
/// construction.
pub fn sweep_users(
    config: &EndpointConfig,
    rates: &PricingRates,
    user_loads: &[u32],
) -> Vec<SweepPoint> {
    user_loads
        .iter()
        .map(|&users| {
            let point_config = EndpointConfig {
                concurrent_users: users,
                ..config.clone()
            };
            let metrics = evaluate(&point_config, rates);
            SweepPoint {
                concurrent_users: users,
                total_requests_per_hour: metrics.total_requests_per_hour,
                actual_replicas: metrics.actual_replicas,
                monthly_compute_cost: metrics.monthly_compute_cost,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_matches_direct_evaluation() {
        let config = EndpointConfig::default();
        let rates = PricingRates::default();

        let points = sweep_users(&config, &rates, &DEFAULT_USER_LOADS);
        assert_eq!(points.len(), DEFAULT_USER_LOADS.len());

        for point in &points {
            let direct = evaluate(
                &EndpointConfig {
                    concurrent_users: point.concurrent_users,
                    ..config.clone()
                },
                &rates,
            );
            assert_eq!(point.actual_replicas, direct.actual_replicas);
            assert_eq!(point.monthly_compute_cost, direct.monthly_compute_cost);
        }
    }

    #[test]
    fn test_cost_monotone_in_users() {
        let config = EndpointConfig::default();
        let points = sweep_users(&config, &PricingRates::default(), &DEFAULT_USER_LOADS);

        for pair in points.windows(2) {
            assert!(pair[1].monthly_compute_cost >= pair[0].monthly_compute_cost);
        }
    }

    #[test]
    fn test_sweep_respects_replica_ceiling() {
        let config = EndpointConfig {
            max_replicas: 3,
            ..EndpointConfig::default()
        };
        let points = sweep_users(&config, &PricingRates::default(), &[5000, 50_000]);
        for point in points {
            assert!(point.actual_replicas <= 3);
        }
    }
}
