//! Named usage scenarios for cost comparison tables.
//!
//! A scenario substitutes its own traffic shape, schedule, instance, and
//! replica ceiling into the evaluation while keeping the caller's model
//! size and region context fixed. Scenario costs are produced by the same
//! [`evaluate`] used everywhere else, so the comparison table can never
//! drift from the main estimate.

use serde::{Deserialize, Serialize};

use crate::config::{EndpointConfig, InstanceType, PricingRates};
use crate::metrics::evaluate;

/// A named parameter bundle for the scenario comparison table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: &'static str,
    pub concurrent_users: u32,
    pub requests_per_user_hour: u32,
    pub daily_active_hours: u32,
    pub days_per_month: u32,
    pub instance: InstanceType,
    pub max_replicas: u32,
}

impl Scenario {
    /// The standard comparison presets.
    pub fn presets() -> Vec<Scenario> {
        vec![
            Scenario {
                name: "Startup/Development",
                concurrent_users: 10,
                requests_per_user_hour: 5,
                daily_active_hours: 8,
                days_per_month: 22,
                instance: InstanceType::T4,
                max_replicas: 2,
            },
            Scenario {
                name: "Small Business",
                concurrent_users: 100,
                requests_per_user_hour: 10,
                daily_active_hours: 12,
                days_per_month: 30,
                instance: InstanceType::L4,
                max_replicas: 5,
            },
            Scenario {
                name: "Enterprise",
                concurrent_users: 1000,
                requests_per_user_hour: 20,
                daily_active_hours: 16,
                days_per_month: 30,
                instance: InstanceType::A100,
                max_replicas: 20,
            },
            Scenario {
                name: "High-Scale Production",
                concurrent_users: 5000,
                requests_per_user_hour: 15,
                daily_active_hours: 24,
                days_per_month: 30,
                instance: InstanceType::H100,
                max_replicas: 50,
            },
        ]
    }

    /// Offered load for this scenario.
    pub fn total_requests_per_hour(&self) -> u64 {
        u64::from(self.concurrent_users) * u64::from(self.requests_per_user_hour)
    }
}

/// Model and region context shared across all scenarios in a table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioContext {
    pub model_size_multiplier: f64,
    pub regional_multiplier: f64,
}

/// Monthly compute cost for a scenario under the shared context.
///
/// Substitutes the scenario parameters into an [`EndpointConfig`]
/// (batch size 1, replica floor 0) and runs the full evaluation, then
/// returns the compute line.
pub fn evaluate_scenario(scenario: &Scenario, context: &ScenarioContext) -> f64 {
    let config = EndpointConfig {
        concurrent_users: scenario.concurrent_users,
        requests_per_user_hour: scenario.requests_per_user_hour,
        daily_active_hours: scenario.daily_active_hours,
        days_per_month: scenario.days_per_month,
        instance: scenario.instance.profile(),
        max_replicas: scenario.max_replicas,
        min_replicas: 0,
        batch_size: 1,
        model_size_multiplier: context.model_size_multiplier,
        regional_multiplier: context.regional_multiplier,
        ..EndpointConfig::default()
    };

    evaluate(&config, &PricingRates::default()).monthly_compute_cost
}
