//! Endpoint configuration: traffic shape, instance catalog, scaling
//! limits, and per-unit pricing rates.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// GPU instance profile: hourly price and base serving throughput.
///
/// `base_throughput` is in requests per minute for a medium-sized model
/// at batch size 1; the estimator scales it by model size and batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceProfile {
    /// On-demand cost per replica-hour in USD
    #[serde(rename = "costPerHour")]
    pub cost_per_hour: f64,
    /// Requests per minute a single replica sustains
    #[serde(rename = "baseThroughput")]
    pub base_throughput: f64,
}

/// Catalog of supported GPU instance types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceType {
    T4,
    L4,
    L40S,
    A10G,
    A100,
    H100,
}

impl InstanceType {
    /// Pricing and throughput profile for this instance type.
    pub fn profile(&self) -> InstanceProfile {
        match self {
            Self::T4 => InstanceProfile { cost_per_hour: 0.50, base_throughput: 30.0 },
            Self::L4 => InstanceProfile { cost_per_hour: 0.80, base_throughput: 45.0 },
            Self::L40S => InstanceProfile { cost_per_hour: 1.80, base_throughput: 80.0 },
            Self::A10G => InstanceProfile { cost_per_hour: 1.00, base_throughput: 60.0 },
            Self::A100 => InstanceProfile { cost_per_hour: 2.50, base_throughput: 150.0 },
            Self::H100 => InstanceProfile { cost_per_hour: 4.50, base_throughput: 250.0 },
        }
    }

    /// Display name for tables and summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::T4 => "NVIDIA T4",
            Self::L4 => "NVIDIA L4",
            Self::L40S => "NVIDIA L40S",
            Self::A10G => "NVIDIA A10G",
            Self::A100 => "NVIDIA A100",
            Self::H100 => "NVIDIA H100",
        }
    }
}

/// Model size bucket. Larger models reduce effective throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelSize {
    /// ~1B parameters
    Small1B,
    /// ~3B parameters
    Medium3B,
    /// ~7B parameters
    Large7B,
    /// 13B+ parameters
    Xl13B,
}

impl ModelSize {
    /// Throughput multiplier applied to the instance base throughput.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Small1B => 1.5,
            Self::Medium3B => 1.0,
            Self::Large7B => 0.7,
            Self::Xl13B => 0.4,
        }
    }
}

/// Deployment region. Pricing varies by region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    UsEast,
    EuWest,
    AsiaPacific,
}

impl Region {
    /// Cost multiplier relative to US East.
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::UsEast => 1.0,
            Self::EuWest => 1.1,
            Self::AsiaPacific => 1.2,
        }
    }
}

/// Per-unit rates for the non-compute cost lines.
///
/// Kept as configuration rather than literals so pricing updates do not
/// require code changes. Overridable from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRates {
    /// USD per GB of monthly data egress
    pub data_transfer_per_gb: f64,
    /// USD per GB-month of model storage
    pub storage_per_gb_month: f64,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            data_transfer_per_gb: 0.09,
            storage_per_gb_month: 0.10,
        }
    }
}

impl PricingRates {
    /// Load rates, honoring `INFERLAB_TRANSFER_RATE` and
    /// `INFERLAB_STORAGE_RATE` overrides when set and parseable.
    pub fn from_env() -> Self {
        let mut rates = Self::default();

        if let Ok(rate) = std::env::var("INFERLAB_TRANSFER_RATE") {
            if let Ok(value) = rate.parse::<f64>() {
                rates.data_transfer_per_gb = value;
            }
        }

        if let Ok(rate) = std::env::var("INFERLAB_STORAGE_RATE") {
            if let Ok(value) = rate.parse::<f64>() {
                rates.storage_per_gb_month = value;
            }
        }

        rates
    }
}

/// Complete input record for one estimator evaluation.
///
/// Immutable per computation; construct a fresh value for every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointConfig {
    /// Users hitting the endpoint simultaneously
    pub concurrent_users: u32,
    /// Average requests each user makes per hour
    pub requests_per_user_hour: u32,
    /// Average tokens per model response
    pub avg_response_tokens: u32,
    /// Hours per day the service is actively used (1-24)
    pub daily_active_hours: u32,
    /// Operational days per month (1-31)
    pub days_per_month: u32,
    /// GPU instance profile
    pub instance: InstanceProfile,
    /// Throughput multiplier for the deployed model size (> 0)
    pub model_size_multiplier: f64,
    /// Inactivity timeout before scaling down to `min_replicas`
    pub scale_to_zero_minutes: u32,
    /// Autoscaling ceiling (>= 1)
    pub max_replicas: u32,
    /// Autoscaling floor (0 enables scale-to-zero)
    pub min_replicas: u32,
    /// Minutes to bring a replica from cold to serving-ready
    pub cold_start_minutes: u32,
    /// Maximum seconds to wait for a request response
    pub request_timeout_seconds: u32,
    /// Requests processed together per forward pass (>= 1)
    pub batch_size: u32,
    /// Regional price multiplier (> 0)
    pub regional_multiplier: f64,
    /// Estimated monthly data egress in GB
    pub data_transfer_gb: f64,
    /// Model storage in GB
    pub storage_gb: f64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            concurrent_users: 100,
            requests_per_user_hour: 10,
            avg_response_tokens: 150,
            daily_active_hours: 12,
            days_per_month: 30,
            instance: InstanceType::L40S.profile(),
            model_size_multiplier: ModelSize::Medium3B.multiplier(),
            scale_to_zero_minutes: 60,
            max_replicas: 10,
            min_replicas: 0,
            cold_start_minutes: 2,
            request_timeout_seconds: 60,
            batch_size: 1,
            regional_multiplier: Region::UsEast.multiplier(),
            data_transfer_gb: 100.0,
            storage_gb: 5.0,
        }
    }
}

impl EndpointConfig {
    /// Check all documented input ranges.
    ///
    /// [`crate::evaluate`] assumes a validated configuration; in
    /// particular a positive adjusted throughput, so the replica division
    /// never sees zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrent_users < 1 {
            return Err(ConfigError::ConcurrentUsers(self.concurrent_users));
        }
        if self.requests_per_user_hour < 1 {
            return Err(ConfigError::RequestsPerUserHour(self.requests_per_user_hour));
        }
        if !(1..=24).contains(&self.daily_active_hours) {
            return Err(ConfigError::DailyActiveHours(self.daily_active_hours));
        }
        if !(1..=31).contains(&self.days_per_month) {
            return Err(ConfigError::DaysPerMonth(self.days_per_month));
        }
        if self.max_replicas < 1 {
            return Err(ConfigError::MaxReplicas(self.max_replicas));
        }
        if self.min_replicas > self.max_replicas {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_replicas,
                max: self.max_replicas,
            });
        }
        if self.batch_size < 1 {
            return Err(ConfigError::BatchSize(self.batch_size));
        }
        if self.instance.base_throughput <= 0.0 {
            return Err(ConfigError::BaseThroughput(self.instance.base_throughput));
        }
        if self.model_size_multiplier <= 0.0 {
            return Err(ConfigError::ModelSizeMultiplier(self.model_size_multiplier));
        }
        if self.regional_multiplier <= 0.0 {
            return Err(ConfigError::RegionalMultiplier(self.regional_multiplier));
        }
        if self.data_transfer_gb < 0.0 {
            return Err(ConfigError::DataTransfer(self.data_transfer_gb));
        }
        if self.storage_gb < 0.0 {
            return Err(ConfigError::Storage(self.storage_gb));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EndpointConfig::default().validate().is_ok());
    }

    #[test]
    fn test_instance_catalog() {
        let l40s = InstanceType::L40S.profile();
        assert_eq!(l40s.cost_per_hour, 1.80);
        assert_eq!(l40s.base_throughput, 80.0);

        let h100 = InstanceType::H100.profile();
        assert_eq!(h100.cost_per_hour, 4.50);
        assert_eq!(h100.base_throughput, 250.0);
    }

    #[test]
    fn test_model_size_multipliers() {
        assert_eq!(ModelSize::Small1B.multiplier(), 1.5);
        assert_eq!(ModelSize::Medium3B.multiplier(), 1.0);
        assert_eq!(ModelSize::Large7B.multiplier(), 0.7);
        assert_eq!(ModelSize::Xl13B.multiplier(), 0.4);
    }

    #[test]
    fn test_region_multipliers() {
        assert_eq!(Region::UsEast.multiplier(), 1.0);
        assert_eq!(Region::EuWest.multiplier(), 1.1);
        assert_eq!(Region::AsiaPacific.multiplier(), 1.2);
    }

    #[test]
    fn test_validate_rejects_zero_users() {
        let config = EndpointConfig {
            concurrent_users: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ConcurrentUsers(0)));
    }

    #[test]
    fn test_validate_rejects_bad_hours() {
        let config = EndpointConfig {
            daily_active_hours: 25,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DailyActiveHours(25)));
    }

    #[test]
    fn test_validate_rejects_min_above_max() {
        let config = EndpointConfig {
            min_replicas: 5,
            max_replicas: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MinExceedsMax { min: 5, max: 3 })
        );
    }

    #[test]
    fn test_validate_rejects_nonpositive_multiplier() {
        let config = EndpointConfig {
            model_size_multiplier: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ModelSizeMultiplier(_))
        ));
    }

    #[test]
    fn test_validate_rejects_negative_storage() {
        let config = EndpointConfig {
            storage_gb: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Storage(_))));
    }

    #[test]
    fn test_default_pricing_rates() {
        let rates = PricingRates::default();
        assert_eq!(rates.data_transfer_per_gb, 0.09);
        assert_eq!(rates.storage_per_gb_month, 0.10);
    }
}
