//! CLI command definitions.
//!
//! `estimate`, `scenarios`, and `sweep` drive the capacity/cost
//! estimator; `chat` opens an interactive conversation against the
//! configured completion endpoint.

use clap::{Args, Parser, Subcommand, ValueEnum};

use inferlab_estimator::{EndpointConfig, InstanceType, ModelSize, Region};

pub mod chat;
pub mod estimate;
pub mod scenarios;
pub mod sweep;

/// inferlab - endpoint cost estimation and chat for hosted inference
#[derive(Parser)]
#[command(name = "inferlab")]
#[command(version, about = "Cost estimation and chat for hosted inference endpoints")]
#[command(long_about = r#"
inferlab estimates replica counts, throughput, and monthly cost for GPU
inference endpoint deployments, and provides a terminal chat client for
an OpenAI-compatible completion endpoint.

COMMANDS:
  estimate   → Evaluate a configuration into replicas, throughput, cost
  scenarios  → Compare preset usage scenarios side by side
  sweep      → Show how replicas and cost scale with concurrent users
  chat       → Interactive conversation with the completion endpoint

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration validation failure
  4 - Completion provider not configured
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate an endpoint configuration
    Estimate(estimate::EstimateArgs),

    /// Compare preset usage scenarios
    Scenarios(scenarios::ScenariosArgs),

    /// Cost scaling analysis across user loads
    Sweep(sweep::SweepArgs),

    /// Chat with the completion endpoint
    Chat(chat::ChatArgs),
}

/// GPU instance choice.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InstanceArg {
    T4,
    L4,
    L40s,
    A10g,
    A100,
    H100,
}

impl InstanceArg {
    pub fn to_instance(self) -> InstanceType {
        match self {
            Self::T4 => InstanceType::T4,
            Self::L4 => InstanceType::L4,
            Self::L40s => InstanceType::L40S,
            Self::A10g => InstanceType::A10G,
            Self::A100 => InstanceType::A100,
            Self::H100 => InstanceType::H100,
        }
    }
}

/// Model size bucket.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModelSizeArg {
    /// ~1B parameters
    Small,
    /// ~3B parameters
    Medium,
    /// ~7B parameters
    Large,
    /// 13B+ parameters
    Xl,
}

impl ModelSizeArg {
    pub fn to_model_size(self) -> ModelSize {
        match self {
            Self::Small => ModelSize::Small1B,
            Self::Medium => ModelSize::Medium3B,
            Self::Large => ModelSize::Large7B,
            Self::Xl => ModelSize::Xl13B,
        }
    }
}

/// Deployment region.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RegionArg {
    UsEast,
    EuWest,
    AsiaPacific,
}

impl RegionArg {
    pub fn to_region(self) -> Region {
        match self {
            Self::UsEast => Region::UsEast,
            Self::EuWest => Region::EuWest,
            Self::AsiaPacific => Region::AsiaPacific,
        }
    }
}

/// Endpoint configuration flags shared by the estimator commands.
#[derive(Args)]
pub struct ConfigArgs {
    /// Concurrent users hitting the endpoint
    #[arg(long, default_value_t = 100)]
    pub users: u32,

    /// Average requests each user makes per hour
    #[arg(long, default_value_t = 10)]
    pub requests_per_user_hour: u32,

    /// Average tokens per model response
    #[arg(long, default_value_t = 150)]
    pub response_tokens: u32,

    /// Hours per day the service is actively used
    #[arg(long, default_value_t = 12)]
    pub active_hours: u32,

    /// Operational days per month
    #[arg(long, default_value_t = 30)]
    pub days: u32,

    /// GPU instance type
    #[arg(long, value_enum, default_value_t = InstanceArg::L40s)]
    pub instance: InstanceArg,

    /// Deployed model size
    #[arg(long, value_enum, default_value_t = ModelSizeArg::Medium)]
    pub model_size: ModelSizeArg,

    /// Inactivity minutes before scaling down
    #[arg(long, default_value_t = 60)]
    pub scale_to_zero: u32,

    /// Autoscaling replica ceiling
    #[arg(long, default_value_t = 10)]
    pub max_replicas: u32,

    /// Autoscaling replica floor (0 enables scale-to-zero)
    #[arg(long, default_value_t = 0)]
    pub min_replicas: u32,

    /// Minutes to cold-start a replica
    #[arg(long, default_value_t = 2)]
    pub cold_start: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    pub timeout: u32,

    /// Requests processed together per forward pass
    #[arg(long, default_value_t = 1)]
    pub batch_size: u32,

    /// Deployment region
    #[arg(long, value_enum, default_value_t = RegionArg::UsEast)]
    pub region: RegionArg,

    /// Estimated monthly data egress in GB
    #[arg(long, default_value_t = 100.0)]
    pub data_transfer_gb: f64,

    /// Model storage in GB
    #[arg(long, default_value_t = 5.0)]
    pub storage_gb: f64,
}

impl ConfigArgs {
    /// Build and validate the estimator configuration.
    pub fn to_config(&self) -> anyhow::Result<EndpointConfig> {
        let config = EndpointConfig {
            concurrent_users: self.users,
            requests_per_user_hour: self.requests_per_user_hour,
            avg_response_tokens: self.response_tokens,
            daily_active_hours: self.active_hours,
            days_per_month: self.days,
            instance: self.instance.to_instance().profile(),
            model_size_multiplier: self.model_size.to_model_size().multiplier(),
            scale_to_zero_minutes: self.scale_to_zero,
            max_replicas: self.max_replicas,
            min_replicas: self.min_replicas,
            cold_start_minutes: self.cold_start,
            request_timeout_seconds: self.timeout,
            batch_size: self.batch_size,
            regional_multiplier: self.region.to_region().multiplier(),
            data_transfer_gb: self.data_transfer_gb,
            storage_gb: self.storage_gb,
        };
        config.validate()?;
        Ok(config)
    }
}
