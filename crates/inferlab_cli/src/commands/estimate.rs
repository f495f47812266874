//! Estimate command - Evaluate one endpoint configuration.

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::info;

use inferlab_estimator::{evaluate, PricingRates};

use super::ConfigArgs;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

pub async fn execute(args: EstimateArgs) -> Result<()> {
    let config = args.config.to_config()?;
    let rates = PricingRates::from_env();

    info!(
        users = config.concurrent_users,
        instance = args.config.instance.to_instance().display_name(),
        "evaluating endpoint configuration"
    );

    let metrics = evaluate(&config, &rates);

    if matches!(args.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
        return Ok(());
    }

    println!("Endpoint Estimate");
    println!("=================");
    println!();
    println!("  Monthly cost:       ${:.2}", metrics.total_monthly_cost);
    println!("  Replicas:           {}", metrics.actual_replicas);
    println!("  Capacity:           {:.0} requests/hour", metrics.max_requests_per_hour);
    println!("  Utilization:        {:.1}%", metrics.utilization_percentage);
    println!();
    println!("Performance");
    println!("  Requests/second:    {:.1}", metrics.requests_per_second);
    println!("  Tokens/second:      {:.0}", metrics.tokens_per_second);
    println!("  Avg response time:  {:.1}s", metrics.avg_response_time_seconds);
    match metrics.cold_start_impact(&config) {
        Some(minutes) => println!("  Cold start impact:  {} min", minutes),
        None => println!("  Cold start impact:  none"),
    }
    println!();
    println!("Monthly Cost Breakdown");
    println!(
        "  Compute ({} x {}):  ${:.2}",
        metrics.actual_replicas,
        args.config.instance.to_instance().display_name(),
        metrics.monthly_compute_cost
    );
    println!(
        "  Data transfer ({:.1} GB):   ${:.2}",
        config.data_transfer_gb, metrics.data_transfer_cost
    );
    println!(
        "  Storage ({:.1} GB):         ${:.2}",
        config.storage_gb, metrics.storage_cost
    );
    println!("  Total:                    ${:.2}", metrics.total_monthly_cost);

    let advisories = metrics.advisories(&config);
    if !advisories.is_empty() {
        println!();
        for advisory in advisories {
            println!("⚠️  {}", advisory);
        }
    }

    Ok(())
}
