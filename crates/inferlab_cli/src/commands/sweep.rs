//! Sweep command - Cost scaling analysis across user loads.

use anyhow::Result;
use clap::Args;

use inferlab_estimator::{sweep_users, PricingRates, DEFAULT_USER_LOADS};

use super::ConfigArgs;

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// User loads to evaluate (defaults to the standard ladder)
    #[arg(long, value_delimiter = ',')]
    pub loads: Option<Vec<u32>>,
}

pub async fn execute(args: SweepArgs) -> Result<()> {
    let config = args.config.to_config()?;
    let rates = PricingRates::from_env();

    let loads = args.loads.unwrap_or_else(|| DEFAULT_USER_LOADS.to_vec());
    let points = sweep_users(&config, &rates, &loads);

    println!("Monthly Cost vs Concurrent Users");
    println!("================================");
    println!();
    println!(
        "{:>10} {:>14} {:>10} {:>14}",
        "Users", "Req/hour", "Replicas", "Monthly"
    );

    for point in points {
        println!(
            "{:>10} {:>14} {:>10} {:>13}",
            point.concurrent_users,
            point.total_requests_per_hour,
            point.actual_replicas,
            format!("${:.2}", point.monthly_compute_cost)
        );
    }

    Ok(())
}
