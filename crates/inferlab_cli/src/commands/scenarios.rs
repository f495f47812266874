//! Scenarios command - Compare preset usage scenarios.

use anyhow::Result;
use clap::Args;

use inferlab_estimator::{evaluate_scenario, Scenario, ScenarioContext};

use super::{ModelSizeArg, RegionArg};

#[derive(Args)]
pub struct ScenariosArgs {
    /// Deployed model size shared by all scenarios
    #[arg(long, value_enum, default_value_t = ModelSizeArg::Medium)]
    pub model_size: ModelSizeArg,

    /// Deployment region shared by all scenarios
    #[arg(long, value_enum, default_value_t = RegionArg::UsEast)]
    pub region: RegionArg,
}

pub async fn execute(args: ScenariosArgs) -> Result<()> {
    let context = ScenarioContext {
        model_size_multiplier: args.model_size.to_model_size().multiplier(),
        regional_multiplier: args.region.to_region().multiplier(),
    };

    println!("Scenario Comparison");
    println!("===================");
    println!();
    println!(
        "{:<24} {:>8} {:>12} {:>14} {:>14}",
        "Scenario", "Users", "Req/hour", "Instance", "Monthly"
    );

    for scenario in Scenario::presets() {
        let cost = evaluate_scenario(&scenario, &context);
        println!(
            "{:<24} {:>8} {:>12} {:>14} {:>13}",
            scenario.name,
            scenario.concurrent_users,
            scenario.total_requests_per_hour(),
            scenario.instance.display_name(),
            format!("${:.2}", cost)
        );
    }

    Ok(())
}
