//! inferlab CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration validation failure
//! - 4: Completion provider not configured

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const NOT_CONFIGURED: u8 = 4;
}

#[tokio::main]
async fn main() -> ExitCode {
    // Credentials may live in a .env file next to the working directory.
    let _ = dotenvy::dotenv();

    // Initialize logging
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(
            EnvFilter::from_default_env()
                .add_directive("inferlab=info".parse().unwrap())
                .add_directive("warn".parse().unwrap()),
        )
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Estimate(args) => commands::estimate::execute(args).await,
        Commands::Scenarios(args) => commands::scenarios::execute(args).await,
        Commands::Sweep(args) => commands::sweep::execute(args).await,
        Commands::Chat(args) => commands::chat::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<inferlab_estimator::ConfigError>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    if matches!(
        e.downcast_ref::<inferlab_chat::ChatError>(),
        Some(inferlab_chat::ChatError::NotConfigured)
    ) {
        return ExitCodes::NOT_CONFIGURED;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("option") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
