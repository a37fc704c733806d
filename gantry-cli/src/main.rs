//! Gantry CLI
//!
//! Command-line entry point for launching remote, sandboxed compute jobs
//! against the execution platform.

mod commands;
mod config;
mod manifest;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gantry")]
#[command(about = "Gantry remote job launcher", long_about = None)]
struct Cli {
    /// Execution platform URL
    #[arg(
        long,
        env = "GANTRY_PLATFORM_URL",
        default_value = "http://localhost:8080"
    )]
    platform_url: String,

    /// API key sent to the platform as a bearer token
    #[arg(long, env = "GANTRY_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries only job output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gantry_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        platform_url: cli.platform_url,
        api_key: cli.api_key,
    };

    handle_command(cli.command, &config).await
}
