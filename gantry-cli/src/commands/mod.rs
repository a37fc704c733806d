//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod image;
mod init;
mod launch;

pub use image::ImageCommands;
pub use init::Template;

use anyhow::Result;
use clap::Subcommand;

use gantry_client::{Launcher, PlatformClient};

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter job manifest
    Init {
        /// Deployment mode the manifest is written for
        #[arg(long, value_enum, default_value = "source")]
        template: Template,

        /// Where to write the manifest
        #[arg(short, long, default_value = "gantry.toml")]
        output: String,
    },
    /// Image management
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Launch a job from a manifest and print its result
    Launch {
        /// Path to the job manifest
        manifest: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Init { template, output } => init::handle_init(template, &output),
        Commands::Image { command } => image::handle_image_command(command, config).await,
        Commands::Launch { manifest } => launch::handle_launch(&manifest, config).await,
    }
}

/// Build a launcher from the CLI configuration
pub(crate) fn launcher(config: &Config) -> Launcher {
    let mut client = PlatformClient::new(&config.platform_url);
    if let Some(api_key) = &config.api_key {
        client = client.with_api_key(api_key);
    }
    Launcher::new(client)
}
