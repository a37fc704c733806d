//! Image command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use std::path::Path;

use crate::config::Config;
use crate::manifest::JobManifest;

/// Image subcommands
#[derive(Subcommand)]
pub enum ImageCommands {
    /// Build a manifest's image without launching the job
    Build {
        /// Path to the job manifest
        manifest: String,
    },
}

/// Handle image commands
///
/// # Arguments
/// * `command` - The image command to execute
/// * `config` - The CLI configuration
pub async fn handle_image_command(command: ImageCommands, config: &Config) -> Result<()> {
    match command {
        ImageCommands::Build { manifest } => build_image(&manifest, config).await,
    }
}

/// Build the image declared by a manifest and print its handle
async fn build_image(manifest_path: &str, config: &Config) -> Result<()> {
    let manifest = JobManifest::load(Path::new(manifest_path))?;
    let spec = manifest.image_spec();

    println!(
        "{}",
        format!(
            "Building image for '{}' ({} step(s))...",
            manifest.name,
            spec.steps().len()
        )
        .bold()
    );

    let launcher = super::launcher(config);
    let handle = launcher.build_image(&spec).await?;

    println!("{}", "✓ Image ready".green().bold());
    println!("  Image ID:    {}", handle.image_id.to_string().cyan());
    println!("  Fingerprint: {}", handle.fingerprint.dimmed());

    Ok(())
}
