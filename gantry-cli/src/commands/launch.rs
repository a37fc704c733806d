//! Launch command handler
//!
//! The local entry point: builds the manifest's image, submits the command,
//! blocks until the job finishes, and prints the result. Job output goes to
//! stdout untouched; everything else goes to stderr. On a remote nonzero
//! exit the process exits with the remote command's code.

use anyhow::Result;
use colored::*;
use std::path::Path;

use gantry_client::LaunchError;

use crate::config::Config;
use crate::manifest::JobManifest;

/// Launch the job declared by a manifest
pub async fn handle_launch(manifest_path: &str, config: &Config) -> Result<()> {
    let manifest = JobManifest::load(Path::new(manifest_path))?;
    let spec = manifest.image_spec();
    let request = manifest.resource_request();

    eprintln!(
        "{}",
        format!(
            "Launching '{}' (cpu={}, cloud={}, timeout={}s)...",
            manifest.name,
            request.cpu,
            request.cloud,
            request.timeout.as_secs()
        )
        .bold()
    );

    let launcher = super::launcher(config);

    match launcher.invoke(&spec, &request, &manifest.command).await {
        Ok(result) => {
            eprintln!("{}", "✓ Job succeeded".green().bold());
            print!("{}", result.output);
            Ok(())
        }
        Err(LaunchError::RemoteExecution { exit_code, output }) => {
            eprintln!(
                "{}",
                format!("✗ Remote command exited with code {}", exit_code)
                    .red()
                    .bold()
            );
            if !output.is_empty() {
                eprint!("{}", output);
            }
            // Propagate the remote command's exit code
            std::process::exit(exit_code);
        }
        Err(err) => Err(err.into()),
    }
}
