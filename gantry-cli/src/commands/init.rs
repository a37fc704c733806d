//! Init command handler
//!
//! Writes a starter job manifest. Two templates cover the two deployment
//! modes: building the artifact from mounted sources at job time, or
//! running a prebuilt binary shipped via mount.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use colored::*;
use std::fs;
use std::path::Path;

/// Starter manifest flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Template {
    /// Toolchain image; the job builds and runs the artifact from mounted sources
    Source,
    /// Slim image; the job runs a prebuilt mounted binary
    Prebuilt,
}

const SOURCE_TEMPLATE: &str = r#"# Gantry job manifest: build and run the artifact from mounted sources.
name = "demo-from-source"
command = "cargo run --release"

[image]
base = "debian:bookworm-slim"
apt = ["build-essential", "curl", "git", "pkg-config", "libssl-dev"]
env = [
    { key = "PATH", value = "/root/.cargo/bin:/usr/local/bin:/usr/bin:/bin" },
    { key = "CARGO_TERM_COLOR", value = "never" },
]
run = [
    "curl --proto '=https' --tlsv1.2 -sSf https://sh.rustup.rs | sh -s -- -y",
]
workdir = "/root/project"

[resources]
cpu = 8
cloud = "aws"
timeout_seconds = 3600

[[mounts]]
source = "."
target = "/root/project"
"#;

const PREBUILT_TEMPLATE: &str = r#"# Gantry job manifest: run a prebuilt binary shipped via mount.
name = "demo-prebuilt"
command = "/root/bin/demo"

[image]
base = "debian:bookworm-slim"
apt = ["ca-certificates"]
workdir = "/root"

[resources]
cpu = 8
cloud = "aws"
timeout_seconds = 600

[[mounts]]
source = "./target/release"
target = "/root/bin"
"#;

/// Write the starter manifest for the chosen template
pub fn handle_init(template: Template, output: &str) -> Result<()> {
    let path = Path::new(output);

    if path.exists() {
        bail!("{} already exists, refusing to overwrite", path.display());
    }

    let contents = match template {
        Template::Source => SOURCE_TEMPLATE,
        Template::Prebuilt => PREBUILT_TEMPLATE,
    };

    fs::write(path, contents)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;

    println!("  {} {}", "Created".green(), path.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  1. Edit the image steps, resources, and mounts for your job");
    println!(
        "  2. Run {} to check the image builds",
        format!("gantry image build {}", path.display()).cyan()
    );
    println!(
        "  3. Run {} to execute the job",
        format!("gantry launch {}", path.display()).cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::JobManifest;

    #[test]
    fn test_templates_parse_as_manifests() {
        for template in [SOURCE_TEMPLATE, PREBUILT_TEMPLATE] {
            let manifest: JobManifest = toml::from_str(template).unwrap();
            assert!(!manifest.command.is_empty());
            assert!(manifest.resources.timeout_seconds > 0);
        }
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantry.toml");
        std::fs::write(&path, "existing").unwrap();

        let result = handle_init(Template::Source, path.to_str().unwrap());
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "existing");
    }

    #[test]
    fn test_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gantry.toml");

        handle_init(Template::Prebuilt, path.to_str().unwrap()).unwrap();
        let manifest = JobManifest::load(&path).unwrap();
        assert_eq!(manifest.name, "demo-prebuilt");
    }
}
