//! Job manifest parsing
//!
//! A job manifest is a TOML file declaring the image recipe, the resource
//! constraints, the mounts, and the command to execute. It is the CLI's
//! declarative surface over the core domain types.
//!
//! Image steps are grouped by kind in the manifest and applied in a fixed
//! order: base, apt, env, workdir, copy, run. Within a group the declared
//! order is preserved, so the shell commands in `run` execute in the
//! manifest's working directory with the manifest's environment in place.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gantry_core::domain::image::ImageSpec;
use gantry_core::domain::request::{CloudProvider, Mount, ResourceRequest};

/// A parsed job manifest
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobManifest {
    /// Human-readable job name
    pub name: String,

    /// Shell command executed inside the container
    pub command: String,

    pub image: ImageSection,
    pub resources: ResourcesSection,

    #[serde(default)]
    pub mounts: Vec<MountSection>,
}

/// The `[image]` section: a grouped image recipe
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSection {
    /// Base OS image
    pub base: String,

    /// OS packages to install
    #[serde(default)]
    pub apt: Vec<String>,

    /// Environment variables, applied in declared order
    #[serde(default)]
    pub env: Vec<EnvVar>,

    /// Working directory for setup commands and the job command
    #[serde(default)]
    pub workdir: Option<String>,

    /// Local files baked into the image at build time
    #[serde(default)]
    pub copy: Vec<CopySpec>,

    /// Setup shell commands, applied in declared order
    #[serde(default)]
    pub run: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvVar {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopySpec {
    pub source: String,
    pub dest: String,
}

/// The `[resources]` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcesSection {
    pub cpu: u32,
    pub cloud: String,
    pub timeout_seconds: u64,
}

/// One `[[mounts]]` entry
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MountSection {
    pub source: PathBuf,
    pub target: String,
}

impl JobManifest {
    /// Loads and parses a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;

        toml::from_str(&text)
            .with_context(|| format!("Failed to parse manifest {}", path.display()))
    }

    /// Converts the image section into an ordered step list
    pub fn image_spec(&self) -> ImageSpec {
        let mut spec = ImageSpec::from_base(&self.image.base);

        if !self.image.apt.is_empty() {
            spec = spec.apt_install(self.image.apt.iter().map(String::as_str));
        }

        for var in &self.image.env {
            spec = spec.env(&var.key, &var.value);
        }

        if let Some(workdir) = &self.image.workdir {
            spec = spec.workdir(workdir);
        }

        for copy in &self.image.copy {
            spec = spec.copy_local(&copy.source, &copy.dest);
        }

        for command in &self.image.run {
            spec = spec.run(command);
        }

        spec
    }

    /// Converts the resources and mounts sections into a request
    pub fn resource_request(&self) -> ResourceRequest {
        let mut request = ResourceRequest::new(
            self.resources.cpu,
            CloudProvider::from(self.resources.cloud.clone()),
            Duration::from_secs(self.resources.timeout_seconds),
        );

        for mount in &self.mounts {
            request = request.with_mount(Mount::new(&mount.source, &mount.target));
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::domain::image::BuildStep;

    const SAMPLE: &str = r#"
name = "demo"
command = "./bin/app run"

[image]
base = "debian:bookworm-slim"
apt = ["curl"]
env = [{ key = "RUST_LOG", value = "info" }]
workdir = "/root/project"
run = ["echo ready"]

[resources]
cpu = 4
cloud = "aws"
timeout_seconds = 600

[[mounts]]
source = "./target/release"
target = "/root/bin"
"#;

    #[test]
    fn test_parse_sample() {
        let manifest: JobManifest = toml::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.name, "demo");
        assert_eq!(manifest.command, "./bin/app run");
        assert_eq!(manifest.mounts.len(), 1);
    }

    #[test]
    fn test_image_spec_step_order() {
        let manifest: JobManifest = toml::from_str(SAMPLE).unwrap();
        let spec = manifest.image_spec();

        let kinds: Vec<&str> = spec
            .steps()
            .iter()
            .map(|step| match step {
                BuildStep::From { .. } => "from",
                BuildStep::AptInstall { .. } => "apt",
                BuildStep::Env { .. } => "env",
                BuildStep::Workdir { .. } => "workdir",
                BuildStep::CopyLocal { .. } => "copy",
                BuildStep::Run { .. } => "run",
            })
            .collect();

        assert_eq!(kinds, vec!["from", "apt", "env", "workdir", "run"]);
    }

    #[test]
    fn test_resource_request_conversion() {
        let manifest: JobManifest = toml::from_str(SAMPLE).unwrap();
        let request = manifest.resource_request();

        assert_eq!(request.cpu, 4);
        assert_eq!(request.cloud, CloudProvider::Aws);
        assert_eq!(request.timeout, Duration::from_secs(600));
        assert_eq!(request.mounts.len(), 1);
        assert_eq!(request.mounts[0].target, "/root/bin");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let text = SAMPLE.replace("[resources]", "retries = 3\n\n[resources]");
        assert!(toml::from_str::<JobManifest>(&text).is_err());
    }

    #[test]
    fn test_missing_command_is_rejected() {
        let text = SAMPLE.replace("command = \"./bin/app run\"\n", "");
        assert!(toml::from_str::<JobManifest>(&text).is_err());
    }
}
