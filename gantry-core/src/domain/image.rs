//! Container image recipe types
//!
//! An [`ImageSpec`] is an ordered list of build steps describing the
//! container environment a job runs in. Steps apply in declared order;
//! construction is by method chaining starting from [`ImageSpec::from_base`],
//! so every spec carries a base image. Once built, a spec is consumed by the
//! launcher to produce an [`ImageHandle`] and is never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// A single image build step
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildStep {
    /// Base OS image selection
    From { image: String },

    /// OS package installation
    AptInstall { packages: Vec<String> },

    /// Environment variable setting; later steps override earlier values
    Env { key: String, value: String },

    /// Arbitrary setup shell command
    Run { command: String },

    /// Working directory for subsequent steps and the executed command
    Workdir { path: String },

    /// Bake a local file into the image at build time
    ///
    /// Distinct from runtime mounts: the file becomes part of the image.
    CopyLocal { source: String, dest: String },
}

impl std::fmt::Display for BuildStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildStep::From { image } => write!(f, "FROM {}", image),
            BuildStep::AptInstall { packages } => {
                write!(f, "APT INSTALL {}", packages.join(" "))
            }
            BuildStep::Env { key, value } => write!(f, "ENV {}={}", key, value),
            BuildStep::Run { command } => write!(f, "RUN {}", command),
            BuildStep::Workdir { path } => write!(f, "WORKDIR {}", path),
            BuildStep::CopyLocal { source, dest } => write!(f, "COPY {} {}", source, dest),
        }
    }
}

/// Declarative recipe for constructing a container environment
///
/// Steps are applied in the order they were declared. The spec is immutable
/// once handed to the launcher; the builder methods consume and return `self`
/// so a recipe reads as a single chained expression:
///
/// ```
/// use gantry_core::domain::image::ImageSpec;
///
/// let spec = ImageSpec::from_base("debian:bookworm-slim")
///     .apt_install(["build-essential", "curl"])
///     .env("RUST_LOG", "info")
///     .run("curl --proto '=https' -sSf https://sh.rustup.rs | sh -s -- -y")
///     .workdir("/app");
///
/// assert_eq!(spec.base_image(), Some("debian:bookworm-slim"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    steps: Vec<BuildStep>,
}

impl ImageSpec {
    /// Starts a new spec from a base OS image
    pub fn from_base(image: impl Into<String>) -> Self {
        Self {
            steps: vec![BuildStep::From {
                image: image.into(),
            }],
        }
    }

    /// Appends an OS package installation step
    pub fn apt_install<I, S>(mut self, packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.push(BuildStep::AptInstall {
            packages: packages.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Appends an environment variable step
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.steps.push(BuildStep::Env {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Appends a setup shell command step
    pub fn run(mut self, command: impl Into<String>) -> Self {
        self.steps.push(BuildStep::Run {
            command: command.into(),
        });
        self
    }

    /// Appends a working directory step
    pub fn workdir(mut self, path: impl Into<String>) -> Self {
        self.steps.push(BuildStep::Workdir { path: path.into() });
        self
    }

    /// Appends a build-time file copy step
    pub fn copy_local(mut self, source: impl Into<String>, dest: impl Into<String>) -> Self {
        self.steps.push(BuildStep::CopyLocal {
            source: source.into(),
            dest: dest.into(),
        });
        self
    }

    /// The ordered build steps
    pub fn steps(&self) -> &[BuildStep] {
        &self.steps
    }

    /// The base OS image this spec starts from
    pub fn base_image(&self) -> Option<&str> {
        self.steps.iter().find_map(|step| match step {
            BuildStep::From { image } => Some(image.as_str()),
            _ => None,
        })
    }

    /// Resolves the environment the steps produce
    ///
    /// `Env` steps apply in declared order, so a later step wins for a
    /// repeated key.
    pub fn effective_env(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();
        for step in &self.steps {
            if let BuildStep::Env { key, value } = step {
                env.insert(key.clone(), value.clone());
            }
        }
        env
    }

    /// Deterministic digest of the step list
    ///
    /// Identical specs yield identical fingerprints; any change to step
    /// content or order changes the value. Sent to the platform as an
    /// idempotency key so rebuilding the same spec reuses the cached image.
    pub fn fingerprint(&self) -> String {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        self.steps.hash(&mut hasher);
        format!("{:016x}", hasher.finish())
    }
}

/// Handle to an image built on the execution platform
///
/// Pairs the platform's image id with the local spec fingerprint it was
/// built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    /// Platform-assigned image id
    pub image_id: Uuid,

    /// Fingerprint of the spec the image was built from
    pub fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> ImageSpec {
        ImageSpec::from_base("debian:bookworm-slim")
            .apt_install(["build-essential", "curl"])
            .env("CARGO_HOME", "/opt/cargo")
            .run("cargo build --release")
    }

    #[test]
    fn test_steps_preserve_declared_order() {
        let spec = sample_spec();
        let kinds: Vec<&str> = spec
            .steps()
            .iter()
            .map(|step| match step {
                BuildStep::From { .. } => "from",
                BuildStep::AptInstall { .. } => "apt",
                BuildStep::Env { .. } => "env",
                BuildStep::Run { .. } => "run",
                BuildStep::Workdir { .. } => "workdir",
                BuildStep::CopyLocal { .. } => "copy",
            })
            .collect();

        assert_eq!(kinds, vec!["from", "apt", "env", "run"]);
    }

    #[test]
    fn test_base_image() {
        assert_eq!(sample_spec().base_image(), Some("debian:bookworm-slim"));
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(sample_spec().fingerprint(), sample_spec().fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = ImageSpec::from_base("debian:bookworm-slim").run("true");
        let b = ImageSpec::from_base("debian:bookworm-slim").run("false");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_order() {
        let a = ImageSpec::from_base("alpine:3.20")
            .run("echo one")
            .run("echo two");
        let b = ImageSpec::from_base("alpine:3.20")
            .run("echo two")
            .run("echo one");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_effective_env_later_step_wins() {
        let spec = ImageSpec::from_base("alpine:3.20")
            .env("MODE", "debug")
            .run("true")
            .env("MODE", "release")
            .env("REGION", "us-east-1");

        let env = spec.effective_env();
        assert_eq!(env.get("MODE"), Some(&"release".to_string()));
        assert_eq!(env.get("REGION"), Some(&"us-east-1".to_string()));
    }

    #[test]
    fn test_step_serialization_is_tagged() {
        let step = BuildStep::Env {
            key: "PATH".to_string(),
            value: "/opt/bin".to_string(),
        };
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["kind"], "env");
        assert_eq!(json["key"], "PATH");
    }
}
