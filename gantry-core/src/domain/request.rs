//! Execution request types
//!
//! A [`ResourceRequest`] pins down the resources a remote job runs with:
//! CPU count, target cloud provider, wall-clock timeout, and the local
//! directories made visible inside the container. Requests are validated
//! before anything is sent to the platform.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Target cloud provider identifier
///
/// Known providers get dedicated variants; anything else round-trips as an
/// opaque identifier the platform is free to interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CloudProvider {
    Aws,
    Gcp,
    Oci,
    Other(String),
}

impl From<String> for CloudProvider {
    fn from(value: String) -> Self {
        match value.as_str() {
            "aws" => CloudProvider::Aws,
            "gcp" => CloudProvider::Gcp,
            "oci" => CloudProvider::Oci,
            _ => CloudProvider::Other(value),
        }
    }
}

impl From<CloudProvider> for String {
    fn from(provider: CloudProvider) -> Self {
        provider.to_string()
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudProvider::Aws => write!(f, "aws"),
            CloudProvider::Gcp => write!(f, "gcp"),
            CloudProvider::Oci => write!(f, "oci"),
            CloudProvider::Other(id) => write!(f, "{}", id),
        }
    }
}

/// A local-directory-to-remote-path mount binding
///
/// The source directory's contents are shipped to the platform at submission
/// time and materialized at `target` inside the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    /// Local source directory; must exist at submission time
    pub source: PathBuf,

    /// Absolute path inside the container
    pub target: String,
}

impl Mount {
    pub fn new(source: impl Into<PathBuf>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Resource constraints and mounts for a remote job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequest {
    /// Number of CPUs to allocate
    pub cpu: u32,

    /// Target cloud provider
    pub cloud: CloudProvider,

    /// Wall-clock limit for the remote job
    pub timeout: Duration,

    /// Local directories made available inside the container
    pub mounts: Vec<Mount>,
}

impl ResourceRequest {
    /// Creates a request with the given CPU count, provider, and timeout
    pub fn new(cpu: u32, cloud: CloudProvider, timeout: Duration) -> Self {
        Self {
            cpu,
            cloud,
            timeout,
            mounts: Vec::new(),
        }
    }

    /// Adds a mount binding
    pub fn with_mount(mut self, mount: Mount) -> Self {
        self.mounts.push(mount);
        self
    }

    /// Validates the request
    ///
    /// Checks every invariant that can be checked locally: the timeout must
    /// be positive, at least one CPU must be requested, and every mount
    /// source must exist as a directory. Runs before any remote call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout.is_zero() {
            return Err(ValidationError::NonPositiveTimeout);
        }

        if self.cpu == 0 {
            return Err(ValidationError::ZeroCpu);
        }

        for mount in &self.mounts {
            match std::fs::metadata(&mount.source) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => {
                    return Err(ValidationError::MountSourceNotADirectory(
                        mount.source.clone(),
                    ));
                }
                Err(_) => {
                    return Err(ValidationError::MissingMountSource(mount.source.clone()));
                }
            }
        }

        Ok(())
    }
}

/// A request invariant violated before submission
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("timeout must be greater than zero")]
    NonPositiveTimeout,

    #[error("at least one CPU must be requested")]
    ZeroCpu,

    #[error("mount source does not exist: {0}")]
    MissingMountSource(PathBuf),

    #[error("mount source is not a directory: {0}")]
    MountSourceNotADirectory(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ResourceRequest {
        ResourceRequest::new(4, CloudProvider::Aws, Duration::from_secs(600))
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_fails() {
        let mut request = valid_request();
        request.timeout = Duration::ZERO;
        assert!(matches!(
            request.validate(),
            Err(ValidationError::NonPositiveTimeout)
        ));
    }

    #[test]
    fn test_zero_cpu_fails() {
        let mut request = valid_request();
        request.cpu = 0;
        assert!(matches!(request.validate(), Err(ValidationError::ZeroCpu)));
    }

    #[test]
    fn test_missing_mount_source_fails() {
        let request = valid_request().with_mount(Mount::new(
            "/definitely/not/a/real/path",
            "/root/data",
        ));
        assert!(matches!(
            request.validate(),
            Err(ValidationError::MissingMountSource(_))
        ));
    }

    #[test]
    fn test_existing_mount_source_passes() {
        let request = valid_request().with_mount(Mount::new(std::env::temp_dir(), "/root/data"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_cloud_provider_round_trip() {
        let json = serde_json::to_string(&CloudProvider::Aws).unwrap();
        assert_eq!(json, "\"aws\"");

        let parsed: CloudProvider = serde_json::from_str("\"on-prem\"").unwrap();
        assert_eq!(parsed, CloudProvider::Other("on-prem".to_string()));
        assert_eq!(parsed.to_string(), "on-prem");
    }
}
