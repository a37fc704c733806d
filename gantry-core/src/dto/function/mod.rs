//! Remote function binding DTOs
//!
//! A function binding associates a shell command with an image, resource
//! constraints, and mount payloads. Invoking the binding creates a job.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::request::CloudProvider;

/// One file shipped as part of a mount
///
/// `path` is relative to the mount target; contents travel hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePayload {
    pub path: String,
    pub mode: u32,
    pub contents_hex: String,
}

/// A packaged mount: all files under one local source directory,
/// materialized by the platform at `target` inside the container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountPayload {
    pub target: String,
    pub files: Vec<FilePayload>,
}

/// Request to bind a command to an image with resource constraints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindFunction {
    pub image_id: Uuid,
    pub command: String,
    pub cpu: u32,
    pub cloud: CloudProvider,
    pub timeout_seconds: u64,
    pub mounts: Vec<MountPayload>,
}

/// Function binding record returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDto {
    pub id: Uuid,
    pub image_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
