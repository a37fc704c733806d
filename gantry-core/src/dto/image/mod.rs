//! Image build DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::image::BuildStep;

/// Request to build an image from a declarative spec
///
/// The fingerprint doubles as an idempotency key: the platform reuses a
/// cached image when it has already built an identical spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateImageBuild {
    pub fingerprint: String,
    pub steps: Vec<BuildStep>,
}

/// State of an image build on the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildState {
    Pending,
    Building,
    Ready,
    /// A build step's command exited nonzero
    Failed {
        step: String,
        log: String,
    },
}

/// Image build record returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBuildDto {
    pub id: Uuid,
    pub fingerprint: String,
    pub state: BuildState,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
