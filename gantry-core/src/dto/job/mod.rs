//! Job invocation DTOs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{JobResult, JobStatus};

/// Response to invoking a function binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationDto {
    pub job_id: Uuid,
}

/// Job record returned by the platform while polling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDto {
    pub id: Uuid,
    pub function_id: Uuid,
    pub status: JobStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub result: Option<JobResult>,
}
