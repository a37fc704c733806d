//! Job domain types

use serde::{Deserialize, Serialize};

/// Job lifecycle status as reported by the execution platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Building,
    Running,
    Succeeded,
    Failed,
    TimedOut,
}

impl JobStatus {
    /// Whether the platform will report no further status changes
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Succeeded | JobStatus::Failed | JobStatus::TimedOut
        )
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "Queued"),
            JobStatus::Building => write!(f, "Building"),
            JobStatus::Running => write!(f, "Running"),
            JobStatus::Succeeded => write!(f, "Succeeded"),
            JobStatus::Failed => write!(f, "Failed"),
            JobStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Result of a completed remote job
///
/// Created once on completion and handed to the caller; nothing is
/// persisted. A nonzero process exit maps to `success == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    pub success: bool,
    pub exit_code: i32,

    /// Captured standard output of the remote command
    pub output: String,

    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(JobStatus::Succeeded.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(JobStatus::TimedOut.is_terminal());
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Building.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
    }
}
