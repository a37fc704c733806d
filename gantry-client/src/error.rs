//! Error types for the Gantry client

use std::time::Duration;
use thiserror::Error;

use gantry_core::domain::request::ValidationError;

use crate::mounts::MountError;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the execution platform
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

/// Errors surfaced by the launcher
///
/// The taxonomy the caller sees: a failed image build step, a job that
/// outlived its timeout, a remote command that exited nonzero, a request
/// rejected before submission, or a transport failure underneath any of
/// those. None are recovered or retried.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// An image construction step's command exited nonzero
    #[error("image build failed at step `{step}`: {log}")]
    Build { step: String, log: String },

    /// The remote job exceeded its allotted time
    #[error("job did not complete within {limit:?}")]
    Timeout { limit: Duration },

    /// The remote command exited nonzero
    #[error("remote command exited with code {exit_code}")]
    RemoteExecution { exit_code: i32, output: String },

    /// The request violated an invariant before submission
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// A mount source could not be packaged
    #[error(transparent)]
    Mount(#[from] MountError),

    /// Transport or API failure
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl LaunchError {
    /// The remote command's exit code, when this error carries one
    pub fn remote_exit_code(&self) -> Option<i32> {
        match self {
            LaunchError::RemoteExecution { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_helpers() {
        let err = ClientError::api_error(404, "no such image");
        assert!(err.is_not_found());

        let err = ClientError::api_error(500, "boom");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_remote_exit_code() {
        let err = LaunchError::RemoteExecution {
            exit_code: 42,
            output: String::new(),
        };
        assert_eq!(err.remote_exit_code(), Some(42));

        let err = LaunchError::Timeout {
            limit: Duration::from_secs(60),
        };
        assert_eq!(err.remote_exit_code(), None);
    }
}
