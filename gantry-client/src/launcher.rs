//! Remote job launcher
//!
//! Composes the platform client into the launcher contract: build an image
//! from a spec, submit a command against it under resource constraints, and
//! block until the result comes back or the timeout elapses.
//!
//! One job per invocation, no retries, no recovery. Cancellation is solely
//! via the timeout.

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};
use uuid::Uuid;

use gantry_core::domain::image::{ImageHandle, ImageSpec};
use gantry_core::domain::job::{JobResult, JobStatus};
use gantry_core::domain::request::ResourceRequest;
use gantry_core::dto::function::BindFunction;
use gantry_core::dto::image::{BuildState, CreateImageBuild};
use gantry_core::dto::job::JobDto;

use crate::PlatformClient;
use crate::error::{ClientError, LaunchError};
use crate::mounts::package_mount;

/// Default interval between status polls
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Launches remote jobs against the execution platform
pub struct Launcher {
    client: PlatformClient,
    poll_interval: Duration,
}

impl Launcher {
    /// Creates a launcher over a platform client
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the status poll interval
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Builds an image from a spec, blocking until the build finishes
    ///
    /// Deterministic given an identical spec: the fingerprint acts as an
    /// idempotency key, so the platform answers a repeated build with the
    /// already-built image. A failed build step surfaces as
    /// [`LaunchError::Build`] with the step and captured log.
    pub async fn build_image(&self, spec: &ImageSpec) -> Result<ImageHandle, LaunchError> {
        let fingerprint = spec.fingerprint();
        info!(
            "Submitting image build ({} step(s), fingerprint {})",
            spec.steps().len(),
            fingerprint
        );

        let build = self
            .client
            .create_image_build(CreateImageBuild {
                fingerprint: fingerprint.clone(),
                steps: spec.steps().to_vec(),
            })
            .await?;
        let build_id = build.id;
        let mut state = build.state;

        loop {
            match state {
                BuildState::Ready => {
                    info!("Image build {} ready", build_id);
                    return Ok(ImageHandle {
                        image_id: build_id,
                        fingerprint,
                    });
                }
                BuildState::Failed { step, log } => {
                    return Err(LaunchError::Build { step, log });
                }
                BuildState::Pending | BuildState::Building => {
                    debug!("Image build {} in progress", build_id);
                    sleep(self.poll_interval).await;
                    state = self.client.get_image_build(build_id).await?.state;
                }
            }
        }
    }

    /// Submits a command for remote execution inside a built image
    ///
    /// Validates the request first; an invalid request fails with
    /// [`LaunchError::InvalidRequest`] before anything is sent. Mounts are
    /// packaged from their local sources, a function binding is created and
    /// invoked, and the job is polled until completion. The whole wait is
    /// bounded by the request's timeout.
    pub async fn submit(
        &self,
        handle: &ImageHandle,
        request: &ResourceRequest,
        command: &str,
    ) -> Result<JobResult, LaunchError> {
        request.validate()?;

        let mounts = request
            .mounts
            .iter()
            .map(package_mount)
            .collect::<Result<Vec<_>, _>>()?;

        let function = self
            .client
            .bind_function(BindFunction {
                image_id: handle.image_id,
                command: command.to_string(),
                cpu: request.cpu,
                cloud: request.cloud.clone(),
                timeout_seconds: request.timeout.as_secs(),
                mounts,
            })
            .await?;

        let invocation = self.client.invoke_function(function.id).await?;
        info!(
            "Job {} started (cpu={}, cloud={}, timeout={:?})",
            invocation.job_id, request.cpu, request.cloud, request.timeout
        );

        match tokio::time::timeout(
            request.timeout,
            self.wait_for_job(invocation.job_id, request.timeout),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LaunchError::Timeout {
                limit: request.timeout,
            }),
        }
    }

    /// Builds the image and submits the command in one call
    ///
    /// The local entry point: the caller prints the returned result's
    /// output on standard output.
    pub async fn invoke(
        &self,
        spec: &ImageSpec,
        request: &ResourceRequest,
        command: &str,
    ) -> Result<JobResult, LaunchError> {
        let handle = self.build_image(spec).await?;
        self.submit(&handle, request, command).await
    }

    /// Polls a job until its status is terminal
    async fn wait_for_job(&self, job_id: Uuid, limit: Duration) -> Result<JobResult, LaunchError> {
        loop {
            let job = self.client.get_job(job_id).await?;

            match job_outcome(job, limit) {
                Some(outcome) => {
                    if outcome.is_ok() {
                        info!("Job {} succeeded", job_id);
                    }
                    return outcome;
                }
                None => {
                    debug!("Job {} still in progress", job_id);
                    sleep(self.poll_interval).await;
                }
            }
        }
    }
}

/// Maps a polled job record to its outcome
///
/// Returns `None` while the job is still in progress. A nonzero remote exit
/// maps to [`LaunchError::RemoteExecution`]; a platform-side timeout maps to
/// [`LaunchError::Timeout`].
fn job_outcome(job: JobDto, limit: Duration) -> Option<Result<JobResult, LaunchError>> {
    match job.status {
        JobStatus::Succeeded | JobStatus::Failed => Some(match job.result {
            Some(result) if result.success && result.exit_code == 0 => Ok(result),
            Some(result) => Err(LaunchError::RemoteExecution {
                exit_code: result.exit_code,
                output: result.output,
            }),
            None => Err(LaunchError::Client(ClientError::ParseError(format!(
                "job {} reported terminal status without a result",
                job.id
            )))),
        }),
        JobStatus::TimedOut => Some(Err(LaunchError::Timeout { limit })),
        JobStatus::Queued | JobStatus::Building | JobStatus::Running => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gantry_core::domain::request::{CloudProvider, Mount};

    // Validation runs before any connection is attempted, so a dead
    // address is never dialed by these tests.
    fn launcher() -> Launcher {
        Launcher::new(PlatformClient::new("http://127.0.0.1:9"))
    }

    fn handle() -> ImageHandle {
        ImageHandle {
            image_id: Uuid::new_v4(),
            fingerprint: "0123456789abcdef".to_string(),
        }
    }

    fn job_dto(status: JobStatus, result: Option<JobResult>) -> JobDto {
        JobDto {
            id: Uuid::new_v4(),
            function_id: Uuid::new_v4(),
            status,
            requested_at: chrono::Utc::now(),
            started_at: None,
            completed_at: None,
            result,
        }
    }

    #[tokio::test]
    async fn test_submit_rejects_zero_timeout() {
        let request = ResourceRequest::new(1, CloudProvider::Aws, Duration::ZERO);

        let err = launcher()
            .submit(&handle(), &request, "true")
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_mount_source() {
        let request = ResourceRequest::new(1, CloudProvider::Aws, Duration::from_secs(60))
            .with_mount(Mount::new("/definitely/not/a/real/path", "/root/data"));

        let err = launcher()
            .submit(&handle(), &request, "true")
            .await
            .unwrap_err();

        assert!(matches!(err, LaunchError::InvalidRequest(_)));
    }

    #[test]
    fn test_poll_interval_override() {
        let launcher = launcher().with_poll_interval(Duration::from_millis(100));
        assert_eq!(launcher.poll_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_outcome_zero_exit_is_success() {
        let job = job_dto(
            JobStatus::Succeeded,
            Some(JobResult {
                success: true,
                exit_code: 0,
                output: "hello from the job\n".to_string(),
                error_message: None,
            }),
        );

        let result = job_outcome(job, Duration::from_secs(60)).unwrap().unwrap();
        assert!(result.success);
        assert_eq!(result.output, "hello from the job\n");
    }

    #[test]
    fn test_outcome_nonzero_exit_is_remote_execution_error() {
        let job = job_dto(
            JobStatus::Failed,
            Some(JobResult {
                success: false,
                exit_code: 1,
                output: "boom".to_string(),
                error_message: None,
            }),
        );

        let err = job_outcome(job, Duration::from_secs(60)).unwrap().unwrap_err();
        match err {
            LaunchError::RemoteExecution { exit_code, output } => {
                assert_eq!(exit_code, 1);
                assert_eq!(output, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_outcome_platform_timeout() {
        let job = job_dto(JobStatus::TimedOut, None);
        let err = job_outcome(job, Duration::from_secs(60)).unwrap().unwrap_err();
        assert!(matches!(err, LaunchError::Timeout { .. }));
    }

    #[test]
    fn test_outcome_in_progress_is_none() {
        for status in [JobStatus::Queued, JobStatus::Building, JobStatus::Running] {
            assert!(job_outcome(job_dto(status, None), Duration::from_secs(60)).is_none());
        }
    }

    #[test]
    fn test_outcome_terminal_without_result_is_client_error() {
        let job = job_dto(JobStatus::Succeeded, None);
        let err = job_outcome(job, Duration::from_secs(60)).unwrap().unwrap_err();
        assert!(matches!(err, LaunchError::Client(_)));
    }
}
