//! Job polling endpoints

use uuid::Uuid;

use crate::PlatformClient;
use crate::error::Result;
use gantry_core::dto::job::JobDto;

impl PlatformClient {
    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The job record, including the result once the status is terminal
    pub async fn get_job(&self, job_id: Uuid) -> Result<JobDto> {
        let url = format!("{}/api/jobs/{}", self.base_url, job_id);
        let request = self.authorize(self.client.get(&url));
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
