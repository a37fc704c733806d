//! Function binding endpoints

use uuid::Uuid;

use crate::PlatformClient;
use crate::error::Result;
use gantry_core::dto::function::{BindFunction, FunctionDto};
use gantry_core::dto::job::InvocationDto;

impl PlatformClient {
    /// Bind a command to an image with resource constraints and mounts
    ///
    /// # Arguments
    /// * `req` - The binding request
    ///
    /// # Returns
    /// The function binding record
    pub async fn bind_function(&self, req: BindFunction) -> Result<FunctionDto> {
        let url = format!("{}/api/functions", self.base_url);
        let request = self.authorize(self.client.post(&url).json(&req));
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Invoke a function binding
    ///
    /// Triggers one job execution; the returned job id is polled via
    /// [`PlatformClient::get_job`].
    pub async fn invoke_function(&self, function_id: Uuid) -> Result<InvocationDto> {
        let url = format!("{}/api/functions/{}/invoke", self.base_url, function_id);
        let request = self.authorize(self.client.post(&url));
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
