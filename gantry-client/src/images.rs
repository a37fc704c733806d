//! Image build endpoints

use uuid::Uuid;

use crate::PlatformClient;
use crate::error::Result;
use gantry_core::dto::image::{CreateImageBuild, ImageBuildDto};

impl PlatformClient {
    /// Submit an image build from a declarative spec
    ///
    /// The platform deduplicates on the fingerprint: submitting a spec it
    /// has already built returns the existing build record.
    ///
    /// # Arguments
    /// * `req` - The build request (fingerprint plus ordered steps)
    ///
    /// # Returns
    /// The build record, possibly already `Ready` on a cache hit
    pub async fn create_image_build(&self, req: CreateImageBuild) -> Result<ImageBuildDto> {
        let url = format!("{}/api/images", self.base_url);
        let request = self.authorize(self.client.post(&url).json(&req));
        let response = request.send().await?;

        self.handle_response(response).await
    }

    /// Get an image build by ID
    ///
    /// Used to poll build progress until the state is terminal.
    pub async fn get_image_build(&self, build_id: Uuid) -> Result<ImageBuildDto> {
        let url = format!("{}/api/images/{}", self.base_url, build_id);
        let request = self.authorize(self.client.get(&url));
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
