//! Gantry Platform Client
//!
//! A simple, type-safe HTTP client for the remote execution platform API,
//! plus the [`Launcher`] that composes it into the build → bind → invoke
//! pipeline.
//!
//! # Example
//!
//! ```no_run
//! use gantry_client::{Launcher, PlatformClient};
//! use gantry_core::domain::image::ImageSpec;
//! use gantry_core::domain::request::{CloudProvider, ResourceRequest};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PlatformClient::new("http://localhost:8080");
//!     let launcher = Launcher::new(client);
//!
//!     let spec = ImageSpec::from_base("debian:bookworm-slim")
//!         .apt_install(["curl"])
//!         .run("echo ready");
//!     let request = ResourceRequest::new(2, CloudProvider::Aws, Duration::from_secs(60));
//!
//!     let result = launcher.invoke(&spec, &request, "true").await?;
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```

pub mod error;
mod functions;
mod images;
mod jobs;
mod launcher;
pub mod mounts;

// Re-export commonly used types
pub use error::{ClientError, LaunchError, Result};
pub use launcher::Launcher;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the execution platform API
///
/// One method per endpoint, organized into the three platform operations:
/// - Image builds (create, poll)
/// - Function bindings (bind a command to an image with constraints)
/// - Invocations (trigger, poll for the result)
#[derive(Debug, Clone)]
pub struct PlatformClient {
    /// Base URL of the platform API (e.g., "http://localhost:8080")
    base_url: String,
    /// Bearer token sent with every request, when set
    api_key: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl PlatformClient {
    /// Create a new platform client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the platform API
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            client: Client::new(),
        }
    }

    /// Create a new platform client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            client,
        }
    }

    /// Attach an API key sent as a bearer token on every request
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request / Response Handling
    // =============================================================================

    /// Apply bearer auth to a request when an API key is configured
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
