//! Configuration module
//!
//! Handles CLI configuration including platform URL and credentials.

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the execution platform
    pub platform_url: String,

    /// Optional API key for the platform
    pub api_key: Option<String>,
}
