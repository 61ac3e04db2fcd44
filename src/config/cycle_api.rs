//! Cycle-listing API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::Environment;

/// Cycle-listing API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CycleApiConfig {
    /// Base URL of the assessment API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the API
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CycleApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API token is configured
    pub fn has_token(&self) -> bool {
        self.api_token.as_ref().is_some_and(|t| !t.is_empty())
    }

    /// Validate cycle API configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let is_https = self.base_url.starts_with("https://");
        if !is_https && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidCycleApiUrl);
        }
        if *environment == Environment::Production && !is_https {
            return Err(ValidationError::CycleApiMustBeHttps);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CycleApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    10
}
