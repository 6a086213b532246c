use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use crate::http::RetryPolicy;

/// Default coordinates of the position resource under validation.
pub const DEFAULT_BASE_URL: &str = "https://careers.example.com/api";
pub const DEFAULT_RESOURCE: &str = "/positions/1024";

/// User agent sent with every probe.
pub const DEFAULT_USER_AGENT: &str = concat!("jobprobe/", env!("CARGO_PKG_VERSION"));

/// Everything the suite needs to run: endpoint coordinates, the user agent
/// for the shared transport handle, and the retry knobs.
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: String,
    pub resource: String,
    pub user_agent: String,
    pub retry: RetryPolicy,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl SuiteConfig {
    pub fn new(
        base_url: Option<String>,
        resource: Option<String>,
        user_agent: Option<String>,
        max_attempts: usize,
        retry_delay_ms: u64,
    ) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            resource: resource.unwrap_or_else(|| DEFAULT_RESOURCE.to_string()),
            user_agent: user_agent.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            retry: RetryPolicy::new(max_attempts, Duration::from_millis(retry_delay_ms)),
        }
    }

    /// Full URL of the position resource.
    pub fn position_url(&self) -> String {
        format!("{}{}", self.base_url, self.resource)
    }

    /// Builds the transport handle shared by the whole suite run.
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .build()
            .context("Failed to build HTTP client")
    }
}
