use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::http::{ProbeRequest, ProbeResponse, RetryPolicy, probe_with_retry};

/// Seam between the suite runner and the live careers API, so runner logic
/// can be exercised against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchPosition: Send + Sync {
    /// Fetches the position resource, retrying transient failures.
    async fn fetch_position(&self) -> Result<ProbeResponse>;

    /// The full URL this client probes.
    fn position_url(&self) -> &str;
}

/// Live client for the career-listing API. Borrows the suite-wide transport
/// handle and owns the request descriptor it probes with.
pub struct CareersApi {
    client: Client,
    request: ProbeRequest,
    policy: RetryPolicy,
}

impl CareersApi {
    #[tracing::instrument(skip(client, policy))]
    pub fn new(client: Client, position_url: String, policy: RetryPolicy) -> Self {
        Self {
            client,
            request: ProbeRequest::get(position_url),
            policy,
        }
    }
}

#[async_trait]
impl FetchPosition for CareersApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_position(&self) -> Result<ProbeResponse> {
        probe_with_retry(&self.client, &self.request, &self.policy).await
    }

    fn position_url(&self) -> &str {
        self.request.url()
    }
}
