//! Probe execution: a single GET snapshot plus the bounded-retry loop around it.

use anyhow::{Context, Result};
use log::{debug, warn};
use reqwest::{Client, StatusCode, header};

use super::retry::{Disposition, RetryPolicy};

/// Immutable description of the GET probe sent to the position endpoint.
/// Constructed once per case and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    url: String,
}

impl ProbeRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Read-only snapshot of one transport attempt.
#[derive(Debug, Clone)]
pub struct ProbeResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

/// Sends the probe once and snapshots status, content type and body.
///
/// HTTP-level failures (4xx/5xx) come back as data for the retry loop to
/// classify; only transport failures (DNS, connection refused) are errors.
#[tracing::instrument(skip(client, request))]
pub async fn send_probe(client: &Client, request: &ProbeRequest) -> Result<ProbeResponse> {
    debug!("GET {}...", request.url());

    let response = client
        .get(request.url())
        .header(header::ACCEPT, "application/json")
        .send()
        .await
        .context("Failed to send request to position endpoint")?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .text()
        .await
        .context("Failed to read response body")?;

    Ok(ProbeResponse {
        status,
        content_type,
        body,
    })
}

/// Executes an attempt operation with bounded retries and linear backoff,
/// returning the response of the final attempt made.
///
/// 200 stops immediately. A retryable status (403, 429, 503) is repeated
/// after `policy.delay_after(attempt)` until attempts run out, at which point
/// the last response is returned as-is. Any other status is terminal: the
/// loop stops without consuming remaining attempts and without a delay.
pub async fn execute_with_retry<F, Fut>(
    operation_name: &str,
    policy: &RetryPolicy,
    operation: F,
) -> Result<ProbeResponse>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<ProbeResponse>>,
{
    let mut attempt = 1;

    loop {
        let response = operation().await?;

        match policy.disposition(response.status) {
            Disposition::Success => {
                debug!(
                    "{}: attempt {}/{} returned {}, done",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    response.status
                );
                return Ok(response);
            }
            Disposition::Terminal => {
                warn!(
                    "{}: attempt {}/{} returned {}, not retryable, giving up",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    response.status
                );
                return Ok(response);
            }
            Disposition::Retry if attempt >= policy.max_attempts() => {
                warn!(
                    "{}: attempt {}/{} returned {}, attempts exhausted",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    response.status
                );
                return Ok(response);
            }
            Disposition::Retry => {
                let delay = policy.delay_after(attempt);
                warn!(
                    "{}: attempt {}/{} returned {}, retrying in {}ms...",
                    operation_name,
                    attempt,
                    policy.max_attempts(),
                    response.status,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

/// Probes the position endpoint with the retry loop around [`send_probe`].
#[tracing::instrument(skip(client, request, policy))]
pub async fn probe_with_retry(
    client: &Client,
    request: &ProbeRequest,
    policy: &RetryPolicy,
) -> Result<ProbeResponse> {
    execute_with_retry("Probing position endpoint", policy, || {
        let client = client.clone();
        let request = request.clone();
        async move { send_probe(&client, &request).await }
    })
    .await
}
