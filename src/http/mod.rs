//! HTTP probe executor with bounded retries and a linear backoff schedule.

mod client;
mod retry;

pub use client::{ProbeRequest, ProbeResponse, execute_with_retry, probe_with_retry, send_probe};
pub use retry::{Disposition, MAX_ATTEMPTS, RETRY_DELAY_MS, RetryPolicy};
