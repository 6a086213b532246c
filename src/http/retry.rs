//! Retry policy for the probe executor: status classification and backoff schedule.

use reqwest::StatusCode;
use std::time::Duration;

/// Maximum number of attempts for a probe request.
pub const MAX_ATTEMPTS: usize = 3;

/// Base unit of the backoff schedule in milliseconds.
pub const RETRY_DELAY_MS: u64 = 500;

/// What the executor should do after observing a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 200 OK: stop and return this response.
    Success,
    /// Transient status (403, 429, 503): wait and try again.
    Retry,
    /// Any other status: stop immediately, remaining attempts are not consumed.
    Terminal,
}

/// Bounded-retry policy with a linearly increasing backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, Duration::from_millis(RETRY_DELAY_MS))
    }
}

impl RetryPolicy {
    /// Creates a policy. `max_attempts` is clamped to at least one attempt.
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Classifies a response status for the retry loop.
    ///
    /// Only 403, 429 and 503 are worth repeating: they are the statuses a
    /// rate limiter, WAF or overloaded upstream emits for conditions that
    /// clear on their own. Everything else that is not 200 is terminal.
    pub fn disposition(&self, status: StatusCode) -> Disposition {
        if status == StatusCode::OK {
            Disposition::Success
        } else if is_retryable(status) {
            Disposition::Retry
        } else {
            Disposition::Terminal
        }
    }

    /// Delay before attempt `attempt + 1`, where `attempt` is the 1-indexed
    /// attempt that just completed.
    ///
    /// The schedule is linear (`base_delay * attempt`): 500ms, 1000ms, 1500ms...
    /// with the default base delay.
    pub fn delay_after(&self, attempt: usize) -> Duration {
        self.base_delay * attempt as u32
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_disposition() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.disposition(StatusCode::OK), Disposition::Success);
    }

    #[test]
    fn test_retryable_dispositions() {
        let policy = RetryPolicy::default();
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert_eq!(policy.disposition(status), Disposition::Retry, "{}", status);
        }
    }

    #[test]
    fn test_terminal_dispositions() {
        let policy = RetryPolicy::default();
        for status in [
            StatusCode::NOT_FOUND,
            StatusCode::BAD_REQUEST,
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::MOVED_PERMANENTLY,
        ] {
            assert_eq!(
                policy.disposition(status),
                Disposition::Terminal,
                "{}",
                status
            );
        }
    }

    #[test]
    fn test_default_backoff_schedule_is_linear() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_after(3), Duration::from_millis(1500));
    }

    #[test]
    fn test_custom_base_delay_scales_schedule() {
        let policy = RetryPolicy::new(5, Duration::from_millis(20));
        assert_eq!(policy.delay_after(1), Duration::from_millis(20));
        assert_eq!(policy.delay_after(4), Duration::from_millis(80));
    }

    #[test]
    fn test_max_attempts_clamped_to_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(500));
        assert_eq!(policy.max_attempts(), 1);
    }

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.delay_after(1), Duration::from_millis(RETRY_DELAY_MS));
    }
}
