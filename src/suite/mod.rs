//! Sequential case runner: one live probe of the position endpoint, then the
//! offline fixture set, aggregated into a tri-state report.

pub mod config;

use anyhow::Result;
use log::{info, warn};

use crate::api::{CareersApi, FetchPosition, JobPosition};
use crate::checks::fixtures::{fixture_cases, verify_fixture};
use crate::checks::{Outcome, evaluate};
pub use config::SuiteConfig;

/// Outcome of a single named case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    pub name: String,
    pub outcome: Outcome,
}

/// All case results of one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub cases: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed(_)))
    }

    pub fn inconclusive(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Inconclusive(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.cases
            .iter()
            .filter(|case| predicate(&case.outcome))
            .count()
    }

    /// Prints one line per case and a summary to stdout.
    pub fn print(&self) {
        for case in &self.cases {
            match &case.outcome {
                Outcome::Passed => println!("PASS  {}", case.name),
                Outcome::Failed(failures) => {
                    println!("FAIL  {}", case.name);
                    for failure in failures {
                        println!("      {}", failure);
                    }
                }
                Outcome::Inconclusive(reason) => {
                    println!("SKIP  {} ({})", case.name, reason)
                }
            }
        }
        println!(
            "{} passed, {} failed, {} inconclusive",
            self.passed(),
            self.failed(),
            self.inconclusive()
        );
    }
}

/// Probes the live endpoint once (with retries) and validates the response.
///
/// A transport-level error means the endpoint could not be reached at all;
/// that is an infrastructure condition, so the case is inconclusive rather
/// than failed.
pub async fn run_live_case<A: FetchPosition>(api: &A) -> CaseResult {
    let name = format!("live: GET {}", api.position_url());

    match api.fetch_position().await {
        Ok(response) => {
            let outcome = evaluate(&response);
            if outcome == Outcome::Passed {
                if let Ok(position) = serde_json::from_str::<JobPosition>(&response.body) {
                    info!(
                        "validated position {}",
                        position.name.as_deref().unwrap_or("<unnamed>")
                    );
                }
            }
            CaseResult { name, outcome }
        }
        Err(e) => {
            warn!("{}: endpoint unreachable: {:#}", name, e);
            CaseResult {
                name,
                outcome: Outcome::Inconclusive(format!("endpoint unreachable: {:#}", e)),
            }
        }
    }
}

/// Runs every offline fixture case.
pub fn run_fixture_cases() -> Vec<CaseResult> {
    fixture_cases()
        .iter()
        .map(|case| CaseResult {
            name: case.name.to_string(),
            outcome: verify_fixture(case),
        })
        .collect()
}

/// Runs the whole suite: the live case first, then the fixtures. Cases run
/// sequentially and share nothing but the transport handle.
#[tracing::instrument(skip(config))]
pub async fn run(config: &SuiteConfig) -> Result<SuiteReport> {
    let client = config.build_client()?;
    let api = CareersApi::new(client, config.position_url(), config.retry.clone());

    let mut cases = vec![run_live_case(&api).await];
    cases.extend(run_fixture_cases());

    Ok(SuiteReport { cases })
}

/// Runs only the offline fixture cases, no network involved.
pub fn run_fixtures_only() -> SuiteReport {
    SuiteReport {
        cases: run_fixture_cases(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFetchPosition;
    use crate::http::ProbeResponse;
    use reqwest::StatusCode;

    fn mock_api(status: StatusCode, content_type: &str, body: &str) -> MockFetchPosition {
        let response = ProbeResponse {
            status,
            content_type: Some(content_type.to_string()),
            body: body.to_string(),
        };
        let mut api = MockFetchPosition::new();
        api.expect_fetch_position()
            .returning(move || Ok(response.clone()));
        api.expect_position_url()
            .return_const("http://careers.test/api/positions/1024".to_string());
        api
    }

    #[tokio::test]
    async fn test_live_case_passes_on_valid_position() {
        let api = mock_api(
            StatusCode::OK,
            "application/json",
            r#"{"description":"x","suitableForStudents":true}"#,
        );
        let result = run_live_case(&api).await;

        assert_eq!(result.outcome, Outcome::Passed);
        assert!(result.name.contains("positions/1024"));
    }

    #[tokio::test]
    async fn test_live_case_fails_on_contract_violation() {
        let api = mock_api(
            StatusCode::OK,
            "application/json",
            r#"{"description":"x","suitableForStudents":false}"#,
        );
        let result = run_live_case(&api).await;
        assert!(result.outcome.is_failed());
    }

    #[tokio::test]
    async fn test_live_case_inconclusive_on_non_200() {
        let api = mock_api(StatusCode::SERVICE_UNAVAILABLE, "text/plain", "upstream down");
        let result = run_live_case(&api).await;
        assert!(matches!(result.outcome, Outcome::Inconclusive(_)));
    }

    #[tokio::test]
    async fn test_live_case_inconclusive_on_transport_error() {
        let mut api = MockFetchPosition::new();
        api.expect_fetch_position()
            .returning(|| Err(anyhow::anyhow!("connection refused")));
        api.expect_position_url()
            .return_const("http://careers.test/api/positions/1024".to_string());

        let result = run_live_case(&api).await;
        match result.outcome {
            Outcome::Inconclusive(reason) => assert!(reason.contains("unreachable")),
            other => panic!("expected inconclusive, got {:?}", other),
        }
    }

    #[test]
    fn test_fixtures_only_report_is_clean() {
        let report = run_fixtures_only();
        assert!(!report.cases.is_empty());
        assert_eq!(report.passed(), report.cases.len());
        assert!(!report.has_failures());
        assert_eq!(report.inconclusive(), 0);
    }

    #[test]
    fn test_report_counts() {
        let report = SuiteReport {
            cases: vec![
                CaseResult {
                    name: "a".to_string(),
                    outcome: Outcome::Passed,
                },
                CaseResult {
                    name: "b".to_string(),
                    outcome: Outcome::Failed(vec![]),
                },
                CaseResult {
                    name: "c".to_string(),
                    outcome: Outcome::Inconclusive("down".to_string()),
                },
            ],
        };

        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.inconclusive(), 1);
        assert!(report.has_failures());
    }

    #[test_log::test(tokio::test)]
    async fn test_run_against_mock_server() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/positions/1024")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"description":"Build services","suitableForStudents":true}"#)
            .create_async()
            .await;

        let config = SuiteConfig::new(
            Some(server.url()),
            Some("/api/positions/1024".to_string()),
            None,
            3,
            10,
        );
        let report = run(&config).await.unwrap();

        mock.assert_async().await;
        assert!(!report.has_failures());
        assert_eq!(report.inconclusive(), 0);
    }
}
