//! Response classification and contract assertions for the position resource.
//!
//! Outcomes are tri-state. An unreachable or blocked endpoint is never a hard
//! failure, only inconclusive; a contract violation on well-formed JSON always
//! is one.

pub mod fixtures;

use log::debug;
use reqwest::StatusCode;
use serde_json::Value;

use crate::http::ProbeResponse;

/// A single violated assertion on well-formed JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckFailure {
    pub check: &'static str,
    pub message: String,
}

impl std::fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.check, self.message)
    }
}

/// Result of validating one response, framework-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(Vec<CheckFailure>),
    /// Cannot determine pass/fail due to an external condition.
    Inconclusive(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// What the classifier decided to do with a response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Well-formed JSON, assertions may run.
    Json(Value),
    /// Assertions must be skipped; the reason is reported, not failed.
    Inconclusive(String),
}

/// Decides whether the contract assertions can run at all.
///
/// A non-200 status, an empty body, or content that is not JSON may be a WAF
/// block or an outage rather than a defect in the API, so none of them fail.
pub fn classify(response: &ProbeResponse) -> Classification {
    if response.status != StatusCode::OK {
        return Classification::Inconclusive(format!(
            "endpoint returned HTTP {} instead of 200",
            response.status
        ));
    }

    let body = response.body.trim();
    if body.is_empty() {
        return Classification::Inconclusive("response body is empty".to_string());
    }

    let declares_json = response
        .content_type
        .as_deref()
        .is_some_and(|value| value.to_ascii_lowercase().contains("json"));
    let looks_like_json = body.starts_with('{') || body.starts_with('[');
    if !declares_json && !looks_like_json {
        return Classification::Inconclusive(format!(
            "response is not JSON (content-type: {})",
            response.content_type.as_deref().unwrap_or("none")
        ));
    }

    match serde_json::from_str(body) {
        Ok(value) => Classification::Json(value),
        Err(e) => Classification::Inconclusive(format!("response body is not valid JSON: {}", e)),
    }
}

/// Runs every contract assertion against a parsed position document.
/// An empty result means the contract holds.
pub fn validate_position(position: &Value) -> Vec<CheckFailure> {
    let mut failures = Vec::new();

    match position.get("description") {
        Some(Value::String(text)) if !text.trim().is_empty() => {}
        Some(Value::String(_)) => failures.push(failure("description", "must not be empty")),
        Some(other) => failures.push(failure(
            "description",
            format!("expected a string, got {}", json_kind(other)),
        )),
        None => failures.push(failure("description", "field is missing")),
    }

    match position.get("suitableForStudents") {
        Some(Value::Bool(true)) => {}
        Some(Value::Bool(false)) => {
            failures.push(failure("suitableForStudents", "expected true, got false"))
        }
        Some(other) => failures.push(failure(
            "suitableForStudents",
            format!("expected a boolean, got {}", json_kind(other)),
        )),
        None => failures.push(failure("suitableForStudents", "field is missing")),
    }

    // Optional contract fields are only asserted when present
    if let Some(name) = position.get("name") {
        match name {
            Value::String(text) if !text.trim().is_empty() => {}
            Value::String(_) => failures.push(failure("name", "must not be empty")),
            other => failures.push(failure(
                "name",
                format!("expected a string, got {}", json_kind(other)),
            )),
        }
    }

    if let Some(id) = position.get("id") {
        match id {
            Value::Number(_) => {}
            Value::String(text) if !text.is_empty() => {}
            other => failures.push(failure(
                "id",
                format!("expected a number or string, got {}", json_kind(other)),
            )),
        }
    }

    if let Some(locations) = position.get("locations") {
        match locations {
            Value::Array(entries) if !entries.is_empty() => {}
            Value::Array(_) => failures.push(failure("locations", "must not be empty")),
            other => failures.push(failure(
                "locations",
                format!("expected an array, got {}", json_kind(other)),
            )),
        }
    }

    failures
}

/// Classifies a response and, when it is well-formed JSON, asserts the
/// position contract on it.
pub fn evaluate(response: &ProbeResponse) -> Outcome {
    match classify(response) {
        Classification::Inconclusive(reason) => {
            debug!("skipping assertions: {}", reason);
            Outcome::Inconclusive(reason)
        }
        Classification::Json(value) => {
            let failures = validate_position(&value);
            if failures.is_empty() {
                Outcome::Passed
            } else {
                Outcome::Failed(failures)
            }
        }
    }
}

fn failure(check: &'static str, message: impl Into<String>) -> CheckFailure {
    CheckFailure {
        check,
        message: message.into(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
