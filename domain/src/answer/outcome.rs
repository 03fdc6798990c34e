//! Answer outcome: the tagged classification of one API response.
//!
//! A [`RawResponse`] is decoded once into an [`AnswerOutcome`]; callers match
//! on the variant instead of re-inspecting optional JSON fields.
//!
//! | Condition | Variant |
//! |-----------|---------|
//! | request never completed | [`AnswerOutcome::TransportFailure`] |
//! | status 429 | [`AnswerOutcome::RateLimited`] |
//! | other non-2xx | [`AnswerOutcome::ApiError`] |
//! | 2xx, non-empty `answer` | [`AnswerOutcome::Success`] |
//! | 2xx, `status_code` but no answer | [`AnswerOutcome::ApiReportedFailure`] |
//! | 2xx, neither | [`AnswerOutcome::MalformedResponse`] |

use super::duration::format_duration;
use super::response::RawResponse;
use super::result::AnswerResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message shown when the request could not be completed.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred while fetching the answer. Please try again.";

/// Message shown when a 2xx body has neither `answer` nor `status_code`.
pub const MALFORMED_RESPONSE_MESSAGE: &str = "Unexpected response format. Please try again.";

/// Limit category used when a 429 body does not name one.
pub const UNKNOWN_LIMIT_TYPE: &str = "unknown";

/// A failed submission as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub message: String,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of one question submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The API answered
    Success(AnswerResult),
    /// HTTP 429
    RateLimited {
        limit_type: String,
        retry_after_seconds: Option<u64>,
    },
    /// Any other non-2xx status
    ApiError {
        status: u16,
        message: String,
    },
    /// 2xx body carrying a `status_code` instead of an answer
    ApiReportedFailure { status_code: String },
    /// 2xx body with neither `answer` nor `status_code`
    MalformedResponse,
    /// The request could not be completed
    TransportFailure { reason: String },
}

impl AnswerOutcome {
    /// Classify a response. The body is parsed as JSON at most once.
    pub fn classify(response: &RawResponse) -> Self {
        let body: Option<Value> = serde_json::from_slice(&response.body).ok();
        let field = |name: &str| body.as_ref().and_then(|b| b.get(name)).filter(|v| !v.is_null());

        if response.is_rate_limited() {
            let limit_type = field("limit_type")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_LIMIT_TYPE)
                .to_string();
            let retry_after_seconds = field("retry_after_seconds")
                .and_then(seconds_from_json)
                .or_else(|| response.retry_after_seconds());
            return Self::RateLimited {
                limit_type,
                retry_after_seconds,
            };
        }

        if !response.is_success() {
            let message = field("detail")
                .map(json_to_text)
                .filter(|s| !s.is_empty())
                .or_else(|| response.reason.clone())
                .unwrap_or_else(|| format!("HTTP error {}", response.status));
            return Self::ApiError {
                status: response.status,
                message,
            };
        }

        if let Some(answer) = field("answer").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            return Self::Success(
                AnswerResult::new(answer)
                    .with_search_terms(string_list(field("search_terms")))
                    .with_relevant_urls(string_list(field("relevant_urls"))),
            );
        }

        match field("status_code") {
            Some(code) => Self::ApiReportedFailure {
                status_code: json_to_text(code),
            },
            None => Self::MalformedResponse,
        }
    }

    /// Build the outcome for a request that never produced a response.
    pub fn transport_failure(reason: impl Into<String>) -> Self {
        Self::TransportFailure {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The answer, when this outcome is a success
    pub fn answer(&self) -> Option<&AnswerResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The user-facing error, when this outcome is a failure
    pub fn error_state(&self) -> Option<ErrorState> {
        let message = match self {
            Self::Success(_) => return None,
            Self::RateLimited {
                limit_type,
                retry_after_seconds: Some(seconds),
            } => format!(
                "Rate limit exceeded ({} limit). Please try again in {}.",
                limit_type,
                format_duration(*seconds)
            ),
            Self::RateLimited {
                limit_type,
                retry_after_seconds: None,
            } => format!(
                "Rate limit exceeded ({} limit). Please try again later.",
                limit_type
            ),
            Self::ApiError { message, .. } => message.clone(),
            Self::ApiReportedFailure { status_code } => status_code.clone(),
            Self::MalformedResponse => MALFORMED_RESPONSE_MESSAGE.to_string(),
            Self::TransportFailure { .. } => TRANSPORT_FAILURE_MESSAGE.to_string(),
        };
        Some(ErrorState::new(message))
    }

    /// Split into the two mutually exclusive display states.
    pub fn into_display(self) -> Result<AnswerResult, ErrorState> {
        match self {
            Self::Success(result) => Ok(result),
            other => Err(other
                .error_state()
                .unwrap_or_else(|| ErrorState::new(MALFORMED_RESPONSE_MESSAGE))),
        }
    }

    /// Short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::RateLimited { .. } => "rate_limited",
            Self::ApiError { .. } => "api_error",
            Self::ApiReportedFailure { .. } => "api_reported_failure",
            Self::MalformedResponse => "malformed_response",
            Self::TransportFailure { .. } => "transport_failure",
        }
    }
}

/// Accepts integers, non-negative floats (truncated) and numeric strings.
fn seconds_from_json(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, body: &str) -> AnswerOutcome {
        AnswerOutcome::classify(&RawResponse::new(status, body))
    }

    #[test]
    fn test_success_with_metadata() {
        let outcome = classify(
            200,
            r#"{"answer":"**hi**","search_terms":["a"],"relevant_urls":["http://x"]}"#,
        );
        let result = outcome.answer().unwrap();
        assert_eq!(result.answer, "**hi**");
        assert_eq!(result.search_terms, vec!["a"]);
        assert_eq!(result.relevant_urls, vec!["http://x"]);
        assert!(outcome.error_state().is_none());
    }

    #[test]
    fn test_success_defaults_missing_lists() {
        let outcome = classify(200, r#"{"answer":"ok"}"#);
        let result = outcome.answer().unwrap();
        assert!(result.search_terms.is_empty());
        assert!(result.relevant_urls.is_empty());
    }

    #[test]
    fn test_rate_limited_from_body() {
        let outcome = classify(429, r#"{"retry_after_seconds":90061,"limit_type":"daily"}"#);
        assert_eq!(
            outcome,
            AnswerOutcome::RateLimited {
                limit_type: "daily".into(),
                retry_after_seconds: Some(90061),
            }
        );
        let message = outcome.error_state().unwrap().message;
        assert!(message.contains("1d 1h 1m 1s"));
        assert!(message.contains("daily"));
    }

    #[test]
    fn test_rate_limited_falls_back_to_header() {
        let response = RawResponse::new(429, r#"{"detail":"Rate limit exceeded"}"#)
            .with_retry_after("61");
        let outcome = AnswerOutcome::classify(&response);
        assert_eq!(
            outcome,
            AnswerOutcome::RateLimited {
                limit_type: UNKNOWN_LIMIT_TYPE.into(),
                retry_after_seconds: Some(61),
            }
        );
        assert!(outcome.error_state().unwrap().message.contains("1m 1s"));
    }

    #[test]
    fn test_rate_limited_body_wins_over_header() {
        let response = RawResponse::new(429, r#"{"retry_after_seconds":5,"limit_type":"IP"}"#)
            .with_retry_after("999");
        let message = AnswerOutcome::classify(&response).error_state().unwrap().message;
        assert!(message.contains("5s"));
        assert!(message.contains("IP"));
    }

    #[test]
    fn test_rate_limited_without_interval() {
        let message = classify(429, "not json").error_state().unwrap().message;
        assert!(message.contains("unknown"));
        assert!(message.contains("later"));
    }

    #[test]
    fn test_api_error_uses_detail() {
        let outcome = classify(403, r#"{"detail":"forbidden"}"#);
        assert!(outcome.error_state().unwrap().message.contains("forbidden"));
    }

    #[test]
    fn test_api_error_falls_back_to_reason() {
        let response = RawResponse::new(500, "<html>oops</html>").with_reason("Internal Server Error");
        let outcome = AnswerOutcome::classify(&response);
        assert_eq!(
            outcome.error_state().unwrap().message,
            "Internal Server Error"
        );
    }

    #[test]
    fn test_api_error_without_reason() {
        let outcome = classify(599, "{}");
        assert_eq!(outcome.error_state().unwrap().message, "HTTP error 599");
    }

    #[test]
    fn test_reported_failure() {
        let outcome = classify(200, r#"{"status_code":"NO_RESULTS"}"#);
        assert_eq!(
            outcome,
            AnswerOutcome::ApiReportedFailure {
                status_code: "NO_RESULTS".into()
            }
        );
        assert_eq!(outcome.error_state().unwrap().message, "NO_RESULTS");

        let numeric = classify(200, r#"{"answer":"","status_code":503}"#);
        assert_eq!(numeric.error_state().unwrap().message, "503");
    }

    #[test]
    fn test_empty_body_is_malformed() {
        let outcome = classify(200, "{}");
        assert_eq!(outcome, AnswerOutcome::MalformedResponse);
        assert!(outcome.answer().is_none());
        assert!(outcome.error_state().is_some());
        assert_eq!(classify(200, "").kind(), "malformed_response");
    }

    #[test]
    fn test_transport_failure_message() {
        let outcome = AnswerOutcome::transport_failure("connection refused");
        assert_eq!(
            outcome.into_display().unwrap_err().message,
            TRANSPORT_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(AnswerOutcome::MalformedResponse).unwrap();
        assert_eq!(json["kind"], "malformed_response");

        let json = serde_json::to_value(AnswerOutcome::Success(AnswerResult::new("a"))).unwrap();
        assert_eq!(json["kind"], "success");
        assert_eq!(json["answer"], "a");
    }
}
