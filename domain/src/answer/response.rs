//! Raw HTTP response value object

/// Everything the classifier needs from one HTTP response.
///
/// The body is read exactly once by the transport and handed over as bytes;
/// classification then parses it at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Standard reason phrase for the status, when the status has one
    pub reason: Option<String>,
    /// Value of the `Retry-After` response header
    pub retry_after: Option<String>,
    /// Response body
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            retry_after: None,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_retry_after(mut self, value: impl Into<String>) -> Self {
        self.retry_after = Some(value.into());
        self
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// `Retry-After` as whole seconds. HTTP-date values are not supported.
    pub fn retry_after_seconds(&self) -> Option<u64> {
        self.retry_after
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
    }
}
