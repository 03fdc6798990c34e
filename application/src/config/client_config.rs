//! Client configuration: the answer API endpoint and transport limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/answer";

/// Settings the request controller's gateway is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Full URL of the answer endpoint
    pub endpoint: String,
    /// Request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000/api/answer");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://example.com:8118/api/answer")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.endpoint, "http://example.com:8118/api/answer");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }
}
