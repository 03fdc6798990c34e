//! Answer Gateway port
//!
//! Defines the interface for reaching the answer-generation API.

use async_trait::async_trait;
use openanswer_domain::{Question, RawResponse};
use thiserror::Error;

/// Errors meaning the request could not be completed at all.
///
/// An HTTP error status is not a gateway error: it comes back as a
/// [`RawResponse`] and is classified by the caller.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// Gateway to the answer API
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerGateway: Send + Sync {
    /// Send one question and return the response as read from the wire.
    ///
    /// Implementations issue exactly one request per call and read the body once.
    async fn fetch_answer(&self, question: &Question) -> Result<RawResponse, GatewayError>;

    /// The endpoint questions are sent to
    fn endpoint(&self) -> &str;
}
