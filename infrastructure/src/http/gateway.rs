//! reqwest-backed answer gateway

use async_trait::async_trait;
use openanswer_application::{AnswerGateway, ClientConfig, GatewayError};
use openanswer_domain::{Question, RawResponse};
use reqwest::header::{ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use serde::Serialize;
use tracing::{debug, trace};

/// JSON body posted to the answer endpoint
#[derive(Debug, Serialize)]
pub struct AnswerRequest<'a> {
    pub content: &'a str,
}

/// Gateway posting questions to the answer API over HTTP
pub struct HttpAnswerGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnswerGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("openanswer/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl AnswerGateway for HttpAnswerGateway {
    async fn fetch_answer(&self, question: &Question) -> Result<RawResponse, GatewayError> {
        let body = serde_json::to_vec(&AnswerRequest {
            content: question.content(),
        })
        .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        debug!("POST {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // The body stream is consumed exactly once here
        let bytes = response.bytes().await.map_err(transport_error)?;
        trace!(status = status.as_u16(), "Read {} response bytes", bytes.len());

        let mut raw = RawResponse::new(status.as_u16(), bytes.to_vec());
        if let Some(reason) = status.canonical_reason() {
            raw = raw.with_reason(reason);
        }
        if let Some(value) = retry_after {
            raw = raw.with_retry_after(value);
        }
        Ok(raw)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openanswer_domain::AnswerOutcome;
    use std::io::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve one canned response and hand back the raw request text.
    async fn start_one_shot_server(
        response: String,
    ) -> Option<(String, oneshot::Receiver<String>)> {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == ErrorKind::PermissionDenied => return None,
            Err(err) => panic!("failed to bind local test listener: {err}"),
        };
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            let _ = tx.send(request);
        });

        Some((format!("http://{addr}/api/answer"), rx))
    }

    /// Read headers plus a `Content-Length` body.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data).to_string();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&data).to_string()
    }

    fn http_response(status: &str, extra_headers: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n{extra_headers}Connection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn test_posts_question_as_json() {
        let body = r#"{"answer":"**hi**","search_terms":["a"],"relevant_urls":["http://x"]}"#;
        let Some((endpoint, request_rx)) =
            start_one_shot_server(http_response("200 OK", "", body)).await
        else {
            return;
        };

        let gateway = HttpAnswerGateway::new(&ClientConfig::new(endpoint)).unwrap();
        let question = Question::try_new("What is Rust?").unwrap();
        let raw = gateway.fetch_answer(&question).await.unwrap();

        assert_eq!(raw.status, 200);
        assert_eq!(raw.reason.as_deref(), Some("OK"));
        assert!(AnswerOutcome::classify(&raw).is_success());

        let request = request_rx.await.unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/answer HTTP/1.1"));
        assert!(lower.contains("content-type: application/json"));
        assert!(lower.contains("accept: application/json"));
        assert!(request.ends_with(r#"{"content":"What is Rust?"}"#));
    }

    #[tokio::test]
    async fn test_rate_limit_header_is_captured() {
        let Some((endpoint, _request_rx)) = start_one_shot_server(http_response(
            "429 Too Many Requests",
            "Retry-After: 3600\r\n",
            r#"{"detail":"Rate limit exceeded","limit_type":"IP"}"#,
        ))
        .await
        else {
            return;
        };

        let gateway = HttpAnswerGateway::new(&ClientConfig::new(endpoint)).unwrap();
        let raw = gateway
            .fetch_answer(&Question::try_new("q").unwrap())
            .await
            .unwrap();

        assert_eq!(raw.status, 429);
        assert_eq!(raw.retry_after_seconds(), Some(3600));
        let message = AnswerOutcome::classify(&raw).error_state().unwrap().message;
        assert!(message.contains("1h 0m 0s"));
        assert!(message.contains("IP"));
    }

    #[tokio::test]
    async fn test_error_status_without_json_uses_reason() {
        let Some((endpoint, _request_rx)) = start_one_shot_server(http_response(
            "500 Internal Server Error",
            "",
            "oops",
        ))
        .await
        else {
            return;
        };

        let gateway = HttpAnswerGateway::new(&ClientConfig::new(endpoint)).unwrap();
        let raw = gateway
            .fetch_answer(&Question::try_new("q").unwrap())
            .await
            .unwrap();

        let message = AnswerOutcome::classify(&raw).error_state().unwrap().message;
        assert_eq!(message, "Internal Server Error");
    }

    #[tokio::test]
    async fn test_connection_refused_is_gateway_error() {
        // Bind then drop to get a port nobody listens on
        let addr = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener.local_addr().unwrap(),
            Err(_) => return,
        };

        let gateway =
            HttpAnswerGateway::new(&ClientConfig::new(format!("http://{addr}/api/answer"))).unwrap();
        let result = gateway.fetch_answer(&Question::try_new("q").unwrap()).await;
        assert!(result.is_err());
    }
}
