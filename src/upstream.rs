//! HTTP client for the remote chat service.
//!
//! The widget performs a single one-shot exchange per send:
//! `POST {base_url}/api/chat` with a JSON body `{"user_input": "..."}`,
//! expecting `{"response": "..."}` back. There are no retries, no timeout
//! and no cancellation; callers log failures and move on.

use serde_json::json;
use thiserror::Error;
use url::Url;

/// Error talking to the remote chat service.
///
/// A single taxonomy: transport failures, non-success statuses and malformed
/// JSON all end up here and are treated the same by callers.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// HTTP request failed or the body was not valid JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service returned an error response.
    #[error("chat service error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body from the service.
        message: String,
    },
}

/// Result type alias for upstream operations.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Client for the remote chat service.
///
/// # Example
///
/// ```rust,no_run
/// use support_widget::upstream::ChatBackend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = ChatBackend::new("http://localhost:5000")?;
/// let reply = backend.ask("Hello").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChatBackend {
    base_url: String,
    http: reqwest::Client,
}

impl ChatBackend {
    /// Create a new client for the service at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        // Validate eagerly so a bad URL fails at startup, not mid-send.
        let parsed = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one user message and return the reply text, if any.
    ///
    /// Returns `Ok(None)` when the service answered successfully but the
    /// body carried no usable `response` field; the widget then simply shows
    /// no bot reply. Fields other than `response` are ignored.
    pub async fn ask(&self, user_input: &str) -> Result<Option<String>> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&json!({ "user_input": user_input }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("response")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_ask_returns_reply_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "user_input": "Hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "Hi!" })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let backend = ChatBackend::new(mock_server.uri()).unwrap();
        let reply = backend.ask("Hello").await.unwrap();
        assert_eq!(reply.as_deref(), Some("Hi!"));
    }

    #[tokio::test]
    async fn test_ask_without_response_field_yields_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&mock_server)
            .await;

        let backend = ChatBackend::new(mock_server.uri()).unwrap();
        assert_eq!(backend.ask("Hello").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_ask_ignores_extra_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Hi!",
                "model": "gpt-4-turbo",
                "latency_ms": 812,
            })))
            .mount(&mock_server)
            .await;

        let backend = ChatBackend::new(mock_server.uri()).unwrap();
        assert_eq!(backend.ask("Hello").await.unwrap().as_deref(), Some("Hi!"));
    }

    #[tokio::test]
    async fn test_ask_error_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({ "error": "Internal Server Error" })),
            )
            .mount(&mock_server)
            .await;

        let backend = ChatBackend::new(mock_server.uri()).unwrap();
        let err = backend.ask("Hello").await.unwrap_err();
        match err {
            UpstreamError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ask_malformed_json_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let backend = ChatBackend::new(mock_server.uri()).unwrap();
        assert!(backend.ask("Hello").await.is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(
            ChatBackend::new("not a url"),
            Err(UpstreamError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let backend = ChatBackend::new("http://localhost:5000/").unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }
}
