//! Genius HTTP transport
//!
//! Issues a single authenticated request and classifies the response.
//! See: https://docs.genius.com
//!
//! This layer never retries; see `retry.rs`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::dto;
use super::traits::{GeniusTransport, Outcome};
use crate::timer::Timers;

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://api.genius.com";

/// User agent string
const USER_AGENT: &str = concat!("ProducerFinder/", env!("CARGO_PKG_VERSION"));

/// Bearer-authenticated HTTP transport
pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
    access_token: String,
    timers: Arc<Timers>,
}

impl HttpTransport {
    /// Create a new transport.
    ///
    /// `timeout` bounds each request end to end, so a stuck upstream call
    /// surfaces as a retryable network error instead of blocking forever.
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
        timers: Arc<Timers>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            timers,
        }
    }

    async fn send(&self, endpoint: &str) -> Outcome {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = match self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::NetworkError(e.to_string()),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => classify(status.as_u16(), &body),
            Err(e) => Outcome::NetworkError(format!("Failed to read body: {}", e)),
        }
    }
}

#[async_trait]
impl GeniusTransport for HttpTransport {
    async fn request(&self, endpoint: &str, attempt: u32) -> Outcome {
        let timer = self.timers.start(timer_label(endpoint));

        tracing::info!(
            endpoint,
            attempt = attempt + 1,
            "Making Genius API request"
        );
        let outcome = self.send(endpoint).await;

        self.timers.stop(timer);
        outcome
    }
}

/// Classify a response by status code and body.
///
/// 429 is rate limiting, 5xx is a transient server failure, any other
/// non-2xx is a fatal client error. A 2xx body that isn't JSON counts as a
/// network error since the transfer itself went wrong.
pub fn classify(status: u16, body: &str) -> Outcome {
    if (200..300).contains(&status) {
        return match serde_json::from_str(body) {
            Ok(payload) => Outcome::Success(payload),
            Err(e) => Outcome::NetworkError(format!("Invalid JSON body: {}", e)),
        };
    }

    if status == 429 {
        return Outcome::RateLimited;
    }

    let message = error_message(body);
    if status >= 500 {
        Outcome::ServerError { status, message }
    } else {
        Outcome::ClientError { status, message }
    }
}

/// Pull the error message out of an error body
fn error_message(body: &str) -> String {
    serde_json::from_str::<dto::ApiError>(body)
        .ok()
        .and_then(|e| e.message().map(str::to_string))
        .unwrap_or_else(|| "Unknown API Error".to_string())
}

/// Timer label for an endpoint: the path without its query string
fn timer_label(endpoint: &str) -> String {
    let path = endpoint.split('?').next().unwrap_or(endpoint);
    format!("API:{}", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        let outcome = classify(200, r#"{"response": {"song": {"id": 1}}}"#);
        let Outcome::Success(payload) = outcome else {
            panic!("expected success");
        };
        assert_eq!(payload["response"]["song"]["id"], 1);
    }

    #[test]
    fn test_classify_invalid_json_is_network_error() {
        let outcome = classify(200, "<html>gateway</html>");
        assert!(matches!(outcome, Outcome::NetworkError(_)));
    }

    #[test]
    fn test_classify_rate_limit() {
        assert_eq!(classify(429, ""), Outcome::RateLimited);
    }

    #[test]
    fn test_classify_server_error() {
        let outcome = classify(
            503,
            r#"{"meta": {"status": 503, "message": "Service Unavailable"}}"#,
        );
        assert_eq!(
            outcome,
            Outcome::ServerError {
                status: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_classify_client_error_messages() {
        assert_eq!(
            classify(401, r#"{"error": "invalid_token"}"#),
            Outcome::ClientError {
                status: 401,
                message: "invalid_token".to_string()
            }
        );
        assert_eq!(
            classify(404, "not json"),
            Outcome::ClientError {
                status: 404,
                message: "Unknown API Error".to_string()
            }
        );
    }

    #[test]
    fn test_timer_label_strips_query() {
        assert_eq!(
            timer_label("/artists/9/songs?page=2&per_page=50"),
            "API:/artists/9/songs"
        );
        assert_eq!(timer_label("/songs/1"), "API:/songs/1");
    }

    #[test]
    fn test_transport_trims_base_url() {
        let transport = HttpTransport::new(
            "http://localhost:8080/",
            "token",
            Duration::from_secs(5),
            Arc::new(Timers::default()),
        );
        assert_eq!(transport.base_url, "http://localhost:8080");
    }
}
