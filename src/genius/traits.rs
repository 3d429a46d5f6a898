//! Trait definition for the upstream transport.
//!
//! The transport performs exactly one HTTP exchange and classifies it. Retry,
//! caching and pagination all sit above this seam, so tests substitute a
//! scripted transport and exercise the real logic without a network.

use async_trait::async_trait;
use serde_json::Value;

use super::domain::GeniusError;

/// Classified result of a single upstream request
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 2xx with a JSON body
    Success(Value),
    /// HTTP 429
    RateLimited,
    /// HTTP 5xx
    ServerError { status: u16, message: String },
    /// Any other 4xx; the request itself is wrong and retrying won't help
    ClientError { status: u16, message: String },
    /// Connection failure, timeout or unreadable body
    NetworkError(String),
}

impl Outcome {
    /// Convert to a result, turning every non-success into its error kind.
    pub fn into_result(self) -> Result<Value, GeniusError> {
        match self {
            Outcome::Success(payload) => Ok(payload),
            Outcome::RateLimited => Err(GeniusError::RateLimited),
            Outcome::ServerError { status, message } => {
                Err(GeniusError::UpstreamServer { status, message })
            }
            Outcome::ClientError { status, message } => {
                Err(GeniusError::UpstreamClient { status, message })
            }
            Outcome::NetworkError(message) => Err(GeniusError::Network(message)),
        }
    }
}

/// One request against the upstream API.
///
/// `attempt` is zero-based and only used for logging; implementations keep
/// no state between calls.
#[async_trait]
pub trait GeniusTransport: Send + Sync {
    async fn request(&self, endpoint: &str, attempt: u32) -> Outcome;
}
