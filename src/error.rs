//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`GeniusError`], [`ConfigError`]), which convert into the top-level
//! [`Error`]. The CLI uses `anyhow` for convenient error propagation.
//!
//! Partial failures during aggregation are not errors; they are reported in
//! [`AggregationReport`](crate::producers::AggregationReport).

use crate::config::ConfigError;
use crate::genius::GeniusError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream API error after retries
    #[error(transparent)]
    Genius(#[from] GeniusError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Search query was blank
    #[error("Search query is required")]
    EmptyQuery,

    /// Search returned no artists
    #[error("No artists found for '{0}'")]
    NoArtistFound(String),

    /// No API token configured
    #[error("Genius access token not configured (set GENIUS_ACCESS_TOKEN or add it to the config file)")]
    MissingCredentials,

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoArtistFound("Nobody".to_string());
        assert!(err.to_string().contains("Nobody"));
    }

    #[test]
    fn test_genius_error_is_transparent() {
        let err = Error::from(GeniusError::RateLimited);
        assert_eq!(err.to_string(), GeniusError::RateLimited.to_string());
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::EmptyQuery.context("while searching");
        let msg = err.to_string();
        assert!(msg.contains("while searching"));
        assert!(msg.contains("Search query is required"));
    }

    #[test]
    fn test_result_ext() {
        let result: Result<()> = Err(Error::from(GeniusError::Network("reset".into())));
        let with_ctx = result.with_context("fetching songs for 9");
        assert!(with_ctx.unwrap_err().to_string().contains("fetching songs for 9"));
    }
}
