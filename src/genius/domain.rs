//! Internal domain models for the upstream music-metadata API.
//!
//! These types are OUR types - they don't change when the Genius API changes.
//! All API responses get converted into these types via the adapter.

/// An artist as seen by the upstream API. Identity is `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artist {
    /// Upstream-assigned artist ID
    pub id: u64,
    /// Display name
    pub name: String,
    /// Profile image
    pub image_url: Option<String>,
    /// Instagram handle (without @)
    pub instagram_name: Option<String>,
    /// Twitter handle (without @)
    pub twitter_name: Option<String>,
    /// Artist page on the upstream site
    pub url: Option<String>,
    /// Plain-text biography
    pub bio_text: Option<String>,
}

/// A labelled group of credited artists ("Co-Producer", "Mixing Engineer", ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreditGroup {
    pub label: String,
    pub artists: Vec<Artist>,
}

/// A song and whatever credits the upstream included with it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Song {
    /// Upstream-assigned song ID
    pub id: u64,
    pub title: String,
    pub primary_artist: Artist,
    /// Credited producers; empty when the upstream omitted them
    pub producer_credits: Vec<Artist>,
    /// Other credit groups; producers are sometimes filed here instead
    pub additional_credit_groups: Vec<CreditGroup>,
    /// Upstream-controlled format, not guaranteed parseable
    pub release_date: Option<String>,
}

/// Substring that marks a credit group label as a producer role.
///
/// The upstream files producer credits inconsistently: sometimes under the
/// dedicated producer field, sometimes as a custom group labelled "Producer",
/// "Co-Producer", "Additional Production" and so on.
pub const PRODUCER_LABEL_MARKER: &str = "produc";

impl CreditGroup {
    /// Whether this group's label names a producer role (case-insensitive).
    pub fn is_producer_group(&self) -> bool {
        self.label.to_lowercase().contains(PRODUCER_LABEL_MARKER)
    }
}

impl Song {
    /// All producer credits: the dedicated field followed by every
    /// producer-labelled credit group, in upstream order.
    pub fn all_producer_credits(&self) -> Vec<Artist> {
        let mut credits = self.producer_credits.clone();
        for group in &self.additional_credit_groups {
            if group.is_producer_group() {
                credits.extend(group.artists.iter().cloned());
            }
        }
        credits
    }
}

/// Errors that can occur talking to the upstream API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeniusError {
    #[error("Rate limited by upstream API")]
    RateLimited,

    #[error("Upstream server error (HTTP {status}): {message}")]
    UpstreamServer { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Genius API Error: {message} (HTTP {status})")]
    UpstreamClient { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl GeniusError {
    /// Whether the retry policy may try the request again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeniusError::RateLimited | GeniusError::UpstreamServer { .. } | GeniusError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artist(id: u64, name: &str) -> Artist {
        Artist {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_producer_group_labels() {
        for label in ["Producer", "Co-Producer", "Additional Production", "PRODUCED BY"] {
            let group = CreditGroup {
                label: label.to_string(),
                artists: vec![],
            };
            assert!(group.is_producer_group(), "{label} should match");
        }

        let mixing = CreditGroup {
            label: "Mixing Engineer".to_string(),
            artists: vec![],
        };
        assert!(!mixing.is_producer_group());
    }

    #[test]
    fn test_all_producer_credits_combines_sources() {
        let song = Song {
            id: 1,
            title: "Track".to_string(),
            primary_artist: artist(9, "X"),
            producer_credits: vec![artist(5, "P")],
            additional_credit_groups: vec![
                CreditGroup {
                    label: "Co-Producer".to_string(),
                    artists: vec![artist(6, "Q")],
                },
                CreditGroup {
                    label: "Mastering Engineer".to_string(),
                    artists: vec![artist(7, "R")],
                },
            ],
            release_date: None,
        };

        let ids: Vec<u64> = song.all_producer_credits().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_retryable_classes() {
        assert!(GeniusError::RateLimited.is_retryable());
        assert!(GeniusError::Network("reset".into()).is_retryable());
        assert!(
            GeniusError::UpstreamServer {
                status: 503,
                message: "down".into()
            }
            .is_retryable()
        );
        assert!(
            !GeniusError::UpstreamClient {
                status: 404,
                message: "not found".into()
            }
            .is_retryable()
        );
        assert!(!GeniusError::Parse("bad".into()).is_retryable());
    }
}
