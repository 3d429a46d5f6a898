//! Genius API Data Transfer Objects
//!
//! These types match what the Genius API returns.
//! DO NOT use these types outside the genius module - convert to domain types.
//!
//! API Reference: https://docs.genius.com
//!
//! Every successful response is wrapped in a `response` envelope. Fields the
//! upstream sometimes sends as `null` are modelled as `Option`.

use serde::{Deserialize, Serialize};

/// Top-level envelope: `{"meta": {...}, "response": {...}}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub response: T,
}

/// `GET /search?q=`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

/// One search hit. Only `type == "song"` hits carry a song result.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub hit_type: String,
    pub result: SearchResult,
}

/// The part of a song search result we read
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResult {
    pub primary_artist: Option<Artist>,
}

/// `GET /artists/{id}/songs`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistSongsResponse {
    #[serde(default)]
    pub songs: Vec<Song>,
}

/// `GET /songs/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SongResponse {
    pub song: Song,
}

/// `GET /artists/{id}`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistResponse {
    pub artist: Artist,
}

/// Artist as embedded in songs, search hits and the artist endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub id: u64,
    pub name: String,
    pub image_url: Option<String>,
    pub instagram_name: Option<String>,
    pub twitter_name: Option<String>,
    pub url: Option<String>,
    /// Only present on the artist endpoint
    pub description: Option<Description>,
}

/// Rich-text field; we only ask for the plain rendering
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Description {
    pub plain: Option<String>,
}

/// Song as returned by the songs list and the song endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub primary_artist: Artist,
    pub producer_artists: Option<Vec<Artist>>,
    pub custom_performances: Option<Vec<CustomPerformance>>,
    pub release_date: Option<String>,
}

/// Free-form credit group ("Co-Producer", "Recorded At", ...)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomPerformance {
    pub label: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

/// Error body. The upstream uses either an OAuth-style `error` field or a
/// `meta.message`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiError {
    pub error: Option<String>,
    pub meta: Option<Meta>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Meta {
    pub message: Option<String>,
}

impl ApiError {
    /// Best human-readable message in the body.
    pub fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or_else(|| self.meta.as_ref().and_then(|m| m.message.as_deref()))
    }
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
