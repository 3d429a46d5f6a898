//! Producer records built by the aggregator.
//!
//! A `Producer` is mutated only while the aggregator owns it (songs get
//! appended). Once returned, it is a plain value.

use serde::{Deserialize, Serialize};

use crate::genius::adapter::sanitize_image_url;
use crate::genius::domain::{Artist, GeniusError, Song};

/// A song credited to a producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotableSong {
    pub title: String,
    /// Primary artist name
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl From<&Song> for NotableSong {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.primary_artist.name.clone(),
            release_date: song.release_date.clone(),
        }
    }
}

/// A producer and the songs they were credited on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    /// Same as the underlying artist id
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_name: Option<String>,
    /// Present only when the full profile was fetched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub notable_songs: Vec<NotableSong>,
}

impl Producer {
    /// Build a full record from a credit and the producer's fetched profile.
    ///
    /// Profile fields win over the credit's inline ones; the image URL is
    /// sanitized from either source.
    pub fn from_profile(credit: &Artist, profile: &Artist, song: &Song) -> Self {
        Self {
            id: credit.id,
            name: credit.name.clone(),
            image_url: sanitize_image_url(profile.image_url.as_deref())
                .or_else(|| sanitize_image_url(credit.image_url.as_deref())),
            instagram_name: profile
                .instagram_name
                .clone()
                .or_else(|| credit.instagram_name.clone()),
            twitter_name: profile
                .twitter_name
                .clone()
                .or_else(|| credit.twitter_name.clone()),
            profile_url: profile.url.clone(),
            bio: profile.bio_text.clone(),
            notable_songs: vec![NotableSong::from(song)],
        }
    }

    /// Build a degraded record from the credit's inline fields only.
    pub fn degraded(credit: &Artist, song: &Song) -> Self {
        Self {
            id: credit.id,
            name: credit.name.clone(),
            image_url: sanitize_image_url(credit.image_url.as_deref()),
            instagram_name: None,
            twitter_name: None,
            profile_url: None,
            bio: None,
            notable_songs: vec![NotableSong::from(song)],
        }
    }

    /// Whether the full profile is known; profiled records need no lookup.
    pub fn is_profiled(&self) -> bool {
        self.profile_url.is_some()
    }

    /// Append a song unless one with the same title is already listed.
    ///
    /// Returns whether the song was added.
    pub fn add_song(&mut self, song: NotableSong) -> bool {
        if self.notable_songs.iter().any(|s| s.title == song.title) {
            return false;
        }
        self.notable_songs.push(song);
        true
    }
}

/// What went wrong for one song or one producer during aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationFailure {
    /// Song details could not be fetched; the song contributed nothing
    SongDetails { song_id: u64, error: String },
    /// Profile could not be fetched; a degraded record was used
    ProducerProfile { producer_id: u64, error: String },
}

impl AggregationFailure {
    pub fn song(song_id: u64, error: &GeniusError) -> Self {
        Self::SongDetails {
            song_id,
            error: error.to_string(),
        }
    }

    pub fn producer(producer_id: u64, error: &GeniusError) -> Self {
        Self::ProducerProfile {
            producer_id,
            error: error.to_string(),
        }
    }
}

/// Aggregation output: the producers plus every partial failure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationReport {
    /// In order of first encounter
    pub producers: Vec<Producer>,
    pub failures: Vec<AggregationFailure>,
}

impl AggregationReport {
    /// True when every song and producer resolved cleanly
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
