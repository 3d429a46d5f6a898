//! Producer search service - orchestrates the full lookup
//!
//! 1. Search the upstream for the artist (first hit wins)
//! 2. Fetch the artist's songs (paginated, capped)
//! 3. Aggregate producers from those songs
//! 4. Order producers by how many of the artist's songs they worked on

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use super::aggregator::{AggregatorConfig, ProducerAggregator};
use super::domain::{AggregationFailure, AggregationReport, Producer};
use crate::cache::Caches;
use crate::config::Config;
use crate::error::{Error, Result, ResultExt};
use crate::genius::{GeniusClient, GeniusTransport, HttpTransport, Pagination, RetryPolicy, Song};
use crate::timer::Timers;

/// The artist a search resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistSummary {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Timing and volume of a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Performance {
    pub total_time_ms: f64,
    pub song_count: usize,
    pub producer_count: usize,
}

/// Result of a producer search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub artist: ArtistSummary,
    /// Most notable songs first
    pub producers: Vec<Producer>,
    pub performance: Performance,
    /// Songs or producers that could not be fully resolved
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AggregationFailure>,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

/// Service wiring the client and aggregator together
pub struct ProducerSearch {
    client: GeniusClient,
    aggregator: ProducerAggregator,
}

impl ProducerSearch {
    pub fn new(client: GeniusClient, aggregator_config: AggregatorConfig) -> Self {
        Self {
            aggregator: ProducerAggregator::new(client.clone(), aggregator_config),
            client,
        }
    }

    /// Build the service against the live API from configuration.
    ///
    /// Fails if no access token is configured.
    pub fn from_config(config: &Config, caches: Arc<Caches>) -> Result<Self> {
        let token = config
            .credentials
            .genius_access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingCredentials)?;

        let timers = Arc::new(Timers::new(config.diagnostics.debug_timers));
        let transport: Arc<dyn GeniusTransport> = Arc::new(HttpTransport::new(
            config.api.base_url.clone(),
            token,
            Duration::from_secs(config.api.timeout_secs),
            timers.clone(),
        ));

        let client = GeniusClient::new(
            transport,
            config.retry_policy(),
            config.pagination(),
            caches,
            timers,
        );
        Ok(Self::new(client, config.aggregator_config()))
    }

    pub fn client(&self) -> &GeniusClient {
        &self.client
    }

    /// All songs for an artist id.
    pub async fn songs(&self, artist_id: u64) -> Result<Vec<Song>> {
        Ok(self.client.all_artist_songs(artist_id).await?)
    }

    /// Producers for an artist id, ordered by notable song count.
    pub async fn producers_for_artist(&self, artist_id: u64) -> Result<AggregationReport> {
        let songs = self
            .songs(artist_id)
            .await
            .with_context(format!("Failed to fetch songs for artist {}", artist_id))?;
        let mut report = self.aggregator.aggregate_with_report(&songs).await;
        rank_by_song_count(&mut report.producers);
        Ok(report)
    }

    /// Resolve `query` to an artist and find their producers.
    pub async fn find_producers(&self, query: &str) -> Result<SearchOutcome> {
        let timers = self.client.timers().clone();
        let timer = timers.start("search");

        let result = self.find_producers_inner(query).await;
        let elapsed = timers.stop(timer).unwrap_or_default();

        result.map(|(artist, songs, report)| SearchOutcome {
            performance: Performance {
                total_time_ms: elapsed.as_secs_f64() * 1000.0,
                song_count: songs,
                producer_count: report.producers.len(),
            },
            artist,
            producers: report.producers,
            failures: report.failures,
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn find_producers_inner(
        &self,
        query: &str,
    ) -> Result<(ArtistSummary, usize, AggregationReport)> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        tracing::info!(query, "Searching for artist");
        let artist = self
            .client
            .search_artist(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::NoArtistFound(query.to_string()))?;
        tracing::info!(artist = %artist.name, artist_id = artist.id, "Found artist");

        let songs = self.songs(artist.id).await?;
        tracing::info!(songs = songs.len(), artist = %artist.name, "Fetched songs");

        let mut report = self.aggregator.aggregate_with_report(&songs).await;
        rank_by_song_count(&mut report.producers);
        tracing::info!(producers = report.producers.len(), "Found producers");

        let summary = ArtistSummary {
            id: artist.id,
            name: artist.name,
            image_url: artist.image_url,
        };
        Ok((summary, songs.len(), report))
    }
}

/// Most notable songs first; ties keep first-encounter order.
fn rank_by_song_count(producers: &mut [Producer]) {
    producers.sort_by(|a, b| b.notable_songs.len().cmp(&a.notable_songs.len()));
}
