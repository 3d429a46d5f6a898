//! Genius API client
//!
//! Cache-first fetchers for the four upstream resources and the pagination
//! driver that assembles an artist's song list. Every request goes through
//! the retry policy; successful results are written to the matching cache.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::retry::RetryPolicy;
use super::traits::GeniusTransport;
use super::{adapter, dto};
use crate::cache::Caches;
use crate::genius::domain::{Artist, GeniusError, Song};
use crate::timer::Timers;

/// Songs-by-artist paging limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Songs requested per page
    pub page_size: usize,
    /// Hard cap on page requests per artist
    pub max_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_pages: 5,
        }
    }
}

/// Endpoint paths, relative to the API root
pub mod endpoints {
    pub fn search(query: &str) -> String {
        format!("/search?q={}", urlencoding::encode(query))
    }

    pub fn artist_songs(artist_id: u64, page: u32, per_page: usize) -> String {
        format!(
            "/artists/{}/songs?page={}&per_page={}&sort=popularity",
            artist_id, page, per_page
        )
    }

    pub fn song(song_id: u64) -> String {
        format!("/songs/{}", song_id)
    }

    pub fn artist(artist_id: u64) -> String {
        format!("/artists/{}", artist_id)
    }
}

/// Genius API client
#[derive(Clone)]
pub struct GeniusClient {
    transport: Arc<dyn GeniusTransport>,
    retry: RetryPolicy,
    pagination: Pagination,
    caches: Arc<Caches>,
    timers: Arc<Timers>,
}

impl GeniusClient {
    pub fn new(
        transport: Arc<dyn GeniusTransport>,
        retry: RetryPolicy,
        pagination: Pagination,
        caches: Arc<Caches>,
        timers: Arc<Timers>,
    ) -> Self {
        Self {
            transport,
            retry,
            pagination,
            caches,
            timers,
        }
    }

    pub fn caches(&self) -> &Arc<Caches> {
        &self.caches
    }

    pub fn timers(&self) -> &Arc<Timers> {
        &self.timers
    }

    /// Search for artists by name.
    ///
    /// Returns the distinct primary artists of matching songs, best match
    /// first. Cached under the lower-cased query.
    pub async fn search_artist(&self, name: &str) -> Result<Vec<Artist>, GeniusError> {
        let key = name.to_lowercase();
        if let Some(artists) = self.caches.artist_search.get(&key) {
            return Ok(artists);
        }

        self.timed(format!("searchArtist:{}", name), async {
            let response: dto::SearchResponse =
                self.get_response(&endpoints::search(name)).await?;
            let artists = adapter::artists_from_search(response);
            self.caches.artist_search.set(&key, artists.clone());
            Ok::<_, GeniusError>(artists)
        })
        .await
        .inspect_err(|e| tracing::error!(query = name, error = %e, "Error searching for artist"))
    }

    /// Fetch one page of an artist's songs, most popular first.
    pub async fn artist_songs_page(
        &self,
        artist_id: u64,
        page: u32,
    ) -> Result<Vec<Song>, GeniusError> {
        let endpoint = endpoints::artist_songs(artist_id, page, self.pagination.page_size);
        let response: dto::ArtistSongsResponse = self
            .get_response(&endpoint)
            .await
            .inspect_err(|e| {
                tracing::error!(artist_id, page, error = %e, "Error getting songs for artist page")
            })?;
        Ok(response.songs.into_iter().map(adapter::to_song).collect())
    }

    /// Fetch an artist's songs across pages.
    ///
    /// Pages are requested one at a time until a short page arrives or
    /// `max_pages` have been fetched. Any page failure fails the whole call.
    pub async fn all_artist_songs(&self, artist_id: u64) -> Result<Vec<Song>, GeniusError> {
        let key = artist_id.to_string();
        if let Some(songs) = self.caches.artist_songs.get(&key) {
            return Ok(songs);
        }

        self.timed(format!("getAllArtistSongs:{}", artist_id), async {
            let Pagination { page_size, max_pages } = self.pagination;
            let mut songs = Vec::new();

            for page in 1..=max_pages {
                let batch = self.artist_songs_page(artist_id, page).await?;
                let short_page = batch.len() < page_size;
                songs.extend(batch);
                if short_page {
                    break;
                }
            }
            songs.truncate(page_size * max_pages as usize);

            self.caches.artist_songs.set(&key, songs.clone());
            Ok::<_, GeniusError>(songs)
        })
        .await
        .inspect_err(|e| {
            tracing::error!(artist_id, error = %e, "Error getting all songs for artist")
        })
    }

    /// Fetch a song with its full credits.
    pub async fn song_details(&self, song_id: u64) -> Result<Song, GeniusError> {
        let key = song_id.to_string();
        if let Some(song) = self.caches.song_details.get(&key) {
            return Ok(song);
        }

        self.timed(format!("getSongDetails:{}", song_id), async {
            let response: dto::SongResponse = self.get_response(&endpoints::song(song_id)).await?;
            let song = adapter::to_song(response.song);
            self.caches.song_details.set(&key, song.clone());
            Ok::<_, GeniusError>(song)
        })
        .await
        .inspect_err(|e| tracing::error!(song_id, error = %e, "Error getting song details"))
    }

    /// Fetch an artist's full profile. Not cached here; callers cache what
    /// they derive from it.
    pub async fn artist_details(&self, artist_id: u64) -> Result<Artist, GeniusError> {
        let response: dto::ArtistResponse = self
            .get_response(&endpoints::artist(artist_id))
            .await
            .inspect_err(|e| {
                tracing::error!(artist_id, error = %e, "Error getting artist details")
            })?;
        Ok(adapter::to_artist(response.artist))
    }

    /// GET through the retry policy and unwrap the `response` envelope
    async fn get_response<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GeniusError> {
        let payload = self.retry.fetch(self.transport.as_ref(), endpoint).await?;
        serde_json::from_value::<dto::Envelope<T>>(payload)
            .map(|envelope| envelope.response)
            .map_err(|e| GeniusError::Parse(format!("{}: {}", endpoint, e)))
    }

    async fn timed<T>(&self, label: String, work: impl Future<Output = T>) -> T {
        let timer = self.timers.start(label);
        let output = work.await;
        self.timers.stop(timer);
        output
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::genius::traits::Outcome;
    use crate::genius::traits::mocks::ScriptedTransport;
    use crate::test_utils::{artist_json, profile_json, song_json, songs_page_json, wrap};

    fn client_with(transport: Arc<ScriptedTransport>) -> GeniusClient {
        GeniusClient::new(
            transport,
            RetryPolicy::default(),
            Pagination::default(),
            Arc::new(Caches::default()),
            Arc::new(Timers::default()),
        )
    }

    fn page(artist_id: u64, page: u32) -> String {
        endpoints::artist_songs(artist_id, page, 50)
    }

    /// Script an artist with `total` songs spread over 50-song pages.
    fn script_songs(transport: &ScriptedTransport, artist_id: u64, total: usize) {
        let mut remaining = total;
        let mut page_no = 1u32;
        loop {
            let count = remaining.min(50);
            let first_id = (page_no as u64 - 1) * 50 + 1;
            transport.push(
                page(artist_id, page_no),
                Outcome::Success(songs_page_json(first_id, count)),
            );
            remaining -= count;
            if count < 50 || page_no == 10 {
                break;
            }
            page_no += 1;
        }
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(endpoints::search("Metro Boomin"), "/search?q=Metro%20Boomin");
        assert_eq!(
            endpoints::artist_songs(9, 2, 50),
            "/artists/9/songs?page=2&per_page=50&sort=popularity"
        );
        assert_eq!(endpoints::song(1), "/songs/1");
        assert_eq!(endpoints::artist(5), "/artists/5");
    }

    #[tokio::test]
    async fn test_pagination_stops_on_short_page() {
        let transport = Arc::new(ScriptedTransport::new());
        script_songs(&transport, 9, 120);
        let client = client_with(transport.clone());

        let songs = client.all_artist_songs(9).await.unwrap();

        assert_eq!(songs.len(), 120);
        assert_eq!(transport.calls_with_prefix("/artists/9/songs"), 3);
        assert_eq!(songs[0].id, 1);
        assert_eq!(songs[119].id, 120);
    }

    #[tokio::test]
    async fn test_pagination_caps_at_five_pages() {
        let transport = Arc::new(ScriptedTransport::new());
        script_songs(&transport, 9, 400);
        let client = client_with(transport.clone());

        let songs = client.all_artist_songs(9).await.unwrap();

        assert_eq!(songs.len(), 250);
        assert_eq!(transport.calls_with_prefix("/artists/9/songs"), 5);
    }

    #[tokio::test]
    async fn test_exact_multiple_requests_one_empty_page() {
        let transport = Arc::new(ScriptedTransport::new());
        script_songs(&transport, 9, 100);
        let client = client_with(transport.clone());

        let songs = client.all_artist_songs(9).await.unwrap();

        assert_eq!(songs.len(), 100);
        assert_eq!(transport.calls_with_prefix("/artists/9/songs"), 3);
    }

    #[tokio::test]
    async fn test_song_list_is_cached() {
        let transport = Arc::new(ScriptedTransport::new());
        script_songs(&transport, 9, 30);
        let client = client_with(transport.clone());

        let first = client.all_artist_songs(9).await.unwrap();
        let second = client.all_artist_songs(9).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.total_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_page_failure_fails_pagination() {
        let transport = Arc::new(ScriptedTransport::new().on(
            page(9, 1),
            Outcome::ClientError {
                status: 404,
                message: "Not found".into(),
            },
        ));
        let client = client_with(transport.clone());

        let result = client.all_artist_songs(9).await;

        assert!(matches!(result, Err(GeniusError::UpstreamClient { .. })));
        assert!(client.caches().artist_songs.is_empty());
    }

    #[tokio::test]
    async fn test_search_artist_dedups_and_caches() {
        let payload = json!({
            "response": {
                "hits": [
                    {"type": "song", "result": {"primary_artist": artist_json(9, "X")}},
                    {"type": "song", "result": {"primary_artist": artist_json(9, "X")}},
                    {"type": "song", "result": {"primary_artist": artist_json(10, "Y")}}
                ]
            }
        });
        let transport = Arc::new(ScriptedTransport::new().ok(endpoints::search("X"), payload));
        let client = client_with(transport.clone());

        let artists = client.search_artist("X").await.unwrap();
        let ids: Vec<u64> = artists.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![9, 10]);

        // Cache key is case-insensitive
        assert!(client.caches().artist_search.get("x").is_some());
        assert_eq!(transport.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_song_details_cached_by_id() {
        let transport = Arc::new(ScriptedTransport::new().ok(
            endpoints::song(1),
            wrap("song", song_json(1, "Track A", 9, "X", &[(5, "P")])),
        ));
        let client = client_with(transport.clone());

        let song = client.song_details(1).await.unwrap();
        client.song_details(1).await.unwrap();

        assert_eq!(song.producer_credits[0].name, "P");
        assert_eq!(transport.total_calls(), 1);
    }

    #[tokio::test]
    async fn test_artist_details_not_cached() {
        let transport = Arc::new(
            ScriptedTransport::new().ok(endpoints::artist(5), wrap("artist", profile_json(5, "P"))),
        );
        let client = client_with(transport.clone());

        let artist = client.artist_details(5).await.unwrap();
        client.artist_details(5).await.unwrap();

        assert_eq!(artist.bio_text.as_deref(), Some("P is a producer."));
        assert_eq!(transport.total_calls(), 2);
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_parse_error() {
        let transport = Arc::new(
            ScriptedTransport::new().ok(endpoints::song(1), json!({"response": {"nope": 1}})),
        );
        let client = client_with(transport.clone());

        let result = client.song_details(1).await;

        assert!(matches!(result, Err(GeniusError::Parse(_))));
        assert_eq!(transport.total_calls(), 1);
    }

    proptest! {
        #[test]
        fn prop_pagination_returns_min_of_total_and_cap(total in 0usize..400) {
            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let transport = Arc::new(ScriptedTransport::new());
            script_songs(&transport, 9, total);
            let client = client_with(transport.clone());

            let songs = rt.block_on(client.all_artist_songs(9)).unwrap();

            prop_assert_eq!(songs.len(), total.min(250));
            prop_assert!(transport.calls_with_prefix("/artists/9/songs") <= 5);
        }
    }
}
