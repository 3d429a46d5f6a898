//! In-memory TTL caches.
//!
//! One [`TtlCache`] per data kind, bundled in [`Caches`] and shared
//! process-wide behind an `Arc`. Expiry is lazy: a read past the TTL counts
//! as a miss and evicts the entry. There is no size bound and no background
//! sweep.
//!
//! Values are cloned on the way in and on the way out, so a caller mutating
//! what it got back can never change what the cache holds. Two tasks racing
//! to fill the same key both fetch and the last write wins; entries are
//! immutable so either value is fine.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use crate::genius::domain::{Artist, Song};
use crate::producers::domain::Producer;

/// Default lifetime of every cache entry (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

struct Entry<T> {
    value: T,
    created_at: Instant,
}

/// Keyed store with per-entry expiry.
pub struct TtlCache<T> {
    /// Used only in log lines
    name: &'static str,
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(name: &'static str, ttl: Duration) -> Self {
        Self {
            name,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get a copy of the value for `key`, evicting it if it has expired.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock();
        let entry = entries.get(key)?;

        if entry.created_at.elapsed() > self.ttl {
            entries.remove(key);
            tracing::info!(cache = self.name, key, "Cache expired");
            return None;
        }

        tracing::info!(cache = self.name, key, "Cache hit");
        Some(entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: &str, value: T) {
        tracing::info!(cache = self.name, key, "Cache set");
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    /// Drop every entry.
    pub fn clear(&self) {
        tracing::info!(cache = self.name, "Clearing cache");
        self.entries.lock().clear();
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// The four process-wide caches
pub struct Caches {
    /// Lower-cased search query → distinct artists
    pub artist_search: TtlCache<Vec<Artist>>,
    /// Artist id → paginated song list
    pub artist_songs: TtlCache<Vec<Song>>,
    /// Song id → song with full credits
    pub song_details: TtlCache<Song>,
    /// Producer id → profiled producer record
    pub producer_profiles: TtlCache<Producer>,
}

impl Caches {
    pub fn new(ttl: Duration) -> Self {
        Self {
            artist_search: TtlCache::new("artistSearch", ttl),
            artist_songs: TtlCache::new("artistSongs", ttl),
            song_details: TtlCache::new("songDetails", ttl),
            producer_profiles: TtlCache::new("producerDetails", ttl),
        }
    }

    /// Clear all four caches.
    pub fn clear_all(&self) {
        self.artist_search.clear();
        self.artist_songs.clear();
        self.song_details.clear();
        self.producer_profiles.clear();
    }
}

impl Default for Caches {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
