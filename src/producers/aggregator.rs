//! Producer aggregation - turns a song list into deduplicated producer records.
//!
//! For every song the producer credits are resolved:
//! 1. Inline producer credits, if the song has any
//! 2. Otherwise the song's detail page: its producer credits plus every
//!    credit group whose label looks like a producer role
//! 3. Otherwise nothing (common, not an error)
//!
//! Each credit is merged into a per-run map keyed by producer id. A credit
//! reserves its producer's slot and its song's position before anything is
//! awaited, so the output never depends on which request finishes first:
//! producers are ordered by their first credit and songs by their place in
//! the input. Profile lookups for one producer are serialized; a credit that
//! arrives while a lookup is in flight waits for it rather than fetching the
//! same profile again.
//!
//! Songs are processed in fixed-size batches. Songs inside a batch resolve
//! concurrently on the current task; batches run one after another with a
//! pause in between, which bounds outstanding requests to the batch size.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use parking_lot::Mutex;

use super::domain::{AggregationFailure, AggregationReport, NotableSong, Producer};
use crate::genius::GeniusClient;
use crate::genius::domain::{Artist, Song};

/// Batching and pacing for the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Songs resolved concurrently per batch
    pub batch_size: usize,
    /// Pause between batches
    pub batch_delay: Duration,
    /// Pause after every profile fetch attempt
    pub profile_delay: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_millis(500),
            profile_delay: Duration::from_millis(300),
        }
    }
}

/// Where a credit appeared: song index in the input, then credit index
type Position = (usize, usize);

/// Held while looking up one producer's profile
type ProfileGate = Arc<tokio::sync::Mutex<()>>;

/// One producer's state during a run
struct Slot {
    first_seen: Position,
    /// Identity and profile fields. `notable_songs` holds only the seed song
    /// of an adopted profile; credited songs are kept in `songs`.
    record: Producer,
    songs: Vec<(Position, NotableSong)>,
    gate: ProfileGate,
}

impl Slot {
    fn into_producer(self) -> Producer {
        let Slot {
            mut record,
            mut songs,
            ..
        } = self;
        songs.sort_by_key(|(position, _)| *position);
        for (_, song) in songs {
            record.add_song(song);
        }
        record
    }
}

/// Mutable state of one aggregation run. Never shared between runs.
#[derive(Default)]
struct RunState {
    slots: HashMap<u64, Slot>,
    failures: Vec<AggregationFailure>,
}

#[derive(Default)]
struct Run {
    state: Mutex<RunState>,
}

impl Run {
    /// Record a credit. Returns the producer's profile gate, or `None` when
    /// the profile is already resolved.
    fn claim(&self, credit: &Artist, song: &Song, position: Position) -> Option<ProfileGate> {
        let mut state = self.state.lock();
        let slot = state.slots.entry(credit.id).or_insert_with(|| {
            let mut record = Producer::degraded(credit, song);
            record.notable_songs.clear();
            Slot {
                first_seen: position,
                record,
                songs: Vec::new(),
                gate: ProfileGate::default(),
            }
        });
        slot.first_seen = slot.first_seen.min(position);
        slot.songs.push((position, NotableSong::from(song)));

        (!slot.record.is_profiled()).then(|| slot.gate.clone())
    }

    fn is_profiled(&self, producer_id: u64) -> bool {
        self.state
            .lock()
            .slots
            .get(&producer_id)
            .is_some_and(|slot| slot.record.is_profiled())
    }

    /// Replace the inline-only record with a profiled one.
    fn adopt(&self, record: Producer) {
        if let Some(slot) = self.state.lock().slots.get_mut(&record.id) {
            slot.record = record;
        }
    }

    fn record_failure(&self, failure: AggregationFailure) {
        self.state.lock().failures.push(failure);
    }

    fn into_report(self) -> AggregationReport {
        let RunState { slots, failures } = self.state.into_inner();

        let mut slots: Vec<Slot> = slots.into_values().collect();
        slots.sort_by_key(|slot| slot.first_seen);

        AggregationReport {
            producers: slots.into_iter().map(Slot::into_producer).collect(),
            failures,
        }
    }
}

/// Builds producer records from songs
pub struct ProducerAggregator {
    client: GeniusClient,
    config: AggregatorConfig,
}

impl ProducerAggregator {
    pub fn new(client: GeniusClient, config: AggregatorConfig) -> Self {
        Self { client, config }
    }

    /// Aggregate producers from `songs`, in order of first credit.
    ///
    /// Partial failures are logged and dropped; see
    /// [`aggregate_with_report`](Self::aggregate_with_report) to inspect them.
    pub async fn aggregate(&self, songs: &[Song]) -> Vec<Producer> {
        self.aggregate_with_report(songs).await.producers
    }

    /// Aggregate producers from `songs`, also returning every song or
    /// producer that could not be fully resolved.
    pub async fn aggregate_with_report(&self, songs: &[Song]) -> AggregationReport {
        let timers = self.client.timers();
        let timer = timers.start("getProducersFromSongs");

        let run = Run::default();
        let batch_size = self.config.batch_size.max(1);
        let batch_count = songs.len().div_ceil(batch_size);

        for (index, batch) in songs.chunks(batch_size).enumerate() {
            tracing::debug!(batch = index + 1, of = batch_count, "Processing song batch");
            let offset = index * batch_size;
            join_all(
                batch
                    .iter()
                    .enumerate()
                    .map(|(i, song)| self.resolve_song(offset + i, song, &run)),
            )
            .await;

            if index + 1 < batch_count {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        let report = run.into_report();
        tracing::info!(
            songs = songs.len(),
            producers = report.producers.len(),
            failures = report.failures.len(),
            "Aggregated producers"
        );
        timers.stop(timer);
        report
    }

    /// Resolve one song's producer credits and merge them.
    async fn resolve_song(&self, index: usize, song: &Song, run: &Run) {
        if !song.producer_credits.is_empty() {
            self.merge_credits(index, &song.producer_credits, song, run)
                .await;
            return;
        }

        match self.client.song_details(song.id).await {
            Ok(details) => {
                let credits = details.all_producer_credits();
                if !credits.is_empty() {
                    self.merge_credits(index, &credits, &details, run).await;
                }
            }
            Err(e) => {
                tracing::error!(song_id = song.id, error = %e, "Error getting details for song");
                run.record_failure(AggregationFailure::song(song.id, &e));
            }
        }
    }

    async fn merge_credits(&self, index: usize, credits: &[Artist], song: &Song, run: &Run) {
        for (credit_index, credit) in credits.iter().enumerate() {
            self.merge_credit(credit, song, (index, credit_index), run)
                .await;
        }
    }

    async fn merge_credit(&self, credit: &Artist, song: &Song, position: Position, run: &Run) {
        let Some(gate) = run.claim(credit, song, position) else {
            return;
        };
        let lookup = gate.lock().await;
        // Resolved by another credit while this one waited
        if run.is_profiled(credit.id) {
            return;
        }

        let key = credit.id.to_string();
        let profiles = &self.client.caches().producer_profiles;
        if let Some(cached) = profiles.get(&key) {
            run.adopt(cached);
            return;
        }

        match self.client.artist_details(credit.id).await {
            Ok(profile) => {
                let producer = Producer::from_profile(credit, &profile, song);
                profiles.set(&key, producer.clone());
                run.adopt(producer);
            }
            Err(e) => {
                tracing::warn!(
                    producer_id = credit.id,
                    error = %e,
                    "Error getting details for producer, using credit info only"
                );
                run.record_failure(AggregationFailure::producer(credit.id, &e));
            }
        }
        drop(lookup);

        tokio::time::sleep(self.config.profile_delay).await;
    }
}
