//! Lookup commands against the Genius API.

use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::cache::Caches;
use crate::config::Config;
use crate::producers::{AggregationFailure, Producer, ProducerSearch};

fn build_service(config: &Config) -> anyhow::Result<ProducerSearch> {
    let caches = Arc::new(Caches::new(config.cache_ttl()));
    Ok(ProducerSearch::from_config(config, caches)?)
}

/// Search for an artist and list their producers
pub fn cmd_search(rt: &Runtime, config: &Config, query: &str, json: bool) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let outcome = rt.block_on(service.find_producers(query))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!(
        "Artist: {} (ID: {})",
        outcome.artist.name, outcome.artist.id
    );
    println!(
        "Songs scanned: {}  Producers: {}  Time: {:.0}ms",
        outcome.performance.song_count,
        outcome.performance.producer_count,
        outcome.performance.total_time_ms
    );
    println!();
    print_producers(&outcome.producers);
    print_failures(&outcome.failures);
    Ok(())
}

/// List an artist's songs
pub fn cmd_songs(rt: &Runtime, config: &Config, artist_id: u64) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let songs = rt.block_on(service.songs(artist_id))?;

    if songs.is_empty() {
        println!("No songs found for artist {}", artist_id);
        return Ok(());
    }

    println!("Found {} songs:\n", songs.len());
    for (i, song) in songs.iter().enumerate() {
        let date = song.release_date.as_deref().unwrap_or("unknown date");
        println!(
            "{:>4}. {} - {} [{}] (ID: {})",
            i + 1,
            song.primary_artist.name,
            song.title,
            date,
            song.id
        );
    }
    Ok(())
}

/// Aggregate producers for an artist ID
pub fn cmd_producers(
    rt: &Runtime,
    config: &Config,
    artist_id: u64,
    json: bool,
) -> anyhow::Result<()> {
    let service = build_service(config)?;
    let report = rt.block_on(service.producers_for_artist(artist_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_producers(&report.producers);
    print_failures(&report.failures);
    Ok(())
}

fn print_producers(producers: &[Producer]) {
    if producers.is_empty() {
        println!("No producers credited.");
        return;
    }

    for producer in producers {
        let mark = if producer.is_profiled() { "✓" } else { "✗" };
        println!(
            "{} {} (ID: {}) - {} song(s)",
            mark,
            producer.name,
            producer.id,
            producer.notable_songs.len()
        );
        if let Some(url) = &producer.profile_url {
            println!("    {}", url);
        }
        let socials: Vec<String> = [
            producer.instagram_name.as_ref().map(|n| format!("instagram: {}", n)),
            producer.twitter_name.as_ref().map(|n| format!("twitter: {}", n)),
        ]
        .into_iter()
        .flatten()
        .collect();
        if !socials.is_empty() {
            println!("    {}", socials.join("  "));
        }
        for song in producer.notable_songs.iter().take(5) {
            println!("    • {} - {}", song.artist, song.title);
        }
        if producer.notable_songs.len() > 5 {
            println!("    … and {} more", producer.notable_songs.len() - 5);
        }
    }
}

fn print_failures(failures: &[AggregationFailure]) {
    if failures.is_empty() {
        return;
    }

    eprintln!("\n{} lookup(s) failed:", failures.len());
    for failure in failures {
        match failure {
            AggregationFailure::SongDetails { song_id, error } => {
                eprintln!("  ✗ song {}: {}", song_id, error)
            }
            AggregationFailure::ProducerProfile { producer_id, error } => {
                eprintln!("  ✗ producer {}: {}", producer_id, error)
            }
        }
    }
}
