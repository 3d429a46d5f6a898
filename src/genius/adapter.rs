//! Adapter layer: Convert Genius DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! If Genius changes their response format, only this file and dto.rs need
//! to change.

use std::collections::HashSet;

use super::dto;
use crate::genius::domain::{Artist, CreditGroup, Song};

/// Convert an upstream artist
pub fn to_artist(artist: dto::Artist) -> Artist {
    Artist {
        id: artist.id,
        name: artist.name,
        image_url: artist.image_url,
        instagram_name: non_empty(artist.instagram_name),
        twitter_name: non_empty(artist.twitter_name),
        url: artist.url,
        bio_text: artist.description.and_then(|d| non_empty(d.plain)),
    }
}

/// Convert an upstream song, flattening absent credit lists to empty ones
pub fn to_song(song: dto::Song) -> Song {
    let producer_credits = song
        .producer_artists
        .unwrap_or_default()
        .into_iter()
        .map(to_artist)
        .collect();

    let additional_credit_groups = song
        .custom_performances
        .unwrap_or_default()
        .into_iter()
        .map(|p| CreditGroup {
            label: p.label,
            artists: p.artists.into_iter().map(to_artist).collect(),
        })
        .collect();

    Song {
        id: song.id,
        title: song.title,
        primary_artist: to_artist(song.primary_artist),
        producer_credits,
        additional_credit_groups,
        release_date: song.release_date,
    }
}

/// Extract the distinct primary artists of song hits, in hit order
pub fn artists_from_search(response: dto::SearchResponse) -> Vec<Artist> {
    let mut seen = HashSet::new();
    response
        .hits
        .into_iter()
        .filter(|hit| hit.hit_type == "song")
        .filter_map(|hit| hit.result.primary_artist)
        .filter(|artist| seen.insert(artist.id))
        .map(to_artist)
        .collect()
}

/// Keep an image URL only if it is an absolute http(s) URL
pub fn sanitize_image_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url.to_string())
    } else {
        None
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
