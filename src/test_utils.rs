//! Test utilities and fixtures for producer-finder tests.
//!
//! Domain builders for artists and songs, plus JSON builders that produce
//! upstream-shaped payloads for the scripted transport.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{mock_artist, song_json, wrap};
//!
//! let transport = ScriptedTransport::new()
//!     .ok("/songs/1", wrap("song", song_json(1, "Track A", 9, "X", &[(5, "P")])));
//! ```

use serde_json::{Value, json};

use crate::genius::domain::{Artist, CreditGroup, Song};

/// Artist with only id and name set.
pub fn mock_artist(id: u64, name: &str) -> Artist {
    Artist {
        id,
        name: name.to_string(),
        ..Default::default()
    }
}

/// Song without any credits.
pub fn mock_song(id: u64, title: &str, primary_artist: Artist) -> Song {
    Song {
        id,
        title: title.to_string(),
        primary_artist,
        ..Default::default()
    }
}

/// Song carrying inline producer credits.
pub fn mock_song_with_producers(
    id: u64,
    title: &str,
    primary_artist: Artist,
    producers: Vec<Artist>,
) -> Song {
    Song {
        producer_credits: producers,
        ..mock_song(id, title, primary_artist)
    }
}

/// Song whose producers are only filed under a labelled credit group.
pub fn mock_song_with_group(
    id: u64,
    title: &str,
    primary_artist: Artist,
    label: &str,
    artists: Vec<Artist>,
) -> Song {
    Song {
        additional_credit_groups: vec![CreditGroup {
            label: label.to_string(),
            artists,
        }],
        ..mock_song(id, title, primary_artist)
    }
}

/// Wrap a payload in the upstream envelope: `{"response": {key: payload}}`.
pub fn wrap(key: &str, payload: Value) -> Value {
    json!({ "response": { key: payload } })
}

/// Upstream-shaped artist JSON.
pub fn artist_json(id: u64, name: &str) -> Value {
    json!({ "id": id, "name": name })
}

/// Upstream-shaped artist profile with socials, page URL and bio.
pub fn profile_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "image_url": format!("https://images.genius.com/{}.png", id),
        "instagram_name": format!("{}_ig", name.to_lowercase()),
        "twitter_name": format!("{}_tw", name.to_lowercase()),
        "url": format!("https://genius.com/artists/{}", name),
        "description": { "plain": format!("{} is a producer.", name) }
    })
}

/// Upstream-shaped song JSON with the given producer credits.
pub fn song_json(
    id: u64,
    title: &str,
    artist_id: u64,
    artist: &str,
    producers: &[(u64, &str)],
) -> Value {
    let producers: Vec<Value> = producers
        .iter()
        .map(|(id, name)| artist_json(*id, name))
        .collect();
    json!({
        "id": id,
        "title": title,
        "primary_artist": artist_json(artist_id, artist),
        "producer_artists": producers,
        "custom_performances": [],
        "release_date": null
    })
}

/// One page of the artist songs endpoint holding `count` credit-less songs
/// with ids starting at `first_id`.
pub fn songs_page_json(first_id: u64, count: usize) -> Value {
    let songs: Vec<Value> = (0..count as u64)
        .map(|i| {
            json!({
                "id": first_id + i,
                "title": format!("Song {}", first_id + i),
                "primary_artist": artist_json(9, "X")
            })
        })
        .collect();
    json!({ "response": { "songs": songs, "next_page": null } })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genius::dto;

    #[test]
    fn test_song_json_matches_dto() {
        let value = wrap("song", song_json(1, "Track A", 9, "X", &[(5, "P")]));
        let parsed: dto::Envelope<dto::SongResponse> = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.response.song.producer_artists.unwrap()[0].id, 5);
    }

    #[test]
    fn test_songs_page_json_matches_dto() {
        let parsed: dto::Envelope<dto::ArtistSongsResponse> =
            serde_json::from_value(songs_page_json(100, 3)).unwrap();
        let ids: Vec<u64> = parsed.response.songs.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![100, 101, 102]);
    }

    #[test]
    fn test_profile_json_matches_dto() {
        let parsed: dto::Artist = serde_json::from_value(profile_json(5, "P")).unwrap();
        assert_eq!(parsed.url.as_deref(), Some("https://genius.com/artists/P"));
    }

    #[test]
    fn test_mock_song_with_group() {
        let song = mock_song_with_group(
            1,
            "T",
            mock_artist(9, "X"),
            "Co-Producer",
            vec![mock_artist(6, "Q")],
        );
        assert!(song.producer_credits.is_empty());
        assert_eq!(song.all_producer_credits()[0].id, 6);
    }
}
