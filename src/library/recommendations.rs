use serde::Serialize;

use crate::{
    fetch,
    spotify::{SpotifyApi, UpstreamError},
    types::TrackRecord,
};

const SEED_SONGS: usize = 50;
const MAX_SEED_ARTISTS: usize = 2;
const MAX_SEED_TRACKS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub id: Option<String>,
    pub uri: Option<String>,
    pub preview_url: Option<String>,
}

/// Up to two primary artist ids and three track ids, in record order.
pub fn recommendation_seeds(records: &[TrackRecord]) -> (Vec<String>, Vec<String>) {
    let mut artists: Vec<String> = Vec::new();
    let mut tracks: Vec<String> = Vec::new();

    for track in records.iter().filter_map(TrackRecord::track) {
        if artists.len() < MAX_SEED_ARTISTS {
            if let Some(id) = track.primary_artist().and_then(|a| a.id.clone()) {
                if !artists.contains(&id) {
                    artists.push(id);
                }
            }
        }
        if tracks.len() < MAX_SEED_TRACKS {
            if let Some(id) = track.id.clone() {
                tracks.push(id);
            }
        }
        if artists.len() >= MAX_SEED_ARTISTS && tracks.len() >= MAX_SEED_TRACKS {
            break;
        }
    }

    (artists, tracks)
}

/// Recommendations seeded from the most recently liked songs.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `limit` - Number of recommendations to ask for
///
/// # Returns
///
/// An empty list without asking Spotify when there are no liked songs to
/// seed from, otherwise the recommended tracks or the upstream error.
pub async fn get_smart_recommendations(
    api: &dyn SpotifyApi,
    limit: u32,
) -> Result<Vec<Recommendation>, UpstreamError> {
    let songs = fetch::get_liked_songs(api, Some(SEED_SONGS)).await;
    let (seed_artists, seed_tracks) = recommendation_seeds(&songs);
    if seed_artists.is_empty() && seed_tracks.is_empty() {
        return Ok(Vec::new());
    }

    let tracks = api
        .recommendations(&seed_artists, &seed_tracks, limit)
        .await?;

    Ok(tracks
        .into_iter()
        .map(|t| Recommendation {
            artist: t
                .primary_artist()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            album: t.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            name: t.name,
            id: t.id,
            uri: t.uri,
            preview_url: t.preview_url,
        })
        .collect())
}
