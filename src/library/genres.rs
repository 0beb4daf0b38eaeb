use std::collections::BTreeSet;

use crate::{
    fetch, genres,
    management::GenreStore,
    spotify::SpotifyApi,
    types::TrackRecord,
    utils,
};

/// How many tracks carry each genre, most frequent first.
pub fn genre_counts(records: &[TrackRecord]) -> Vec<(String, usize)> {
    let all = records
        .iter()
        .filter_map(TrackRecord::track)
        .flat_map(|t| t.primary_genres().iter().cloned());
    utils::most_common(all, usize::MAX)
}

/// Sorted, distinct genres over all records.
pub fn available_genres(records: &[TrackRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(TrackRecord::track)
        .flat_map(|t| t.primary_genres().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records with a primary-artist genre containing `needle`, case-insensitive.
pub fn filter_by_genre(records: &[TrackRecord], needle: &str) -> Vec<TrackRecord> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.track().is_some_and(|t| {
                t.primary_genres()
                    .iter()
                    .any(|g| g.to_lowercase().contains(&needle))
            })
        })
        .cloned()
        .collect()
}

/// Genre breakdown of a playlist, most frequent first.
pub async fn get_playlist_genres(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    playlist_id: &str,
) -> Vec<(String, usize)> {
    let tracks = fetch::get_playlist_tracks(api, playlist_id).await;
    let enriched = genres::enrich_tracks(api, store, &tracks).await;
    genre_counts(&enriched)
}

pub async fn get_available_genres(api: &dyn SpotifyApi, store: &GenreStore) -> Vec<String> {
    let songs = fetch::get_liked_songs(api, None).await;
    let enriched = genres::enrich_tracks(api, store, &songs).await;
    available_genres(&enriched)
}
