use std::collections::HashMap;

use serde::Serialize;

use crate::{fetch, spotify::SpotifyApi, types::TrackRecord};

/// Spotify removes at most 50 liked songs per request.
const REMOVE_BATCH_SIZE: usize = 50;

/// Liked songs sharing a name and primary artist.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub track_name: String,
    pub artist_name: String,
    pub duplicate_count: usize,
    pub tracks: Vec<TrackRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub tracks_removed: usize,
    pub duplicate_groups_processed: usize,
}

/// Groups records by lower-cased, trimmed track name and primary artist name
/// and keeps the groups with more than one member, largest first.
pub fn detect_duplicates(records: &[TrackRecord]) -> Vec<DuplicateGroup> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for record in records {
        let Some(track) = record.track() else {
            continue;
        };
        if track.name.trim().is_empty() {
            continue;
        }

        let artist = track.primary_artist();
        let key = (
            track.name.trim().to_lowercase(),
            artist
                .map(|a| a.name.trim().to_lowercase())
                .unwrap_or_else(|| "unknown".to_string()),
        );

        match positions.get(&key) {
            Some(&idx) => {
                groups[idx].tracks.push(record.clone());
                groups[idx].duplicate_count += 1;
            }
            None => {
                positions.insert(key, groups.len());
                groups.push(DuplicateGroup {
                    track_name: track.name.clone(),
                    artist_name: artist
                        .map(|a| a.name.clone())
                        .unwrap_or_else(|| "Unknown Artist".to_string()),
                    duplicate_count: 1,
                    tracks: vec![record.clone()],
                });
            }
        }
    }

    groups.retain(|g| g.duplicate_count > 1);
    groups.sort_by(|a, b| b.duplicate_count.cmp(&a.duplicate_count));
    groups
}

/// Duplicate groups over the whole liked songs library.
pub async fn detect_duplicate_liked_songs(api: &dyn SpotifyApi) -> Vec<DuplicateGroup> {
    let songs = fetch::get_liked_songs(api, None).await;
    let duplicates = detect_duplicates(&songs);
    log::debug!(
        "Found {} sets of duplicate tracks in liked songs",
        duplicates.len()
    );
    duplicates
}

/// Keeps the first track of every group and removes the others from the
/// liked songs. A failing batch is logged and skipped.
///
/// # Returns
///
/// A [`MergeReport`] counting every group and only the tracks Spotify
/// actually removed.
pub async fn merge_duplicates(api: &dyn SpotifyApi, groups: &[DuplicateGroup]) -> MergeReport {
    let mut ids: Vec<String> = Vec::new();

    for group in groups {
        let keep = group
            .tracks
            .first()
            .and_then(|r| r.track())
            .and_then(|t| t.id.clone());

        ids.extend(
            group
                .tracks
                .iter()
                .skip(1)
                .filter_map(|r| r.track().and_then(|t| t.id.clone()))
                .filter(|id| Some(id) != keep.as_ref()),
        );
    }

    let mut removed = 0;
    for batch in ids.chunks(REMOVE_BATCH_SIZE) {
        match api.remove_saved_tracks(batch).await {
            Ok(()) => removed += batch.len(),
            Err(e) => log::warn!("Error removing batch: {}", e),
        }
    }

    MergeReport {
        tracks_removed: removed,
        duplicate_groups_processed: groups.len(),
    }
}

pub async fn merge_all_duplicates(api: &dyn SpotifyApi) -> MergeReport {
    let duplicates = detect_duplicate_liked_songs(api).await;
    merge_duplicates(api, &duplicates).await
}
