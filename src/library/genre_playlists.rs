use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    fetch, genres,
    management::GenreStore,
    spotify::SpotifyApi,
    types::{CreatePlaylistRequest, TrackRecord},
    utils,
};

use super::add_tracks_in_batches;

/// Genres with fewer liked songs don't get a playlist.
pub const MIN_TRACKS_PER_GENRE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedPlaylist {
    pub name: String,
    pub genre: String,
    pub track_count: usize,
    pub playlist_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenrePlaylistReport {
    pub playlists_created: usize,
    pub playlists: Vec<CreatedPlaylist>,
    pub total_genres: usize,
}

/// Track URIs per primary-artist genre. With `filter`, only genres
/// containing it (case-insensitive) are kept.
pub fn group_by_genre(records: &[TrackRecord], filter: Option<&str>) -> BTreeMap<String, Vec<String>> {
    let filter = filter.map(str::to_lowercase);
    let mut by_genre: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for track in records.iter().filter_map(TrackRecord::track) {
        let Some(uri) = track.uri.as_ref() else {
            continue;
        };

        for genre in track.primary_genres() {
            if let Some(filter) = &filter {
                if !genre.to_lowercase().contains(filter) {
                    continue;
                }
            }
            by_genre.entry(genre.clone()).or_default().push(uri.clone());
        }
    }

    by_genre
}

/// Creates a private "Liked Songs - <Genre>" playlist for every genre with
/// at least [`MIN_TRACKS_PER_GENRE`] liked songs.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `store` - Genre cache used to enrich the liked songs
/// * `filter` - Only genres containing this text, case-insensitive
///
/// # Returns
///
/// The playlists that were created. A playlist that cannot be created or
/// filled is logged and left out. Without a current user nothing is created.
/// `total_genres` counts every genre that passed the filter.
pub async fn create_genre_playlists(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    filter: Option<&str>,
) -> GenrePlaylistReport {
    let user = match api.current_user().await {
        Ok(user) => user,
        Err(e) => {
            log::warn!("Error creating genre playlists: {}", e);
            return GenrePlaylistReport::default();
        }
    };

    let songs = fetch::get_liked_songs(api, None).await;
    let enriched = genres::enrich_tracks(api, store, &songs).await;
    let by_genre = group_by_genre(&enriched, filter);

    let mut created = Vec::new();
    for (genre, uris) in &by_genre {
        if uris.len() < MIN_TRACKS_PER_GENRE {
            continue;
        }

        let request = CreatePlaylistRequest {
            name: format!("Liked Songs - {}", utils::title_case(genre)),
            description: format!("Auto-generated playlist for {} tracks from liked songs", genre),
            public: false,
            collaborative: false,
        };

        let playlist = match api.create_playlist(&user.id, &request).await {
            Ok(playlist) => playlist,
            Err(e) => {
                log::warn!("Error creating playlist {}: {}", request.name, e);
                continue;
            }
        };

        if let Err(e) = add_tracks_in_batches(api, &playlist.id, uris).await {
            log::warn!("Error adding tracks to playlist {}: {}", request.name, e);
            continue;
        }

        created.push(CreatedPlaylist {
            name: request.name,
            genre: genre.clone(),
            track_count: uris.len(),
            playlist_id: playlist.id,
        });
    }

    GenrePlaylistReport {
        playlists_created: created.len(),
        playlists: created,
        total_genres: by_genre.len(),
    }
}
