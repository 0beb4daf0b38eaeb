//! Helpers that walk offset-paginated Spotify listings page by page.

use std::future::Future;

use crate::{
    spotify::{SpotifyApi, UpstreamError},
    types::{Page, Playlist, TrackRecord},
};

pub const PLAYLISTS_BATCH_SIZE: u64 = 50;
pub const PLAYLIST_TRACKS_BATCH_SIZE: u64 = 100;
pub const LIKED_SONGS_BATCH_SIZE: u64 = 50;

/// Collects the items of every page returned by `fetch_page(offset, batch_size)`.
///
/// Stops after a page without `next` or without items. With a `limit` the
/// result is cut to exactly `limit` items and no further page is requested
/// once it is reached; without one every page is fetched. An error ends the
/// walk and returns what was collected so far.
///
/// # Arguments
///
/// * `batch_size` - Page size requested from Spotify, also the offset step
/// * `limit` - Maximum number of items, `None` for all of them
/// * `fetch_page` - Requests the page at `(offset, batch_size)`
///
/// # Returns
///
/// The items in page order. Never more than `limit`, possibly fewer when a
/// page request fails.
///
/// # Example
///
/// ```
/// let tracks = fetch_all(LIKED_SONGS_BATCH_SIZE, Some(120), |offset, batch| {
///     api.saved_tracks(offset, batch)
/// })
/// .await;
/// assert!(tracks.len() <= 120);
/// ```
pub async fn fetch_all<T, F, Fut>(batch_size: u64, limit: Option<usize>, mut fetch_page: F) -> Vec<T>
where
    F: FnMut(u64, u64) -> Fut,
    Fut: Future<Output = Result<Page<T>, UpstreamError>>,
{
    let mut items: Vec<T> = Vec::new();
    if limit == Some(0) {
        return items;
    }

    let mut offset = 0;
    loop {
        let page = match fetch_page(offset, batch_size).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Error fetching page at offset {}: {}", offset, e);
                break;
            }
        };

        if page.items.is_empty() {
            break;
        }
        items.extend(page.items);

        if let Some(limit) = limit {
            if items.len() >= limit {
                items.truncate(limit);
                break;
            }
        }

        if page.next.is_none() {
            break;
        }
        offset += batch_size;
    }

    items
}

/// Every playlist of the current user, in pages of [`PLAYLISTS_BATCH_SIZE`].
pub async fn get_user_playlists(api: &dyn SpotifyApi) -> Vec<Playlist> {
    let playlists = fetch_all(PLAYLISTS_BATCH_SIZE, None, move |offset, limit| {
        api.current_user_playlists(offset, limit)
    })
    .await;
    log::debug!("Finished fetching user playlists. Total: {}", playlists.len());
    playlists
}

/// Every item of a playlist, in pages of [`PLAYLIST_TRACKS_BATCH_SIZE`].
/// Items come back wrapped, with `track` set to `null` for removed tracks.
pub async fn get_playlist_tracks(api: &dyn SpotifyApi, playlist_id: &str) -> Vec<TrackRecord> {
    let tracks = fetch_all(PLAYLIST_TRACKS_BATCH_SIZE, None, move |offset, limit| {
        api.playlist_tracks(playlist_id, offset, limit)
    })
    .await;
    log::debug!("Finished fetching playlist tracks. Total: {}", tracks.len());
    tracks
}

/// Liked songs, newest first.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `limit` - Most recent songs to fetch, `None` fetches the whole library
///
/// # Example
///
/// ```
/// let recent = fetch::get_liked_songs(&client, Some(20)).await;
/// let enriched = genres::enrich_tracks(&client, &store, &recent).await;
/// ```
pub async fn get_liked_songs(api: &dyn SpotifyApi, limit: Option<usize>) -> Vec<TrackRecord> {
    let tracks = fetch_all(LIKED_SONGS_BATCH_SIZE, limit, move |offset, batch| {
        api.saved_tracks(offset, batch)
    })
    .await;
    log::debug!("Finished fetching liked songs. Total: {}", tracks.len());
    tracks
}
