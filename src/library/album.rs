use crate::{
    genres,
    management::GenreStore,
    spotify::{SpotifyApi, UpstreamError},
    types::{Album, AlbumRef, TrackRecord},
};

/// An album with its tracks enriched with genres.
#[derive(Debug, Clone)]
pub struct AlbumDetails {
    pub album: Album,
    pub tracks: Vec<TrackRecord>,
}

/// Fetches an album and enriches its tracks.
///
/// Album tracks come without an `album` reference, so each one gets a
/// reference to this album before enrichment. Only the tracks embedded in
/// the album response are included.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `store` - Genre cache the track artists are resolved through
/// * `album_id` - Spotify album id
///
/// # Returns
///
/// The album and its enriched tracks in album order, or the error of the
/// album request. Genre lookups never fail the call.
pub async fn get_album_details(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    album_id: &str,
) -> Result<AlbumDetails, UpstreamError> {
    let mut album = api.album(album_id).await?;
    let album_ref = AlbumRef {
        id: Some(album.id.clone()),
        name: album.name.clone(),
        release_date: album.release_date.clone(),
    };

    let records: Vec<TrackRecord> = album
        .tracks
        .take()
        .map(|page| page.items)
        .unwrap_or_default()
        .into_iter()
        .map(|mut track| {
            track.album.get_or_insert_with(|| album_ref.clone());
            TrackRecord::from(track)
        })
        .collect();

    let tracks = genres::enrich_tracks(api, store, &records).await;
    Ok(AlbumDetails { album, tracks })
}
