use thiserror::Error;

use crate::{
    management::GenreStore,
    spotify::SpotifyApi,
    types::{Track, TrackRecord},
};

use super::GenreResolver;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("primary artist of \"{track}\" has no id")]
    MissingArtistId { track: String },
}

/// Attaches the primary artist's genres to a copy of every record.
///
/// The genre cache is loaded once for the whole batch. The output has the
/// same length and order as `records`. Records without a track or without
/// artists are copied unchanged; a record whose primary artist cannot be
/// resolved gets an empty genre list. Nothing in here fails the batch.
///
/// # Arguments
///
/// * `api` - Spotify backend asked for artists missing from the cache
/// * `store` - Persistent genre cache, saved after every miss
/// * `records` - Wrapped or bare track records, left untouched
///
/// # Returns
///
/// Copies of `records` in the same shape, with `genres` set on the primary
/// artist of every record that has one.
///
/// # Example
///
/// ```
/// let store = GenreStore::from_config();
/// let songs = fetch::get_liked_songs(&client, Some(50)).await;
/// for record in genres::enrich_tracks(&client, &store, &songs).await {
///     if let Some(track) = record.track() {
///         println!("{}: {}", track.name, track.primary_genres().join(", "));
///     }
/// }
/// ```
pub async fn enrich_tracks(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    records: &[TrackRecord],
) -> Vec<TrackRecord> {
    let mut cache = store.load().await;
    let resolver = GenreResolver::new(api, store);
    let mut enriched = Vec::with_capacity(records.len());

    for record in records {
        let mut copy = record.clone();

        if let Some(track) = copy.track_mut() {
            match primary_artist_id(track) {
                Ok(Some(artist_id)) => {
                    let genres = resolver.resolve(&artist_id, &mut cache).await;
                    set_primary_genres(track, genres);
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Error processing genres for track: {}", e);
                    set_primary_genres(track, Vec::new());
                }
            }
        }

        enriched.push(copy);
    }

    log::debug!("Genre cache now contains {} artists", cache.len());
    enriched
}

/// Id of `artists[0]`; `None` when the track has no artists.
fn primary_artist_id(track: &Track) -> Result<Option<String>, RecordError> {
    let Some(artist) = track.artists.first() else {
        return Ok(None);
    };

    match artist.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(Some(id.to_string())),
        _ => Err(RecordError::MissingArtistId {
            track: track.name.clone(),
        }),
    }
}

fn set_primary_genres(track: &mut Track, genres: Vec<String>) {
    if let Some(artist) = track.artists.first_mut() {
        artist.genres = Some(genres);
    }
}
