//! Library features built on top of enriched tracks.
//!
//! Every function here takes the track records it works on, or fetches and
//! enriches them itself through [`crate::fetch`] and [`crate::genres`], and
//! degrades to an empty or partial result when Spotify fails.

mod album;
mod duplicates;
mod genre_playlists;
mod genres;
mod playback;
mod recommendations;
mod search;
mod stats;
mod transfer;

pub use album::{AlbumDetails, get_album_details};
pub use duplicates::{
    DuplicateGroup, MergeReport, detect_duplicate_liked_songs, detect_duplicates,
    merge_all_duplicates, merge_duplicates,
};
pub use genre_playlists::{
    CreatedPlaylist, GenrePlaylistReport, MIN_TRACKS_PER_GENRE, create_genre_playlists,
    group_by_genre,
};
pub use genres::{
    available_genres, filter_by_genre, genre_counts, get_available_genres, get_playlist_genres,
};
pub use playback::{NowPlaying, get_current_playback, get_currently_playing, get_now_playing};
pub use recommendations::{Recommendation, get_smart_recommendations, recommendation_seeds};
pub use search::{SEARCH_LIMIT, SearchHit, search, search_hits};
pub use stats::{Period, SongStatistics, get_song_statistics, song_statistics};
pub use transfer::{
    ExportedTrack, ImportReport, PlaylistExport, TransferError, build_export, export_playlist,
    import_playlist, read_export, write_export,
};

use crate::spotify::{SpotifyApi, UpstreamError};

/// Spotify accepts at most 100 URIs per add-items request.
pub const ADD_TRACKS_BATCH_SIZE: usize = 100;

/// Adds `uris` to a playlist in batches, stopping at the first failed batch.
pub async fn add_tracks_in_batches(
    api: &dyn SpotifyApi,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), UpstreamError> {
    for chunk in uris.chunks(ADD_TRACKS_BATCH_SIZE) {
        api.add_tracks_to_playlist(playlist_id, chunk).await?;
    }
    Ok(())
}
