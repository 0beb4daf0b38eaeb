use std::path::Path;

use tabled::Table;

use crate::{
    error, fetch, genres, info,
    library::{self, TransferError},
    management::GenreStore,
    spotify::SpotifyApi,
    success,
    types::{CountTableRow, PlaylistTableRow, TrackRecord, TrackTableRow},
    utils, warning,
};

use super::{connect, spinner};

pub async fn list_playlists() {
    let client = connect().await;

    let pb = spinner("Fetching playlists...");
    let playlists = fetch::get_user_playlists(&client).await;
    pb.finish_and_clear();

    if playlists.is_empty() {
        warning!("No playlists found.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            owner: p
                .owner
                .map(|o| o.display_name.unwrap_or(o.id))
                .unwrap_or_default(),
            tracks: p.tracks.map(|t| t.total).unwrap_or(0),
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Shows the tracks of a playlist with their genres, or the genre breakdown
/// with `by_genre`, and optionally writes an export file.
pub async fn show_playlist(playlist_id: String, by_genre: bool, export: Option<String>) {
    let client = connect().await;
    let store = GenreStore::from_config();

    let playlist = match client.playlist(&playlist_id).await {
        Ok(p) => p,
        Err(e) => error!("Cannot load playlist {}: {}", playlist_id, e),
    };

    let pb = spinner("Fetching playlist tracks...");
    let tracks = fetch::get_playlist_tracks(&client, &playlist_id).await;
    pb.set_message("Resolving artist genres...");
    let enriched = genres::enrich_tracks(&client, &store, &tracks).await;
    pb.finish_and_clear();

    info!("{} ({} tracks)", playlist.name, enriched.len());

    if by_genre {
        let rows: Vec<CountTableRow> = library::genre_counts(&enriched)
            .into_iter()
            .map(|(name, count)| CountTableRow { name, count })
            .collect();
        println!("{}", Table::new(rows));
    } else {
        println!("{}", Table::new(track_rows(&enriched)));
    }

    if let Some(path) = export {
        let document = library::build_export(&playlist, &enriched, chrono::Utc::now());
        match library::write_export(Path::new(&path), &document).await {
            Ok(()) => success!("Exported {} tracks to {}", document.tracks.len(), path),
            Err(e) => error!("Failed to export playlist: {}", e),
        }
    }
}

pub async fn import_playlist(path: String, name: Option<String>) {
    let export = match library::read_export(Path::new(&path)).await {
        Ok(export) => export,
        Err(e) => error!("Cannot read {}: {}", path, e),
    };

    let client = connect().await;
    let pb = spinner("Creating playlist...");
    let result = library::import_playlist(&client, &export, name.as_deref()).await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            success!(
                "Created playlist {} with {} tracks",
                report.name,
                report.tracks_added
            );
            if report.tracks_skipped > 0 {
                warning!("Skipped {} tracks without URI", report.tracks_skipped);
            }
        }
        Err(TransferError::Empty) => warning!("Nothing to import from {}", path),
        Err(e) => error!("Failed to import playlist: {}", e),
    }
}

pub(crate) fn track_rows(records: &[TrackRecord]) -> Vec<TrackTableRow> {
    records
        .iter()
        .filter_map(TrackRecord::track)
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artist: t
                .primary_artist()
                .map(|a| a.name.clone())
                .unwrap_or_default(),
            genres: utils::join_genres(t.primary_genres(), 3),
        })
        .collect()
}
