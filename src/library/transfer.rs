use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    fetch, genres,
    management::GenreStore,
    spotify::{SpotifyApi, UpstreamError},
    types::{CreatePlaylistRequest, Playlist, TrackRecord},
};

use super::add_tracks_in_batches;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("cannot access export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed export file: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("export contains no importable tracks")]
    Empty,
}

/// Portable JSON document describing a playlist and its tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistExport {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exported_at: DateTime<Utc>,
    pub tracks: Vec<ExportedTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedTrack {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub playlist_id: String,
    pub name: String,
    pub tracks_added: usize,
    pub tracks_skipped: usize,
}

/// Flattens (ideally enriched) playlist records into an export document.
/// Items without a track are left out.
pub fn build_export(
    playlist: &Playlist,
    records: &[TrackRecord],
    exported_at: DateTime<Utc>,
) -> PlaylistExport {
    let tracks = records
        .iter()
        .filter_map(TrackRecord::track)
        .map(|t| ExportedTrack {
            id: t.id.clone(),
            name: t.name.clone(),
            uri: t.uri.clone(),
            artists: t.artists.iter().map(|a| a.name.clone()).collect(),
            genres: t.primary_genres().to_vec(),
            release_date: t.release_date().map(str::to_string),
        })
        .collect();

    PlaylistExport {
        name: playlist.name.clone(),
        description: playlist.description.clone().filter(|d| !d.is_empty()),
        exported_at,
        tracks,
    }
}

/// Fetches, enriches and writes a playlist to `path`.
pub async fn export_playlist(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    playlist_id: &str,
    path: &Path,
) -> Result<PlaylistExport, TransferError> {
    let playlist = api.playlist(playlist_id).await?;
    let tracks = fetch::get_playlist_tracks(api, playlist_id).await;
    let enriched = genres::enrich_tracks(api, store, &tracks).await;

    let export = build_export(&playlist, &enriched, Utc::now());
    write_export(path, &export).await?;
    Ok(export)
}

/// Writes `export` as pretty JSON, creating missing parent directories.
pub async fn write_export(path: &Path, export: &PlaylistExport) -> Result<(), TransferError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            async_fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(export)?;
    async_fs::write(path, json).await?;
    Ok(())
}

pub async fn read_export(path: &Path) -> Result<PlaylistExport, TransferError> {
    let content = async_fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Creates a private playlist holding every exported track that has a URI.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `export` - Document read with [`read_export`]
/// * `name` - Name of the new playlist, defaults to the exported name
///
/// # Errors
///
/// [`TransferError::Empty`] when no exported track has a URI, before any
/// request is made. Upstream failures while creating the playlist or adding
/// tracks are returned as [`TransferError::Upstream`].
pub async fn import_playlist(
    api: &dyn SpotifyApi,
    export: &PlaylistExport,
    name: Option<&str>,
) -> Result<ImportReport, TransferError> {
    let uris: Vec<String> = export
        .tracks
        .iter()
        .filter_map(|t| t.uri.clone())
        .collect();
    if uris.is_empty() {
        return Err(TransferError::Empty);
    }

    let user = api.current_user().await?;
    let request = CreatePlaylistRequest {
        name: name.unwrap_or(&export.name).to_string(),
        description: export
            .description
            .clone()
            .unwrap_or_else(|| format!("Imported from export of {}", export.name)),
        public: false,
        collaborative: false,
    };

    let playlist = api.create_playlist(&user.id, &request).await?;
    add_tracks_in_batches(api, &playlist.id, &uris).await?;

    Ok(ImportReport {
        playlist_id: playlist.id,
        name: request.name,
        tracks_added: uris.len(),
        tracks_skipped: export.tracks.len() - uris.len(),
    })
}
