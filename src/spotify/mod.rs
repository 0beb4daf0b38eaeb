//! # Spotify Integration Module
//!
//! This module is the integration layer between spordash and the Spotify Web
//! API. Everything above it (pagination, genre enrichment, library features)
//! talks to Spotify through the [`SpotifyApi`] trait, so the upstream service
//! can be swapped for a scripted one in tests.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Library features)
//!          ↓
//! Fetchers / Genre enrichment
//!          ↓
//! SpotifyApi trait
//!          ↓
//! SpotifyClient (reqwest, bearer token from TokenManager)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Submodules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, token exchange and refresh
//! - `artists` - artist lookup and recommendations
//! - `playlist` - current user, playlists, playlist items, create and add tracks
//! - `library` - liked songs, removing liked songs, player state
//! - `catalog` - search and album details
//!
//! ## Error Handling
//!
//! Read endpoints retry `502 Bad Gateway` after 10 seconds and honour
//! `Retry-After` on `429` for delays up to 120 seconds, at most three attempts
//! in total. Mutations and the artist lookup are sent once. Every failure is
//! reported as an [`UpstreamError`].
//!
//! ## API Coverage
//!
//! - `GET /artists/{id}`
//! - `GET /me`, `GET /me/playlists`, `GET /me/tracks`
//! - `GET /me/player`, `GET /me/player/currently-playing`
//! - `GET /search`, `GET /albums/{id}`
//! - `DELETE /me/tracks`
//! - `GET /playlists/{id}`, `GET /playlists/{id}/tracks`
//! - `POST /users/{user_id}/playlists`, `POST /playlists/{id}/tracks`
//! - `GET /recommendations`

use async_trait::async_trait;

use crate::types::{
    Album, ArtistResponse, CreatePlaylistRequest, Page, Playback, Playlist, SearchResults,
    SearchType, Track, TrackRecord, User,
};

mod artists;
pub mod auth;
mod catalog;
mod client;
mod error;
mod library;
mod playlist;

pub use client::SpotifyClient;
pub use error::UpstreamError;

/// The Spotify capabilities spordash relies on.
///
/// Paginated listings take an `offset` and a page size (`limit`) and return a
/// single [`Page`]; collecting every page is the job of [`crate::fetch`].
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Artist record including its genres.
    async fn get_artist(&self, artist_id: &str) -> Result<ArtistResponse, UpstreamError>;

    async fn current_user(&self) -> Result<User, UpstreamError>;

    async fn current_user_playlists(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Playlist>, UpstreamError>;

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist, UpstreamError>;

    /// Items of a playlist, each wrapping its track under `track`.
    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError>;

    /// The user's liked songs, each wrapping its track under `track`.
    async fn saved_tracks(&self, offset: u64, limit: u64)
    -> Result<Page<TrackRecord>, UpstreamError>;

    async fn remove_saved_tracks(&self, track_ids: &[String]) -> Result<(), UpstreamError>;

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, UpstreamError>;

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), UpstreamError>;

    /// `None` when nothing is playing.
    async fn current_playback(&self) -> Result<Option<Playback>, UpstreamError>;

    /// The item playing right now, without device information.
    async fn currently_playing(&self) -> Result<Option<Playback>, UpstreamError>;

    /// One page of catalog results of a single type.
    async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<SearchResults, UpstreamError>;

    /// Album with its first page of tracks.
    async fn album(&self, album_id: &str) -> Result<Album, UpstreamError>;

    async fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Vec<Track>, UpstreamError>;
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn get_artist(&self, artist_id: &str) -> Result<ArtistResponse, UpstreamError> {
        self.artist(artist_id).await
    }

    async fn current_user(&self) -> Result<User, UpstreamError> {
        self.me().await
    }

    async fn current_user_playlists(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Playlist>, UpstreamError> {
        self.playlists_page(offset, limit).await
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist, UpstreamError> {
        self.playlist_by_id(playlist_id).await
    }

    async fn playlist_tracks(
        &self,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        self.playlist_tracks_page(playlist_id, offset, limit).await
    }

    async fn saved_tracks(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        self.saved_tracks_page(offset, limit).await
    }

    async fn remove_saved_tracks(&self, track_ids: &[String]) -> Result<(), UpstreamError> {
        self.remove_saved(track_ids).await
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, UpstreamError> {
        self.create(user_id, request).await
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), UpstreamError> {
        self.add_tracks(playlist_id, uris).await.map(|_| ())
    }

    async fn current_playback(&self) -> Result<Option<Playback>, UpstreamError> {
        self.playback().await
    }

    async fn currently_playing(&self) -> Result<Option<Playback>, UpstreamError> {
        self.playing_item().await
    }

    async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<SearchResults, UpstreamError> {
        self.search_catalog(query, search_type, limit).await
    }

    async fn album(&self, album_id: &str) -> Result<Album, UpstreamError> {
        self.album_by_id(album_id).await
    }

    async fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Vec<Track>, UpstreamError> {
        self.recommendations_for(seed_artists, seed_tracks, limit)
            .await
    }
}
