use reqwest::Method;

use crate::types::{
    AddTracksRequest, AddTracksResponse, CreatePlaylistRequest, Page, Playlist, TrackRecord, User,
};

use super::{
    client::{Retry, SpotifyClient},
    error::UpstreamError,
};

impl SpotifyClient {
    pub async fn me(&self) -> Result<User, UpstreamError> {
        self.get_json("/me", Retry::Transient).await
    }

    pub async fn playlists_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Playlist>, UpstreamError> {
        let path = format!("/me/playlists?limit={limit}&offset={offset}");
        self.get_json(&path, Retry::Transient).await
    }

    pub async fn playlist_by_id(&self, playlist_id: &str) -> Result<Playlist, UpstreamError> {
        self.get_json(&format!("/playlists/{playlist_id}"), Retry::Transient)
            .await
    }

    pub async fn playlist_tracks_page(
        &self,
        playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        let path = format!("/playlists/{playlist_id}/tracks?limit={limit}&offset={offset}");
        self.get_json(&path, Retry::Transient).await
    }

    /// Creates a playlist owned by `user_id`.
    pub async fn create(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, UpstreamError> {
        self.send_json(Method::POST, &format!("/users/{user_id}/playlists"), request)
            .await
    }

    /// Appends up to 100 track URIs to a playlist.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTracksResponse, UpstreamError> {
        let body = AddTracksRequest {
            uris: uris.to_vec(),
        };
        self.send_json(Method::POST, &format!("/playlists/{playlist_id}/tracks"), &body)
            .await
    }
}
