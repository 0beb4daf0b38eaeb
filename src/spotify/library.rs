use reqwest::Method;
use serde_json::json;

use crate::types::{Page, Playback, TrackRecord};

use super::{
    client::{Retry, SpotifyClient},
    error::UpstreamError,
};

impl SpotifyClient {
    pub async fn saved_tracks_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        let path = format!("/me/tracks?limit={limit}&offset={offset}");
        self.get_json(&path, Retry::Transient).await
    }

    /// Removes up to 50 tracks from the user's liked songs.
    pub async fn remove_saved(&self, track_ids: &[String]) -> Result<(), UpstreamError> {
        self.send(Method::DELETE, "/me/tracks", &json!({ "ids": track_ids }))
            .await?;
        Ok(())
    }

    pub async fn playback(&self) -> Result<Option<Playback>, UpstreamError> {
        self.get_optional_json("/me/player").await
    }

    pub async fn playing_item(&self) -> Result<Option<Playback>, UpstreamError> {
        self.get_optional_json("/me/player/currently-playing").await
    }
}
