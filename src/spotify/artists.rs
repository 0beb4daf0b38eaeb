use crate::types::{ArtistResponse, RecommendationsResponse, Track};

use super::{
    client::{Retry, SpotifyClient},
    error::UpstreamError,
};

impl SpotifyClient {
    /// Fetches a single artist with its genres.
    ///
    /// This lookup is never retried: the genre resolver turns any failure into
    /// a cached empty genre list, and a retry would only delay that.
    pub async fn artist(&self, artist_id: &str) -> Result<ArtistResponse, UpstreamError> {
        self.get_json(&format!("/artists/{id}", id = artist_id), Retry::Never)
            .await
    }

    pub async fn recommendations_for(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Vec<Track>, UpstreamError> {
        let path = format!(
            "/recommendations?seed_artists={artists}&seed_tracks={tracks}&limit={limit}",
            artists = seed_artists.join(","),
            tracks = seed_tracks.join(","),
            limit = limit
        );
        let res: RecommendationsResponse = self.get_json(&path, Retry::Transient).await?;
        Ok(res.tracks)
    }
}
