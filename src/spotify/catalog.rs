use crate::types::{Album, SearchResults, SearchType};

use super::{
    client::{Retry, SpotifyClient},
    error::UpstreamError,
};

impl SpotifyClient {
    /// Searches the catalog for one kind of object.
    ///
    /// # Arguments
    ///
    /// * `query` - Free text, Spotify field filters such as `artist:` are passed through
    /// * `search_type` - Which page of the response to fill
    /// * `limit` - Page size, Spotify accepts 1 to 50
    pub async fn search_catalog(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<SearchResults, UpstreamError> {
        let limit = limit.to_string();
        let params = [
            ("q", query),
            ("type", search_type.as_str()),
            ("limit", limit.as_str()),
        ];
        self.get_json_with_query("/search", &params, Retry::Transient)
            .await
    }

    pub async fn album_by_id(&self, album_id: &str) -> Result<Album, UpstreamError> {
        self.get_json(&format!("/albums/{album_id}"), Retry::Transient)
            .await
    }
}
