use serde::Serialize;

use crate::{
    spotify::{SpotifyApi, UpstreamError},
    types::{SearchResults, SearchType},
};

/// Page size of a search.
pub const SEARCH_LIMIT: u32 = 20;
const MAX_SEARCH_LIMIT: u32 = 50;

/// One search hit, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub name: String,
    /// Artists of a track or album, owner of a playlist, genres of an artist.
    pub detail: String,
}

/// Searches the Spotify catalog.
///
/// A blank query yields empty results without asking Spotify. `limit` is
/// clamped to what Spotify accepts.
///
/// # Arguments
///
/// * `api` - Spotify backend
/// * `query` - Search text, trimmed before it is sent
/// * `search_type` - Kind of objects to look for
/// * `limit` - Number of results, usually [`SEARCH_LIMIT`]
///
/// # Returns
///
/// The results page of `search_type`, or the upstream error.
///
/// # Example
///
/// ```
/// let results = library::search(&client, "boards of canada", SearchType::Artist, SEARCH_LIMIT).await?;
/// for hit in library::search_hits(&results) {
///     println!("{} {}", hit.name, hit.detail);
/// }
/// ```
pub async fn search(
    api: &dyn SpotifyApi,
    query: &str,
    search_type: SearchType,
    limit: u32,
) -> Result<SearchResults, UpstreamError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(SearchResults::default());
    }

    api.search(query, search_type, limit.clamp(1, MAX_SEARCH_LIMIT))
        .await
}

/// Flattens whatever pages `results` holds, tracks first.
pub fn search_hits(results: &SearchResults) -> Vec<SearchHit> {
    let mut hits = Vec::with_capacity(results.len());

    if let Some(page) = &results.tracks {
        hits.extend(page.items.iter().map(|t| SearchHit {
            id: t.id.clone().unwrap_or_default(),
            name: t.name.clone(),
            detail: join_names(t.artists.iter().map(|a| a.name.as_str())),
        }));
    }
    if let Some(page) = &results.artists {
        hits.extend(page.items.iter().map(|a| SearchHit {
            id: a.id.clone(),
            name: a.name.clone(),
            detail: a.genres.join(", "),
        }));
    }
    if let Some(page) = &results.albums {
        hits.extend(page.items.iter().map(|a| SearchHit {
            id: a.id.clone(),
            name: a.name.clone(),
            detail: join_names(a.artists.iter().map(|a| a.name.as_str())),
        }));
    }
    if let Some(page) = &results.playlists {
        hits.extend(page.items.iter().map(|p| SearchHit {
            id: p.id.clone(),
            name: p.name.clone(),
            detail: p
                .owner
                .as_ref()
                .map(|o| o.display_name.clone().unwrap_or_else(|| o.id.clone()))
                .unwrap_or_default(),
        }));
    }

    hits
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}
