use crate::{
    management::{GenreCache, GenreStore},
    spotify::{SpotifyApi, UpstreamError},
};

/// Outcome of asking Spotify for an artist's genres.
#[derive(Debug)]
pub enum Lookup {
    Fetched(Vec<String>),
    Failed(UpstreamError),
}

/// Resolves artist ids to genres through a write-through [`GenreCache`].
///
/// Every miss is fetched from Spotify, written into the cache and persisted
/// right away. Failed lookups are cached as an empty genre list so the same
/// artist is not asked for again. A failed lookup cannot be told apart from
/// an artist without genres afterwards, whether it was a network blip, a rate
/// limit or an unknown id.
pub struct GenreResolver<'a> {
    api: &'a dyn SpotifyApi,
    store: &'a GenreStore,
}

impl<'a> GenreResolver<'a> {
    pub fn new(api: &'a dyn SpotifyApi, store: &'a GenreStore) -> Self {
        Self { api, store }
    }

    /// Genres of `artist_id`. Never fails; a failed lookup yields `[]`.
    ///
    /// # Arguments
    ///
    /// * `artist_id` - Spotify artist id, non-empty
    /// * `cache` - In-memory cache; a miss is inserted and the whole cache saved
    ///
    /// # Returns
    ///
    /// The cached genres on a hit, including a cached empty list. On a miss
    /// the genres Spotify reports, or `[]` when the lookup fails.
    pub async fn resolve(&self, artist_id: &str, cache: &mut GenreCache) -> Vec<String> {
        if let Some(genres) = cache.get(artist_id) {
            log::debug!("Using cached genres for artist {}", artist_id);
            return genres.clone();
        }

        let genres = match self.lookup_upstream(artist_id).await {
            Lookup::Fetched(genres) => {
                log::debug!("Fetched genres for artist {}: {:?}", artist_id, genres);
                genres
            }
            Lookup::Failed(e) => {
                log::warn!("Error getting genres for artist {}: {}", artist_id, e);
                Vec::new()
            }
        };

        cache.insert(artist_id, genres.clone());
        self.store.save(cache).await;
        genres
    }

    /// Asks Spotify once, without touching the cache.
    pub async fn lookup_upstream(&self, artist_id: &str) -> Lookup {
        match self.api.get_artist(artist_id).await {
            Ok(artist) => Lookup::Fetched(artist.genres),
            Err(e) => Lookup::Failed(e),
        }
    }
}
