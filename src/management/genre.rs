use std::{
    collections::BTreeMap,
    fmt,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "io error: {}", e),
            StoreError::SerdeError(e) => write!(f, "malformed genre cache: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::SerdeError(err)
    }
}

/// Mapping from artist id to its genre labels.
///
/// An entry with an empty list means the artist was looked up and has no
/// genres (or the lookup failed); a missing entry means it was never looked
/// up. On disk this is a flat, pretty-printed JSON object with sorted keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreCache {
    artists: BTreeMap<String, Vec<String>>,
}

impl GenreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, artist_id: &str) -> Option<&Vec<String>> {
        self.artists.get(artist_id)
    }

    pub fn contains(&self, artist_id: &str) -> bool {
        self.artists.contains_key(artist_id)
    }

    pub fn insert(&mut self, artist_id: impl Into<String>, genres: Vec<String>) -> &mut Self {
        self.artists.insert(artist_id.into(), genres);
        self
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.artists.iter()
    }

    pub fn stats(&self) -> GenreCacheStats {
        let total_artists = self.artists.len();
        let artists_with_genres = self.artists.values().filter(|g| !g.is_empty()).count();
        GenreCacheStats {
            total_artists,
            artists_with_genres,
            artists_without_genres: total_artists - artists_with_genres,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for GenreCache {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        Self {
            artists: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenreCacheStats {
    pub total_artists: usize,
    pub artists_with_genres: usize,
    pub artists_without_genres: usize,
}

/// File-backed persistence of the [`GenreCache`].
///
/// The store holds no cache in memory: every enrichment pass loads the whole
/// mapping, mutates its own copy and saves it back after each change. Two
/// passes running at the same time only see each other through the file and
/// the last save wins.
#[derive(Debug, Clone)]
pub struct GenreStore {
    path: PathBuf,
}

impl GenreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the configured location, see [`config::genre_cache_path`].
    pub fn from_config() -> Self {
        Self::new(config::genre_cache_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the cache, falling back to an empty one.
    ///
    /// A missing file is the normal first-run case. A file that cannot be read
    /// or parsed is logged and treated as empty too, which means the next save
    /// replaces the corrupt file and whatever it still held is lost.
    pub async fn load(&self) -> GenreCache {
        match self.try_load().await {
            Ok(cache) => cache,
            Err(StoreError::IoError(e)) if e.kind() == ErrorKind::NotFound => GenreCache::new(),
            Err(e) => {
                log::warn!(
                    "Error loading genre cache from {}, starting with empty cache: {}",
                    self.path.display(),
                    e
                );
                GenreCache::new()
            }
        }
    }

    pub async fn try_load(&self) -> Result<GenreCache, StoreError> {
        let content = async_fs::read_to_string(&self.path).await?;
        let cache = serde_json::from_str(&content)?;
        Ok(cache)
    }

    /// Replaces the file with the full mapping. Failures are logged and
    /// swallowed; the caller keeps working with its in-memory copy.
    pub async fn save(&self, cache: &GenreCache) {
        match self.try_save(cache).await {
            Ok(()) => log::debug!(
                "Genre cache saved to {} with {} artists",
                self.path.display(),
                cache.len()
            ),
            Err(e) => log::warn!(
                "Error saving genre cache to {}: {}",
                self.path.display(),
                e
            ),
        }
    }

    pub async fn try_save(&self, cache: &GenreCache) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(cache)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Sibling the cache is written to before it replaces the real file, so
    /// an interrupted save never leaves a truncated cache behind.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    pub async fn stats(&self) -> GenreCacheStats {
        self.load().await.stats()
    }
}
