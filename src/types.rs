use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{DeserializeOwned, Error as _},
};
use serde_json::Value;
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Artist as embedded in a track.
///
/// `genres` stays `None` until the enrichment pipeline sets it, and is left
/// out of the serialized form while unset. `id` is optional because local
/// files carry artists without one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
}

/// Full artist object returned by `GET /artists/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistResponse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub artists: Vec<Artist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&Artist> {
        self.artists.first()
    }

    /// Genres attached to `artists[0]`, empty when not enriched.
    pub fn primary_genres(&self) -> &[String] {
        self.primary_artist()
            .and_then(|a| a.genres.as_deref())
            .unwrap_or(&[])
    }

    pub fn release_date(&self) -> Option<&str> {
        self.album.as_ref().and_then(|a| a.release_date.as_deref())
    }
}

/// Saved-track or playlist item: the track nested under a `track` key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackItem {
    #[serde(default)]
    pub track: Option<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,
}

/// A track-bearing record as returned by the different listing endpoints.
///
/// Liked songs and playlist items wrap the track under `track`, other call
/// sites hand over bare tracks. The variant is decided once while
/// deserializing, from the presence of the `track` key, and serialization
/// writes back the same shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrackRecord {
    Wrapped(TrackItem),
    Bare(Track),
}

impl<'de> Deserialize<'de> for TrackRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let wrapped = value
            .as_object()
            .is_some_and(|object| object.contains_key("track"));

        if wrapped {
            serde_json::from_value(value)
                .map(TrackRecord::Wrapped)
                .map_err(D::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(TrackRecord::Bare)
                .map_err(D::Error::custom)
        }
    }
}

impl TrackRecord {
    pub fn wrapped(track: Track) -> Self {
        TrackRecord::Wrapped(TrackItem {
            track: Some(track),
            added_at: None,
        })
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, TrackRecord::Wrapped(_))
    }

    pub fn track(&self) -> Option<&Track> {
        match self {
            TrackRecord::Wrapped(item) => item.track.as_ref(),
            TrackRecord::Bare(track) => Some(track),
        }
    }

    pub fn track_mut(&mut self) -> Option<&mut Track> {
        match self {
            TrackRecord::Wrapped(item) => item.track.as_mut(),
            TrackRecord::Bare(track) => Some(track),
        }
    }

    pub fn into_track(self) -> Option<Track> {
        match self {
            TrackRecord::Wrapped(item) => item.track,
            TrackRecord::Bare(track) => Some(track),
        }
    }
}

impl From<Track> for TrackRecord {
    fn from(track: Track) -> Self {
        TrackRecord::Bare(track)
    }
}

/// One page of an offset-paginated listing.
///
/// Items are decoded one by one: an item that does not fit `T` is logged and
/// dropped, the rest of the page is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "lenient_list")]
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub snapshot_id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artist: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct CountTableRow {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Device {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub volume_percent: Option<u32>,
}

/// Player state from `GET /me/player` or `GET /me/player/currently-playing`.
/// The latter has no `device`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playback {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_playing_type: Option<String>,
}

/// Full album object returned by `GET /albums/{id}`. Search results carry
/// the simplified form, without `label`, `genres` and `tracks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub tracks: Option<Page<Track>>,
}

/// Kind of catalog object to search for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
            SearchType::Playlist => "playlist",
        }
    }
}

impl FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "track" => Ok(SearchType::Track),
            "artist" => Ok(SearchType::Artist),
            "album" => Ok(SearchType::Album),
            "playlist" => Ok(SearchType::Playlist),
            other => Err(format!(
                "unknown search type '{}', expected track, artist, album or playlist",
                other
            )),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /search`. Only the page of the requested type is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Page<Track>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Page<ArtistResponse>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub albums: Option<Page<Album>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlists: Option<Page<Playlist>>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.tracks.as_ref().map_or(0, |p| p.items.len())
            + self.artists.as_ref().map_or(0, |p| p.items.len())
            + self.albums.as_ref().map_or(0, |p| p.items.len())
            + self.playlists.as_ref().map_or(0, |p| p.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` becomes an empty list and entries that fail to decode are skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("Skipping malformed entry {} of {}: {}", index, total, e);
                None
            }
        })
        .collect();
    Ok(items)
}
