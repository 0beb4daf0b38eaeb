#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use reqwest::StatusCode;
use spordash::{
    spotify::{SpotifyApi, UpstreamError},
    types::{
        Album, AlbumRef, Artist, ArtistResponse, CreatePlaylistRequest, Page, Playback, Playlist,
        SearchResults, SearchType, Track, TrackRecord, User,
    },
};

/// Everything the mock was asked to do, in call order.
#[derive(Debug, Default)]
pub struct Calls {
    pub artists: Vec<String>,
    pub liked_pages: Vec<(u64, u64)>,
    pub playlist_pages: Vec<(u64, u64)>,
    pub removed: Vec<Vec<String>>,
    pub created: Vec<CreatePlaylistRequest>,
    pub added: Vec<(String, Vec<String>)>,
    pub recommendations: Vec<(Vec<String>, Vec<String>, u32)>,
    pub searches: Vec<(String, SearchType, u32)>,
    pub albums: Vec<String>,
}

/// Scripted Spotify backend.
///
/// Artists not in `artists` and not in `failing_artists` answer 404.
#[derive(Default)]
pub struct MockSpotify {
    pub artists: HashMap<String, Vec<String>>,
    pub failing_artists: HashSet<String>,
    pub liked: Vec<TrackRecord>,
    pub playlist: Option<Playlist>,
    pub playlist_items: Vec<TrackRecord>,
    pub playlists: Vec<Playlist>,
    pub fail_liked_at_offset: Option<u64>,
    pub fail_user: bool,
    pub fail_remove: bool,
    pub fail_create: HashSet<String>,
    pub playback: Option<Playback>,
    pub fail_playback: bool,
    pub currently_playing: Option<Playback>,
    pub recommended: Vec<Track>,
    pub search_results: SearchResults,
    pub albums: HashMap<String, Album>,
    pub calls: Mutex<Calls>,
}

impl MockSpotify {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, id: &str, genres: &[&str]) -> Self {
        self.artists.insert(id.to_string(), strings(genres));
        self
    }

    pub fn with_failing_artist(mut self, id: &str) -> Self {
        self.failing_artists.insert(id.to_string());
        self
    }

    pub fn with_liked(mut self, liked: Vec<TrackRecord>) -> Self {
        self.liked = liked;
        self
    }

    pub fn artist_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().artists.clone()
    }

    pub fn liked_pages(&self) -> Vec<(u64, u64)> {
        self.calls.lock().unwrap().liked_pages.clone()
    }
}

pub fn page<T: Clone>(items: &[T], offset: u64, limit: u64) -> Page<T> {
    let start = (offset as usize).min(items.len());
    let end = (start + limit as usize).min(items.len());
    let next = (end < items.len()).then(|| format!("offset={}", end));

    Page {
        items: items[start..end].to_vec(),
        next,
        total: Some(items.len() as u64),
        offset,
        limit,
    }
}

fn not_found(body: &str) -> UpstreamError {
    UpstreamError::Status {
        status: StatusCode::NOT_FOUND,
        body: body.to_string(),
    }
}

#[async_trait]
impl SpotifyApi for MockSpotify {
    async fn get_artist(&self, artist_id: &str) -> Result<ArtistResponse, UpstreamError> {
        self.calls.lock().unwrap().artists.push(artist_id.to_string());

        if self.failing_artists.contains(artist_id) {
            return Err(UpstreamError::RateLimited {
                retry_after: Some(30),
            });
        }

        match self.artists.get(artist_id) {
            Some(genres) => Ok(ArtistResponse {
                id: artist_id.to_string(),
                name: format!("Artist {}", artist_id),
                genres: genres.clone(),
            }),
            None => Err(not_found("non existing id")),
        }
    }

    async fn current_user(&self) -> Result<User, UpstreamError> {
        if self.fail_user {
            return Err(UpstreamError::Auth("token expired".to_string()));
        }
        Ok(User {
            id: "listener".to_string(),
            display_name: Some("Listener".to_string()),
        })
    }

    async fn current_user_playlists(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<Playlist>, UpstreamError> {
        Ok(page(&self.playlists, offset, limit))
    }

    async fn playlist(&self, playlist_id: &str) -> Result<Playlist, UpstreamError> {
        self.playlist
            .clone()
            .filter(|p| p.id == playlist_id)
            .ok_or_else(|| not_found("playlist not found"))
    }

    async fn playlist_tracks(
        &self,
        _playlist_id: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        self.calls.lock().unwrap().playlist_pages.push((offset, limit));
        Ok(page(&self.playlist_items, offset, limit))
    }

    async fn saved_tracks(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Page<TrackRecord>, UpstreamError> {
        self.calls.lock().unwrap().liked_pages.push((offset, limit));
        if self.fail_liked_at_offset == Some(offset) {
            return Err(UpstreamError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "bad gateway".to_string(),
            });
        }
        Ok(page(&self.liked, offset, limit))
    }

    async fn remove_saved_tracks(&self, track_ids: &[String]) -> Result<(), UpstreamError> {
        self.calls.lock().unwrap().removed.push(track_ids.to_vec());
        if self.fail_remove {
            return Err(not_found("cannot remove"));
        }
        Ok(())
    }

    async fn create_playlist(
        &self,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Result<Playlist, UpstreamError> {
        let mut calls = self.calls.lock().unwrap();
        calls.created.push(request.clone());
        if self.fail_create.contains(&request.name) {
            return Err(not_found("cannot create"));
        }

        Ok(Playlist {
            id: format!("pl{}", calls.created.len()),
            name: request.name.clone(),
            description: Some(request.description.clone()),
            public: Some(request.public),
            owner: Some(spordash::types::PlaylistOwner {
                id: user_id.to_string(),
                display_name: None,
            }),
            ..Default::default()
        })
    }

    async fn add_tracks_to_playlist(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<(), UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .added
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }

    async fn current_playback(&self) -> Result<Option<Playback>, UpstreamError> {
        if self.fail_playback {
            return Err(UpstreamError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: "bad gateway".to_string(),
            });
        }
        Ok(self.playback.clone())
    }

    async fn currently_playing(&self) -> Result<Option<Playback>, UpstreamError> {
        Ok(self.currently_playing.clone())
    }

    async fn search(
        &self,
        query: &str,
        search_type: SearchType,
        limit: u32,
    ) -> Result<SearchResults, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .searches
            .push((query.to_string(), search_type, limit));
        Ok(self.search_results.clone())
    }

    async fn album(&self, album_id: &str) -> Result<Album, UpstreamError> {
        self.calls.lock().unwrap().albums.push(album_id.to_string());
        self.albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| not_found("album not found"))
    }

    async fn recommendations(
        &self,
        seed_artists: &[String],
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Vec<Track>, UpstreamError> {
        self.calls.lock().unwrap().recommendations.push((
            seed_artists.to_vec(),
            seed_tracks.to_vec(),
            limit,
        ));
        Ok(self
            .recommended
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn artist(id: Option<&str>, name: &str) -> Artist {
    Artist {
        id: id.map(str::to_string),
        name: name.to_string(),
        ..Default::default()
    }
}

/// Track `id` by a single artist, with a `spotify:track:<id>` URI.
pub fn track(id: &str, name: &str, artist_id: &str, artist_name: &str) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: Some(format!("spotify:track:{}", id)),
        artists: vec![artist(Some(artist_id), artist_name)],
        ..Default::default()
    }
}

pub fn released(mut track: Track, date: &str) -> Track {
    track.album = Some(AlbumRef {
        id: None,
        name: format!("{} (album)", track.name),
        release_date: Some(date.to_string()),
    });
    track
}

pub fn with_genres(mut track: Track, genres: &[&str]) -> Track {
    if let Some(artist) = track.artists.first_mut() {
        artist.genres = Some(strings(genres));
    }
    track
}

pub fn liked(track: Track) -> TrackRecord {
    TrackRecord::wrapped(track)
}

/// Wrapped liked songs `t0..tn`, each by its own artist `a0..an`.
pub fn liked_songs(n: usize) -> Vec<TrackRecord> {
    (0..n)
        .map(|i| {
            liked(track(
                &format!("t{}", i),
                &format!("Song {}", i),
                &format!("a{}", i),
                &format!("Artist {}", i),
            ))
        })
        .collect()
}

pub fn genres_of(record: &TrackRecord) -> Option<Vec<String>> {
    record
        .track()
        .and_then(|t| t.primary_artist())
        .and_then(|a| a.genres.clone())
}
