use serde::Serialize;

use crate::{
    spotify::SpotifyApi,
    types::{Playback, Track},
};

/// Player state next to the currently playing item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NowPlaying {
    pub playback: Option<Playback>,
    pub currently_playing: Option<Playback>,
}

impl NowPlaying {
    /// The playing track, preferring the full player state.
    pub fn track(&self) -> Option<&Track> {
        self.playback
            .as_ref()
            .and_then(|p| p.item.as_ref())
            .or_else(|| self.currently_playing.as_ref().and_then(|p| p.item.as_ref()))
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .or(self.currently_playing.as_ref())
            .is_some_and(|p| p.is_playing)
    }

    pub fn progress_ms(&self) -> Option<u64> {
        self.playback
            .as_ref()
            .and_then(|p| p.progress_ms)
            .or_else(|| self.currently_playing.as_ref().and_then(|p| p.progress_ms))
    }
}

/// What is playing right now; `None` when nothing plays or Spotify fails.
pub async fn get_current_playback(api: &dyn SpotifyApi) -> Option<Playback> {
    match api.current_playback().await {
        Ok(playback) => playback,
        Err(e) => {
            log::warn!("Error getting current playback: {}", e);
            None
        }
    }
}

/// The playing item only; `None` when nothing plays or Spotify fails.
pub async fn get_currently_playing(api: &dyn SpotifyApi) -> Option<Playback> {
    match api.currently_playing().await {
        Ok(playing) => playing,
        Err(e) => {
            log::warn!("Error getting currently playing item: {}", e);
            None
        }
    }
}

/// Both player views. Each one fails on its own and is then `None`.
pub async fn get_now_playing(api: &dyn SpotifyApi) -> NowPlaying {
    NowPlaying {
        playback: get_current_playback(api).await,
        currently_playing: get_currently_playing(api).await,
    }
}
