//! # CLI Module
//!
//! Implementations of the `spordash` subcommands. Each command loads what it
//! needs (token, genre store), calls into the library layer and renders the
//! result as a table or a short status line.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication with PKCE
//! - [`list_playlists`], [`show_playlist`], [`import_playlist`] - playlists
//!   with genre breakdown and JSON export/import
//! - [`liked`], [`genres`], [`genre_playlists`], [`duplicates`], [`stats`] -
//!   liked songs and everything derived from their genres
//! - [`playback`], [`recommendations`] - what is playing and what to play next
//! - [`search`], [`album`] - catalog search and album details
//! - [`cache_stats`] - content of the persistent genre cache
//!
//! Commands terminate the program with [`crate::error!`] when they cannot do
//! anything useful (no token, Spotify unreachable for the main request) and
//! report partial results otherwise.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, spotify::SpotifyClient};

mod auth;
mod cache;
mod catalog;
mod library;
mod player;
mod playlists;

pub use auth::auth;
pub use cache::cache_stats;
pub use catalog::album;
pub use catalog::search;
pub use library::duplicates;
pub use library::genre_playlists;
pub use library::genres;
pub use library::liked;
pub use library::stats;
pub use player::playback;
pub use player::recommendations;
pub use playlists::import_playlist;
pub use playlists::list_playlists;
pub use playlists::show_playlist;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) async fn connect() -> SpotifyClient {
    match SpotifyClient::from_config().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    }
}
