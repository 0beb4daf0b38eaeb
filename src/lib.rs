//! Spotify Library Dashboard Library
//!
//! This library provides the building blocks of `spordash`: a Spotify client,
//! a persistent artist genre cache and the enrichment pipeline that attaches
//! genres to tracks, plus the library utilities built on top of enriched tracks
//! (duplicate detection, statistics, genre playlists, import/export).
//!
//! # Layout
//!
//! - `api` - `/callback` and `/health` handlers of the login server
//! - `cli` - One function per subcommand, rendering tables and status lines
//! - `config` - `.env` loading, paths and Spotify settings
//! - `fetch` - Pagination helpers that collect every page of a listing
//! - `genres` - Artist genre resolution and track enrichment
//! - `library` - Features working on enriched tracks
//! - `management` - Persistent caches (genres, token)
//! - `server` - axum server that receives the OAuth redirect
//! - `spotify` - `SpotifyApi` trait, its reqwest client and the PKCE flow
//! - `types` - serde model of Spotify objects and table rows
//! - `utils` - PKCE, counting and formatting helpers
//!
//! # Example
//!
//! ```
//! use spordash::{config, fetch, genres, management::GenreStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spordash::Res<()> {
//!     config::load_env().await?;
//!     let client = SpotifyClient::from_config().await?;
//!     let store = GenreStore::from_config();
//!     let liked = fetch::get_liked_songs(&client, Some(20)).await;
//!     let enriched = genres::enrich_tracks(&client, &store, &liked).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod genres;
pub mod library;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed-error result for the top-level plumbing (server, config loading).
///
/// The Spotify client and the genre store have their own error types, which
/// convert into this one with `?`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Status line with a blue `o` marker.
///
/// ```
/// info!("{} liked songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Status line with a green check mark, for completed actions.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints the message with a red `!` marker and exits with status 1.
///
/// Only the command layer calls this. Library code reports failures through
/// return values and the `log` facade.
///
/// ```
/// error!("Failed to load token. Please run spordash auth");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Status line with a yellow `!` marker for problems the command recovers from.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
