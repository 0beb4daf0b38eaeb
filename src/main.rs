use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spordash::{
    cli, config,
    library::{Period, SEARCH_LIMIT},
    types::{PkceToken, SearchType},
    warning,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// List your playlists
    Playlists,

    /// Show the tracks of a playlist with their genres
    Playlist(PlaylistOptions),

    /// Create a playlist from an export file
    Import(ImportOptions),

    /// List liked songs with their genres
    Liked(LikedOptions),

    /// List all genres of your liked songs
    Genres,

    /// Create one playlist per genre of your liked songs
    GenrePlaylists(GenrePlaylistsOptions),

    /// Find duplicate liked songs
    Duplicates(DuplicatesOptions),

    /// Top artists, genres and tracks of your liked songs
    Stats(StatsOptions),

    /// Recommendations seeded from your recently liked songs
    Recommendations(RecommendationsOptions),

    /// Show what is playing right now
    Playback,

    /// Search the Spotify catalog
    Search(SearchOptions),

    /// Show an album with the genres of its tracks
    Album(AlbumOptions),

    /// Inspect the artist genre cache
    Cache(CacheOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    /// Spotify playlist id
    pub id: String,

    /// Show the genre breakdown instead of the track list
    #[clap(long)]
    pub genres: bool,

    /// Write the playlist to a JSON export file
    #[clap(long, value_name = "FILE")]
    pub export: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// Export file written by `playlist --export`
    pub file: String,

    /// Name of the new playlist, defaults to the exported name
    #[clap(long)]
    pub name: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct LikedOptions {
    /// Only fetch the most recent N liked songs
    #[clap(long)]
    pub limit: Option<usize>,

    /// Only show songs whose genres contain this text
    #[clap(long)]
    pub genre: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenrePlaylistsOptions {
    /// Only create playlists for genres containing this text
    #[clap(long)]
    pub filter: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct DuplicatesOptions {
    /// Remove every duplicate but the first from your liked songs
    #[clap(long)]
    pub merge: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Release period to include: all, year or month
    #[clap(long, default_value = "all")]
    pub period: Period,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendationsOptions {
    #[clap(long, default_value_t = 10)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Search text, several words are joined with spaces
    #[clap(required = true)]
    pub query: Vec<String>,

    /// What to search for: track, artist, album or playlist
    #[clap(long = "type", default_value = "track")]
    pub search_type: SearchType,

    #[clap(long, default_value_t = SEARCH_LIMIT)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumOptions {
    /// Spotify album id
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CacheOptions {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheSubcommand {
    /// Number of cached artists with and without genres
    Stats,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Playlists => cli::list_playlists().await,
        Command::Playlist(opt) => cli::show_playlist(opt.id, opt.genres, opt.export).await,
        Command::Import(opt) => cli::import_playlist(opt.file, opt.name).await,
        Command::Liked(opt) => cli::liked(opt.limit, opt.genre).await,
        Command::Genres => cli::genres().await,
        Command::GenrePlaylists(opt) => cli::genre_playlists(opt.filter).await,
        Command::Duplicates(opt) => cli::duplicates(opt.merge).await,
        Command::Stats(opt) => cli::stats(opt.period).await,
        Command::Recommendations(opt) => cli::recommendations(opt.limit).await,
        Command::Playback => cli::playback().await,
        Command::Search(opt) => {
            cli::search(opt.query.join(" "), opt.search_type, opt.limit).await
        }
        Command::Album(opt) => cli::album(opt.id).await,
        Command::Cache(opt) => match opt.command {
            CacheSubcommand::Stats => cli::cache_stats().await,
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
