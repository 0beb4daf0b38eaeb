//! Artist genre resolution and track enrichment.
//!
//! Spotify only attaches genres to artists, so a track's genres are the
//! genres of its primary artist (`artists[0]`). The [`GenreResolver`] looks
//! artists up through the persistent [`crate::management::GenreCache`] and
//! [`enrich_tracks`] writes the result onto copies of the given records.
//!
//! ```text
//! records ──> enrich_tracks ──(distinct artist)──> GenreResolver ──miss──> SpotifyApi::get_artist
//!                  │                                    │
//!                  └──── GenreStore::load (once) ───────┴── GenreStore::save (every miss)
//! ```

mod enrich;
mod resolver;

pub use enrich::RecordError;
pub use enrich::enrich_tracks;
pub use resolver::GenreResolver;
pub use resolver::Lookup;
