use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    fetch, genres,
    management::GenreStore,
    spotify::SpotifyApi,
    types::{Track, TrackRecord},
    utils,
};

const TOP_N: usize = 10;

/// Release period the statistics are restricted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    #[default]
    All,
    Year,
    Month,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "year" => Ok(Period::Year),
            "month" => Ok(Period::Month),
            other => Err(format!(
                "unknown period '{}', expected all, year or month",
                other
            )),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::All => "all",
            Period::Year => "year",
            Period::Month => "month",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SongStatistics {
    pub top_artists: Vec<(String, usize)>,
    pub top_genres: Vec<(String, usize)>,
    pub top_tracks: Vec<(String, usize)>,
}

/// Top artists, primary-artist genres and track names over `records`.
///
/// `Year` keeps tracks released in the year of `today`, `Month` additionally
/// requires the release month when the date has one. Tracks without a
/// parseable release year are always counted.
pub fn song_statistics(records: &[TrackRecord], period: Period, today: NaiveDate) -> SongStatistics {
    let tracks: Vec<&Track> = records
        .iter()
        .filter_map(TrackRecord::track)
        .filter(|t| in_period(t, period, today))
        .collect();

    let artists = tracks
        .iter()
        .flat_map(|t| t.artists.iter().map(|a| a.name.clone()));
    let genres = tracks
        .iter()
        .flat_map(|t| t.primary_genres().iter().cloned());
    let names = tracks.iter().map(|t| t.name.clone());

    SongStatistics {
        top_artists: utils::most_common(artists, TOP_N),
        top_genres: utils::most_common(genres, TOP_N),
        top_tracks: utils::most_common(names, TOP_N),
    }
}

fn in_period(track: &Track, period: Period, today: NaiveDate) -> bool {
    if period == Period::All {
        return true;
    }

    let (year, month) = track
        .release_date()
        .map(utils::release_year_month)
        .unwrap_or((None, None));

    let Some(year) = year else {
        return true;
    };
    if year != today.year() {
        return false;
    }

    match (period, month) {
        (Period::Month, Some(month)) => month == today.month(),
        _ => true,
    }
}

/// [`song_statistics`] over the enriched liked songs library, relative to today.
pub async fn get_song_statistics(
    api: &dyn SpotifyApi,
    store: &GenreStore,
    period: Period,
) -> SongStatistics {
    let songs = fetch::get_liked_songs(api, None).await;
    let enriched = genres::enrich_tracks(api, store, &songs).await;
    song_statistics(&enriched, period, Utc::now().date_naive())
}
