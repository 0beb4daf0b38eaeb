use tabled::Table;

use crate::{
    fetch, genres as genre_enrichment, info,
    library::{self, Period},
    management::GenreStore,
    success,
    types::CountTableRow,
    warning,
};

use super::{connect, playlists::track_rows, spinner};

/// Lists liked songs with genres, optionally only those matching `genre`.
pub async fn liked(limit: Option<usize>, genre: Option<String>) {
    let client = connect().await;
    let store = GenreStore::from_config();

    let pb = spinner("Fetching liked songs...");
    let songs = fetch::get_liked_songs(&client, limit).await;
    pb.set_message("Resolving artist genres...");
    let mut enriched = genre_enrichment::enrich_tracks(&client, &store, &songs).await;
    pb.finish_and_clear();

    if let Some(genre) = genre {
        enriched = library::filter_by_genre(&enriched, &genre);
        info!("{} liked songs matching '{}'", enriched.len(), genre);
    } else {
        info!("{} liked songs", enriched.len());
    }

    println!("{}", Table::new(track_rows(&enriched)));
}

pub async fn genres() {
    let client = connect().await;
    let store = GenreStore::from_config();

    let pb = spinner("Collecting genres of your liked songs...");
    let all = library::get_available_genres(&client, &store).await;
    pb.finish_and_clear();

    if all.is_empty() {
        warning!("No genres found.");
        return;
    }

    for genre in &all {
        println!("{}", genre);
    }
    info!("{} genres", all.len());
}

pub async fn genre_playlists(filter: Option<String>) {
    let client = connect().await;
    let store = GenreStore::from_config();

    let pb = spinner("Creating genre playlists...");
    let report = library::create_genre_playlists(&client, &store, filter.as_deref()).await;
    pb.finish_and_clear();

    for playlist in &report.playlists {
        success!("{} ({} tracks)", playlist.name, playlist.track_count);
    }
    info!(
        "Created {} playlists out of {} genres",
        report.playlists_created, report.total_genres
    );
}

pub async fn duplicates(merge: bool) {
    let client = connect().await;

    let pb = spinner("Looking for duplicate liked songs...");
    let groups = library::detect_duplicate_liked_songs(&client).await;
    pb.finish_and_clear();

    if groups.is_empty() {
        success!("No duplicates found.");
        return;
    }

    let rows: Vec<CountTableRow> = groups
        .iter()
        .map(|g| CountTableRow {
            name: format!("{} - {}", g.artist_name, g.track_name),
            count: g.duplicate_count,
        })
        .collect();
    println!("{}", Table::new(rows));

    if !merge {
        info!("Found {} sets of duplicates. Run with --merge to remove them.", groups.len());
        return;
    }

    let pb = spinner("Removing duplicates...");
    let report = library::merge_duplicates(&client, &groups).await;
    pb.finish_and_clear();

    success!(
        "Removed {} tracks from {} duplicate groups",
        report.tracks_removed,
        report.duplicate_groups_processed
    );
}

pub async fn stats(period: Period) {
    let client = connect().await;
    let store = GenreStore::from_config();

    let pb = spinner("Collecting statistics...");
    let stats = library::get_song_statistics(&client, &store, period).await;
    pb.finish_and_clear();

    let sections = [
        ("Top artists", stats.top_artists),
        ("Top genres", stats.top_genres),
        ("Top tracks", stats.top_tracks),
    ];

    for (title, counts) in sections {
        let rows: Vec<CountTableRow> = counts
            .into_iter()
            .map(|(name, count)| CountTableRow { name, count })
            .collect();
        println!("{title} ({period})\n{table}\n", table = Table::new(rows));
    }
}
