use tabled::{Table, Tabled};

use crate::{
    error, info, library, management::GenreStore, types::SearchType, utils, warning,
};

use super::{connect, playlists::track_rows, spinner};

#[derive(Tabled)]
struct SearchTableRow {
    id: String,
    name: String,
    detail: String,
}

pub async fn search(query: String, search_type: SearchType, limit: u32) {
    let client = connect().await;

    let pb = spinner("Searching...");
    let result = library::search(&client, &query, search_type, limit).await;
    pb.finish_and_clear();

    let results = match result {
        Ok(results) => results,
        Err(e) => error!("Search error: {}", e),
    };

    if results.is_empty() {
        warning!("No {} found for \"{}\".", search_type, query.trim());
        return;
    }

    let rows: Vec<SearchTableRow> = library::search_hits(&results)
        .into_iter()
        .map(|hit| SearchTableRow {
            id: hit.id,
            name: hit.name,
            detail: hit.detail,
        })
        .collect();
    println!("{}", Table::new(rows));
}

/// Shows an album with the genres of its track artists.
pub async fn album(album_id: String) {
    let client = connect().await;
    let store = GenreStore::from_config();

    let pb = spinner("Fetching album...");
    let result = library::get_album_details(&client, &store, &album_id).await;
    pb.finish_and_clear();

    let details = match result {
        Ok(details) => details,
        Err(e) => error!("Cannot load album {}: {}", album_id, e),
    };
    let album = &details.album;

    let artists = album
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    info!("{} - {}", artists, album.name);
    if let Some(date) = &album.release_date {
        println!("Released: {}", date);
    }
    if let Some(label) = &album.label {
        println!("Label: {}", label);
    }
    if !album.genres.is_empty() {
        println!("Genres: {}", utils::join_genres(&album.genres, 5));
    }

    println!("{}", Table::new(track_rows(&details.tracks)));
}
