use crate::{info, management::GenreStore};

pub async fn cache_stats() {
    let store = GenreStore::from_config();
    let stats = store.stats().await;

    info!("Genre cache: {}", store.path().display());
    println!(
        "Artists: {total}\nWith genres: {with}\nWithout genres: {without}",
        total = stats.total_artists,
        with = stats.artists_with_genres,
        without = stats.artists_without_genres
    );
}
