use tabled::{Table, Tabled};

use crate::{
    error, genres, info, library, management::GenreStore, types::TrackRecord, utils, warning,
};

use super::{connect, spinner};

#[derive(Tabled)]
struct RecommendationTableRow {
    name: String,
    artist: String,
    album: String,
}

pub async fn playback() {
    let client = connect().await;

    let now = library::get_now_playing(&client).await;
    if now.playback.is_none() && now.currently_playing.is_none() {
        info!("Nothing is playing right now.");
        return;
    }

    let Some(item) = now.track().cloned() else {
        info!("Playing something that is not a track.");
        return;
    };

    let store = GenreStore::from_config();
    let enriched = genres::enrich_tracks(&client, &store, &[TrackRecord::from(item)]).await;
    let Some(track) = enriched.into_iter().next().and_then(TrackRecord::into_track) else {
        return;
    };

    let artists = track
        .artists
        .iter()
        .map(|a| a.name.clone())
        .collect::<Vec<_>>()
        .join(", ");
    let state = if now.is_playing() { "Playing" } else { "Paused" };
    let progress = now.progress_ms().map(format_ms).unwrap_or_default();

    info!("{}: {} - {} {}", state, artists, track.name, progress);
    if let Some(device) = now.playback.as_ref().and_then(|p| p.device.as_ref()) {
        println!("Device: {}", device.name);
    }
    if let Some(album) = &track.album {
        println!("Album: {}", album.name);
    }
    if !track.primary_genres().is_empty() {
        println!("Genres: {}", utils::join_genres(track.primary_genres(), 5));
    }
}

pub async fn recommendations(limit: u32) {
    let client = connect().await;

    let pb = spinner("Fetching recommendations...");
    let result = library::get_smart_recommendations(&client, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(recommendations) if recommendations.is_empty() => {
            warning!("Like a few songs first, there is nothing to seed recommendations with.")
        }
        Ok(recommendations) => {
            let rows: Vec<RecommendationTableRow> = recommendations
                .into_iter()
                .map(|r| RecommendationTableRow {
                    name: r.name,
                    artist: r.artist,
                    album: r.album,
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => error!("Failed to fetch recommendations: {}", e),
    }
}

fn format_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("[{}:{:02}]", secs / 60, secs % 60)
}
