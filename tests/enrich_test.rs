mod common;

use common::{MockSpotify, artist, genres_of, liked, strings, track};
use spordash::{
    genres::{GenreResolver, Lookup, enrich_tracks},
    management::{GenreCache, GenreStore},
    types::{Track, TrackItem, TrackRecord},
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> GenreStore {
    GenreStore::new(dir.path().join("genre_cache.json"))
}

#[tokio::test]
async fn test_first_lookup_is_cached_and_reused() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new().with_artist("A1", &["indie rock", "dream pop"]);
    assert!(store.load().await.is_empty());

    let first = enrich_tracks(&api, &store, &[liked(track("t1", "Song", "A1", "Band"))]).await;

    assert_eq!(
        genres_of(&first[0]),
        Some(strings(&["indie rock", "dream pop"]))
    );
    assert_eq!(
        store.load().await.get("A1"),
        Some(&strings(&["indie rock", "dream pop"]))
    );
    assert_eq!(api.artist_calls(), vec!["A1"]);

    let second = enrich_tracks(&api, &store, &[liked(track("t2", "Other", "A1", "Band"))]).await;

    assert_eq!(api.artist_calls().len(), 1);
    assert_eq!(
        genres_of(&second[0]),
        Some(strings(&["indie rock", "dream pop"]))
    );
}

#[tokio::test]
async fn test_failed_lookup_is_negatively_cached() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new().with_failing_artist("A2");
    let records = vec![liked(track("t1", "Song", "A2", "Band"))];

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(genres_of(&enriched[0]), Some(Vec::new()));
    assert_eq!(store.load().await.get("A2"), Some(&Vec::new()));

    let again = enrich_tracks(&api, &store, &records).await;
    assert_eq!(genres_of(&again[0]), Some(Vec::new()));
    assert_eq!(api.artist_calls(), vec!["A2"]);
}

#[tokio::test]
async fn test_cached_empty_list_is_a_hit() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let mut cache = GenreCache::new();
    cache.insert("A3", Vec::new());
    store.save(&cache).await;
    let api = MockSpotify::new().with_artist("A3", &["should not be asked"]);

    let enriched = enrich_tracks(&api, &store, &[liked(track("t1", "Song", "A3", "Band"))]).await;

    assert_eq!(genres_of(&enriched[0]), Some(Vec::new()));
    assert!(api.artist_calls().is_empty());
}

#[tokio::test]
async fn test_artist_repeated_in_batch_is_looked_up_once() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new()
        .with_artist("A1", &["shoegaze"])
        .with_artist("B1", &["techno"]);
    let records = vec![
        liked(track("t1", "One", "A1", "Band")),
        liked(track("t2", "Two", "B1", "Producer")),
        liked(track("t3", "Three", "A1", "Band")),
    ];

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(api.artist_calls(), vec!["A1", "B1"]);
    assert_eq!(genres_of(&enriched[2]), Some(strings(&["shoegaze"])));
    assert_eq!(store.load().await.len(), 2);
}

#[tokio::test]
async fn test_order_and_length_preserved() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new()
        .with_artist("A1", &["folk"])
        .with_failing_artist("A2");
    let records = vec![
        liked(track("t1", "One", "A1", "Band")),
        TrackRecord::Wrapped(TrackItem::default()),
        liked(track("t2", "Two", "A2", "Other")),
        TrackRecord::from(track("t3", "Three", "A9", "Unknown")),
    ];

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(enriched.len(), records.len());
    let names: Vec<Option<&str>> = enriched
        .iter()
        .map(|r| r.track().map(|t| t.name.as_str()))
        .collect();
    assert_eq!(names, vec![Some("One"), None, Some("Two"), Some("Three")]);
}

#[tokio::test]
async fn test_records_without_track_or_artists_are_copied_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new();
    let no_artists = Track {
        id: Some("t1".to_string()),
        name: "Interlude".to_string(),
        ..Default::default()
    };
    let records = vec![
        TrackRecord::Wrapped(TrackItem {
            track: None,
            added_at: Some("2024-01-01T00:00:00Z".to_string()),
        }),
        liked(no_artists.clone()),
        TrackRecord::Bare(no_artists),
    ];

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(enriched, records);
    assert!(api.artist_calls().is_empty());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_missing_artist_id_does_not_stop_the_batch() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new().with_artist("A1", &["post-punk"]);
    let mut local_file = track("t0", "Local", "unused", "Someone");
    local_file.artists = vec![artist(None, "Someone")];
    let mut blank_id = track("t1", "Blank", "unused", "Someone else");
    blank_id.artists = vec![artist(Some("  "), "Someone else")];

    let records = vec![
        liked(local_file),
        liked(blank_id),
        liked(track("t2", "Next", "A1", "Band")),
    ];

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(genres_of(&enriched[0]), Some(Vec::new()));
    assert_eq!(genres_of(&enriched[1]), Some(Vec::new()));
    assert_eq!(genres_of(&enriched[2]), Some(strings(&["post-punk"])));
    assert_eq!(api.artist_calls(), vec!["A1"]);
}

#[tokio::test]
async fn test_only_primary_artist_is_enriched() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new()
        .with_artist("A1", &["house"])
        .with_artist("F1", &["pop"]);
    let mut collab = track("t1", "Collab", "A1", "Main");
    collab.artists.push(artist(Some("F1"), "Featured"));

    let enriched = enrich_tracks(&api, &store, &[liked(collab)]).await;

    let track = enriched[0].track().unwrap();
    assert_eq!(track.artists[0].genres, Some(strings(&["house"])));
    assert_eq!(track.artists[1].genres, None);
    assert_eq!(api.artist_calls(), vec!["A1"]);
}

#[tokio::test]
async fn test_shape_is_preserved_and_input_untouched() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new().with_artist("A1", &["grunge"]);
    let records = vec![
        liked(track("t1", "Wrapped", "A1", "Band")),
        TrackRecord::from(track("t2", "Bare", "A1", "Band")),
    ];
    let before = records.clone();

    let enriched = enrich_tracks(&api, &store, &records).await;

    assert_eq!(records, before);
    assert!(genres_of(&records[0]).is_none());
    assert!(enriched[0].is_wrapped());
    assert!(!enriched[1].is_wrapped());

    let json = serde_json::to_value(&enriched).unwrap();
    assert_eq!(json[0]["track"]["artists"][0]["genres"], serde_json::json!(["grunge"]));
    assert_eq!(json[1]["artists"][0]["genres"], serde_json::json!(["grunge"]));
}

#[tokio::test]
async fn test_empty_batch() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new();

    assert!(enrich_tracks(&api, &store, &[]).await.is_empty());
    assert!(api.artist_calls().is_empty());
}

#[tokio::test]
async fn test_resolver_writes_through() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new().with_artist("A1", &["ambient"]);
    let resolver = GenreResolver::new(&api, &store);
    let mut cache = store.load().await;

    assert_eq!(resolver.resolve("A1", &mut cache).await, strings(&["ambient"]));
    assert_eq!(resolver.resolve("A1", &mut cache).await, strings(&["ambient"]));

    assert_eq!(api.artist_calls().len(), 1);
    assert_eq!(store.load().await, cache);
}

#[tokio::test]
async fn test_lookup_upstream_reports_failure() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let api = MockSpotify::new()
        .with_artist("A1", &["ska"])
        .with_failing_artist("A2");
    let resolver = GenreResolver::new(&api, &store);

    assert!(matches!(
        resolver.lookup_upstream("A1").await,
        Lookup::Fetched(genres) if genres == strings(&["ska"])
    ));
    assert!(matches!(
        resolver.lookup_upstream("A2").await,
        Lookup::Failed(_)
    ));
    assert!(matches!(
        resolver.lookup_upstream("missing").await,
        Lookup::Failed(_)
    ));
    // lookups alone never touch the store
    assert!(!store.path().exists());
}
