//! Test fixture creation for the track database

use super::constants::*;
use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use top_music_api::seed::{self, SeedOptions};
use top_music_api::track_store::SqliteTrackStore;

fn fixture_dataset() -> serde_json::Value {
    let track = |rank: i64, name: &str, artist: &str, genre: &str, bpm: f64, popularity: f64| {
        json!({
            "id": rank,
            "trackName": name,
            "artistName": artist,
            "genre": genre,
            "bpm": bpm,
            "energy": 60,
            "danceability": 70,
            "loudness": -5.5,
            "liveness": 10,
            "valence": 50,
            "length": 200,
            "acousticness": 20,
            "speechiness": 5,
            "popularity": popularity,
        })
    };

    json!([
        track(1, TRACK_SHAPE_OF_YOU, ARTIST_ED_SHEERAN, GENRE_POP, 96.0, 90.0),
        track(2, TRACK_BLINDING_LIGHTS, ARTIST_THE_WEEKND, GENRE_SYNTHWAVE, 171.0, 95.0),
        track(3, TRACK_BAD_GUY, ARTIST_BILLIE_EILISH, GENRE_ELECTROPOP, 135.0, 95.0),
        track(4, TRACK_PERFECT, ARTIST_ED_SHEERAN, GENRE_POP, 95.0, 85.0),
        track(5, TRACK_SAVE_YOUR_TEARS, ARTIST_THE_WEEKND, GENRE_SYNTHWAVE, 118.0, 88.0),
    ])
}

/// Creates a temporary track database seeded from a dataset file, keeping
/// the original case of the text fields.
/// Returns (temp_dir, store)
pub fn create_test_store() -> Result<(TempDir, Arc<SqliteTrackStore>)> {
    let dir = TempDir::new()?;

    let dataset_path = dir.path().join("dataset.json");
    std::fs::write(&dataset_path, serde_json::to_vec(&fixture_dataset())?)?;

    let store = SqliteTrackStore::new(dir.path().join("tracks.db"), 2)?;
    let records = seed::load_dataset(Some(&dataset_path))?;
    let options = SeedOptions {
        lowercase_text: false,
    };
    seed::reseed(&store, records, &options)?;

    Ok((dir, Arc::new(store)))
}
