//! Dataset loading and the destructive reseed operation.

use crate::track_store::{TrackRecord, TrackStore};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// The dataset shipped with the server, used when no path is configured.
pub const BUNDLED_DATASET: &str = include_str!("../data/top-music.json");

#[derive(Clone, Debug)]
pub struct SeedOptions {
    /// Lower-case track name, artist name and genre before inserting.
    pub lowercase_text: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        SeedOptions {
            lowercase_text: true,
        }
    }
}

pub fn parse_dataset(json: &str) -> Result<Vec<TrackRecord>> {
    serde_json::from_str(json).context("Failed to parse track dataset")
}

/// Reads the dataset at `path`, or the bundled one when `path` is `None`.
pub fn load_dataset(path: Option<&Path>) -> Result<Vec<TrackRecord>> {
    match path {
        Some(path) => {
            info!("Loading track dataset from {:?}", path);
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read dataset file: {:?}", path))?;
            parse_dataset(&content).with_context(|| format!("Invalid dataset file: {:?}", path))
        }
        None => {
            info!("Loading bundled track dataset");
            parse_dataset(BUNDLED_DATASET)
        }
    }
}

/// Clears the store and inserts `records`.
///
/// Running it twice with the same input leaves the store with the same
/// tracks (under new ids).
pub fn reseed(
    store: &dyn TrackStore,
    mut records: Vec<TrackRecord>,
    options: &SeedOptions,
) -> Result<usize> {
    if options.lowercase_text {
        records.iter_mut().for_each(TrackRecord::lowercase_text);
    }
    let inserted = store.replace_all(&records)?;
    info!("Seeded {} tracks", inserted);
    Ok(inserted)
}
