//! Track models shared by the store, the seed loader and the HTTP layer.
//!
//! Field names on the wire follow the dataset file (`trackName`, `bpm`,
//! `length`, ...), and the store-assigned identifier is exposed as `_id`.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store-assigned track identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
    pub fn generate() -> Self {
        TrackId(Uuid::new_v4())
    }

    /// Parses the textual form handed out by the API.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(TrackId)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// A track as it appears in the dataset, before the store assigns it an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRecord {
    /// The dataset's own numbering, carried through untouched.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<i64>,
    pub track_name: String,
    pub artist_name: String,
    pub genre: String,
    #[serde(default)]
    pub bpm: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub danceability: f64,
    #[serde(default)]
    pub loudness: f64,
    #[serde(default)]
    pub liveness: f64,
    #[serde(default)]
    pub valence: f64,
    #[serde(default)]
    pub length: f64,
    #[serde(default)]
    pub acousticness: f64,
    #[serde(default)]
    pub speechiness: f64,
    #[serde(default)]
    pub popularity: f64,
}

impl TrackRecord {
    /// Lower-cases the three text fields in place.
    pub fn lowercase_text(&mut self) {
        self.track_name = self.track_name.to_lowercase();
        self.artist_name = self.artist_name.to_lowercase();
        self.genre = self.genre.to_lowercase();
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(rename = "_id")]
    pub id: TrackId,
    #[serde(flatten)]
    pub record: TrackRecord,
}
