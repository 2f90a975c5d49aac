//! Case-insensitive substring filters over track records.
//!
//! User text is escaped before compiling, so `.` or `(` match literally
//! and no input can produce an invalid pattern. Anchors (`^`, `$`) and
//! other regex operators are not supported: `^bad` only matches text that
//! contains the characters `^bad`.

use super::models::TrackRecord;
use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Which fields to match and the substring each must contain.
/// A field left as `None`, or set to an empty string, matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackFilter {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub genre: Option<String>,
}

impl TrackFilter {
    pub fn by_artist<S: Into<String>>(artist_name: S) -> Self {
        TrackFilter {
            artist_name: Some(artist_name.into()),
            ..Default::default()
        }
    }

    pub fn by_genre<S: Into<String>>(genre: S) -> Self {
        TrackFilter {
            genre: Some(genre.into()),
            ..Default::default()
        }
    }

    pub fn compile(&self) -> Result<TrackMatcher> {
        Ok(TrackMatcher {
            track_name: compile_substring(self.track_name.as_deref())?,
            artist_name: compile_substring(self.artist_name.as_deref())?,
            genre: compile_substring(self.genre.as_deref())?,
        })
    }
}

fn compile_substring(needle: Option<&str>) -> Result<Option<Regex>> {
    match needle {
        None | Some("") => Ok(None),
        Some(needle) => RegexBuilder::new(&regex::escape(needle))
            .case_insensitive(true)
            .build()
            .map(Some)
            .with_context(|| format!("Failed to compile filter for {:?}", needle)),
    }
}

/// A compiled [`TrackFilter`].
pub struct TrackMatcher {
    track_name: Option<Regex>,
    artist_name: Option<Regex>,
    genre: Option<Regex>,
}

impl TrackMatcher {
    pub fn matches(&self, record: &TrackRecord) -> bool {
        field_matches(&self.track_name, &record.track_name)
            && field_matches(&self.artist_name, &record.artist_name)
            && field_matches(&self.genre, &record.genre)
    }
}

fn field_matches(regex: &Option<Regex>, value: &str) -> bool {
    regex.as_ref().map_or(true, |r| r.is_match(value))
}
