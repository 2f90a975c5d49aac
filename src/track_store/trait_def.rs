//! TrackStore trait definition.

use super::filter::TrackFilter;
use super::models::{Track, TrackId, TrackRecord};
use anyhow::Result;

/// Storage backend for tracks.
///
/// Reads return tracks in insertion order. Writing is limited to
/// [`TrackStore::replace_all`], which the seed operation uses.
pub trait TrackStore: Send + Sync {
    /// Every track in the store.
    fn find_all(&self) -> Result<Vec<Track>>;

    /// The track with the given id, or `None` if there is none.
    fn find_by_id(&self, id: &TrackId) -> Result<Option<Track>>;

    /// Tracks matching every field set in `filter`.
    fn find_by_filter(&self, filter: &TrackFilter) -> Result<Vec<Track>>;

    /// Deletes every track and inserts `records` with fresh ids, atomically.
    /// Returns the number of inserted tracks.
    fn replace_all(&self, records: &[TrackRecord]) -> Result<usize>;

    /// Number of tracks in the store.
    fn count(&self) -> Result<usize>;
}
