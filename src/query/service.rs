//! Track query operations on top of a [`TrackStore`].

use crate::track_store::{Track, TrackFilter, TrackId, TrackStore};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("track not found")]
    NotFound,

    #[error("no track matched the filter")]
    NoMatch,

    #[error("malformed track id: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Read-only queries over the track collection.
///
/// Store calls are blocking, so every operation runs on the blocking pool.
#[derive(Clone)]
pub struct TrackQueryService {
    store: Arc<dyn TrackStore>,
}

impl TrackQueryService {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        TrackQueryService { store }
    }

    async fn with_store<T, F>(&self, f: F) -> QueryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn TrackStore) -> QueryResult<T> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| QueryError::Store(anyhow::anyhow!("Store task failed: {}", e)))?
    }

    /// Tracks whose name and artist contain the given substrings.
    /// `None` or an empty string leaves that field unconstrained.
    pub async fn list_tracks(
        &self,
        track_name: Option<String>,
        artist_name: Option<String>,
    ) -> QueryResult<Vec<Track>> {
        let filter = TrackFilter {
            track_name,
            artist_name,
            genre: None,
        };
        self.with_store(move |store| non_empty(store.find_by_filter(&filter)?))
            .await
    }

    pub async fn get_track(&self, id: &str) -> QueryResult<Track> {
        let id = TrackId::parse(id)?;
        self.with_store(move |store| store.find_by_id(&id)?.ok_or(QueryError::NotFound))
            .await
    }

    /// All tracks, most popular first. Equal popularity keeps store order.
    pub async fn tracks_by_popularity(&self) -> QueryResult<Vec<Track>> {
        self.with_store(|store| {
            let mut tracks = store.find_all()?;
            sort_by_popularity(&mut tracks);
            Ok(tracks)
        })
        .await
    }

    pub async fn distinct_artists(&self) -> QueryResult<Vec<String>> {
        self.with_store(|store| Ok(distinct(store.find_all()?, |t| t.record.artist_name)))
            .await
    }

    pub async fn distinct_genres(&self) -> QueryResult<Vec<String>> {
        self.with_store(|store| Ok(distinct(store.find_all()?, |t| t.record.genre)))
            .await
    }

    pub async fn tracks_by_artist(&self, artist_name: String) -> QueryResult<Vec<Track>> {
        let filter = TrackFilter::by_artist(artist_name);
        self.with_store(move |store| non_empty(store.find_by_filter(&filter)?))
            .await
    }

    pub async fn tracks_by_genre(&self, genre: String) -> QueryResult<Vec<Track>> {
        let filter = TrackFilter::by_genre(genre);
        self.with_store(move |store| non_empty(store.find_by_filter(&filter)?))
            .await
    }
}

fn non_empty(tracks: Vec<Track>) -> QueryResult<Vec<Track>> {
    if tracks.is_empty() {
        debug!("Query matched no tracks");
        return Err(QueryError::NoMatch);
    }
    Ok(tracks)
}

fn sort_by_popularity(tracks: &mut [Track]) {
    // sort_by is stable, so ties keep their store order.
    tracks.sort_by(|a, b| b.record.popularity.total_cmp(&a.record.popularity));
}

/// Projects one field of each track, keeping the first occurrence of each value.
fn distinct<F>(tracks: Vec<Track>, project: F) -> Vec<String>
where
    F: Fn(Track) -> String,
{
    let mut seen = HashSet::new();
    tracks
        .into_iter()
        .map(project)
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
