//! Gate that keeps the API answering 503 until the track store is open.

use super::{state::ServerState, ApiError};
use crate::query::TrackQueryService;
use crate::track_store::TrackStore;
use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::{Arc, OnceLock};

/// Holds the track store once it has been opened. Filled at most once.
#[derive(Clone, Default)]
pub struct StoreSlot {
    inner: Arc<OnceLock<Arc<dyn TrackStore>>>,
}

impl StoreSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(store: Arc<dyn TrackStore>) -> Self {
        let slot = Self::new();
        let _ = slot.inner.set(store);
        slot
    }

    /// Returns false if the slot was already filled.
    pub fn fill(&self, store: Arc<dyn TrackStore>) -> bool {
        self.inner.set(store).is_ok()
    }

    pub fn get(&self) -> Option<Arc<dyn TrackStore>> {
        self.inner.get().cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.inner.get().is_some()
    }
}

pub async fn require_ready_store(
    State(slot): State<StoreSlot>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !slot.is_ready() {
        return ApiError::ServiceUnavailable.into_response();
    }
    next.run(request).await
}

/// Extracts a query service over the opened store.
pub struct ReadyTracks(pub TrackQueryService);

impl FromRequestParts<ServerState> for ReadyTracks {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        ctx.store_slot
            .get()
            .map(|store| ReadyTracks(TrackQueryService::new(store)))
            .ok_or(ApiError::ServiceUnavailable)
    }
}
