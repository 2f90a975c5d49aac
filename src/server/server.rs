use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    middleware,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use super::readiness::{require_ready_store, ReadyTracks};
use super::{http_cache, log_requests, state::ServerState, ApiError, ServerConfig, StoreSlot};
use crate::track_store::Track;

pub const HOME_TEXT: &str = "Popular Music API";

#[derive(Serialize, Debug)]
struct ListResponse<T> {
    length: usize,
    data: Vec<T>,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        ListResponse {
            length: data.len(),
            data,
        }
    }
}

#[derive(Serialize, Debug)]
struct ItemResponse<T> {
    data: T,
}

#[derive(Deserialize, Debug, Default)]
struct TrackSearchParams {
    trackname: Option<String>,
    artist: Option<String>,
}

type ApiResult<T> = Result<Json<T>, ApiError>;

async fn home(State(state): State<ServerState>) -> &'static str {
    debug!("Uptime {:?}", state.start_time.elapsed());
    HOME_TEXT
}

async fn get_tracks(
    ReadyTracks(tracks): ReadyTracks,
    params: Result<Query<TrackSearchParams>, QueryRejection>,
) -> ApiResult<ListResponse<Track>> {
    let Query(params) = params.map_err(|rejection| {
        debug!("Rejecting query string: {}", rejection);
        ApiError::InvalidRequest
    })?;
    let found = tracks.list_tracks(params.trackname, params.artist).await?;
    Ok(Json(found.into()))
}

async fn get_tracks_by_popularity(
    ReadyTracks(tracks): ReadyTracks,
) -> ApiResult<ListResponse<Track>> {
    Ok(Json(tracks.tracks_by_popularity().await?.into()))
}

async fn get_track(
    ReadyTracks(tracks): ReadyTracks,
    Path(id): Path<String>,
) -> ApiResult<ItemResponse<Track>> {
    let data = tracks.get_track(&id).await?;
    Ok(Json(ItemResponse { data }))
}

async fn get_artists(ReadyTracks(tracks): ReadyTracks) -> ApiResult<ListResponse<String>> {
    Ok(Json(tracks.distinct_artists().await?.into()))
}

async fn get_tracks_by_artist(
    ReadyTracks(tracks): ReadyTracks,
    Path(artist): Path<String>,
) -> ApiResult<ListResponse<Track>> {
    Ok(Json(tracks.tracks_by_artist(artist).await?.into()))
}

async fn get_genres(ReadyTracks(tracks): ReadyTracks) -> ApiResult<ListResponse<String>> {
    Ok(Json(tracks.distinct_genres().await?.into()))
}

async fn get_tracks_by_genre(
    ReadyTracks(tracks): ReadyTracks,
    Path(genre): Path<String>,
) -> ApiResult<ListResponse<Track>> {
    Ok(Json(tracks.tracks_by_genre(genre).await?.into()))
}

pub fn make_app(config: ServerConfig, store_slot: StoreSlot) -> Router {
    let state = ServerState::new(config.clone(), store_slot.clone());

    let content_routes: Router = Router::new()
        .route("/tracks", get(get_tracks))
        .route("/tracks/popularity", get(get_tracks_by_popularity))
        .route("/tracks/{id}", get(get_track))
        .route("/artists", get(get_artists))
        .route("/artists/artist/{artist}", get(get_tracks_by_artist))
        .route("/genres", get(get_genres))
        .route("/genres/{genre}/artists", get(get_tracks_by_genre))
        .layer(middleware::from_fn_with_state(
            config.content_cache_age_sec,
            http_cache,
        ))
        .with_state(state.clone());

    Router::new()
        .route("/", get(home))
        .with_state(state.clone())
        .merge(content_routes)
        .layer(middleware::from_fn_with_state(store_slot, require_ready_store))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn_with_state(state, log_requests))
}

/// Serves the API on `config.port`. Requests get 503 until `store_slot`
/// is filled.
pub async fn run_server(config: ServerConfig, store_slot: StoreSlot) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store_slot);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
