use crate::query::QueryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Errors surfaced to HTTP clients. Bodies are fixed strings; the cause is
/// only ever logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("track not found")]
    NotFound,

    #[error("no match found")]
    NoMatch,

    #[error("invalid request")]
    InvalidRequest,

    #[error("service unavailable")]
    ServiceUnavailable,
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound => ApiError::NotFound,
            QueryError::NoMatch => ApiError::NoMatch,
            QueryError::InvalidId(e) => {
                debug!("Rejecting malformed track id: {}", e);
                ApiError::InvalidRequest
            }
            QueryError::Store(e) => {
                error!("Track store query failed: {:#}", e);
                ApiError::InvalidRequest
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Track not found" })),
            ApiError::NoMatch => (StatusCode::NOT_FOUND, json!({ "message": "No match found" })),
            ApiError::InvalidRequest => {
                (StatusCode::BAD_REQUEST, json!({ "error": "Invalid request" }))
            }
            ApiError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({ "error": "Service unavailable" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
