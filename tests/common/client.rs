//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per API route.
//! When API routes change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET /tracks with optional `trackname` and `artist` filters
    pub async fn get_tracks(&self, trackname: Option<&str>, artist: Option<&str>) -> Response {
        let mut query = Vec::new();
        if let Some(trackname) = trackname {
            query.push(("trackname", trackname));
        }
        if let Some(artist) = artist {
            query.push(("artist", artist));
        }
        self.client
            .get(format!("{}/tracks", self.base_url))
            .query(&query)
            .send()
            .await
            .expect("Get tracks request failed")
    }

    /// GET /tracks/popularity
    pub async fn get_tracks_by_popularity(&self) -> Response {
        self.get("/tracks/popularity").await
    }

    /// GET /tracks/{id}
    pub async fn get_track(&self, id: &str) -> Response {
        self.get(&format!("/tracks/{}", id)).await
    }

    /// GET /artists
    pub async fn get_artists(&self) -> Response {
        self.get("/artists").await
    }

    /// GET /artists/artist/{artist}
    pub async fn get_tracks_by_artist(&self, artist: &str) -> Response {
        self.get(&format!("/artists/artist/{}", artist)).await
    }

    /// GET /genres
    pub async fn get_genres(&self) -> Response {
        self.get("/genres").await
    }

    /// GET /genres/{genre}/artists
    pub async fn get_tracks_by_genre(&self, genre: &str) -> Response {
        self.get(&format!("/genres/{}/artists", genre)).await
    }
}
