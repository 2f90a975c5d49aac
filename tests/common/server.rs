//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own track database.

use super::constants::*;
use super::fixtures::create_test_store;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use top_music_api::server::{make_app, RequestsLoggingLevel, ServerConfig, StoreSlot};
use top_music_api::track_store::SqliteTrackStore;

/// When dropped, the server shuts down and the temp database is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    #[allow(dead_code)]
    pub port: u16,

    /// Seeded store for direct access in tests
    #[allow(dead_code)]
    pub store: Arc<SqliteTrackStore>,

    store_slot: StoreSlot,
    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawns a server on a random port with the fixture tracks loaded, and
    /// waits until it answers successfully.
    pub async fn spawn() -> Self {
        let server = Self::spawn_loading().await;
        server.finish_loading();
        server.wait_for_ready().await;
        server
    }

    /// Spawns a server whose store has not been handed over yet, so every
    /// request is answered with 503 until [`TestServer::finish_loading`].
    pub async fn spawn_loading() -> Self {
        let (temp_dir, store) = create_test_store().expect("Failed to create test store");

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            content_cache_age_sec: CONTENT_CACHE_AGE_SEC,
        };
        let store_slot = StoreSlot::new();
        let app = make_app(config, store_slot.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        Self {
            base_url,
            port,
            store,
            store_slot,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Hands the seeded store to the running server.
    pub fn finish_loading(&self) {
        self.store_slot.fill(self.store.clone());
    }

    /// Polls `/` until it answers with a success status
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
