//! Top Music API library
//!
//! Read-only HTTP API over a dataset of popular music tracks. The binaries
//! and the end-to-end tests build on these modules.

pub mod config;
pub mod query;
pub mod seed;
pub mod server;
pub mod sqlite_persistence;
pub mod track_store;

pub use query::{QueryError, TrackQueryService};
pub use server::{run_server, RequestsLoggingLevel, StoreSlot};
pub use track_store::{SqliteTrackStore, Track, TrackStore};
