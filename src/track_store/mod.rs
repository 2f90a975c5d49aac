mod filter;
mod models;
mod schema;
mod store;
mod trait_def;

pub use filter::{TrackFilter, TrackMatcher};
pub use models::*;
pub use schema::TRACK_VERSIONED_SCHEMAS;
pub use store::SqliteTrackStore;
pub use trait_def::TrackStore;
