mod service;

pub use service::{QueryError, QueryResult, TrackQueryService};
