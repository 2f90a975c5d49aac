pub mod config;
mod error;
mod http_layers;
mod readiness;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use http_layers::*;
pub use readiness::StoreSlot;
pub use server::{make_app, run_server};
