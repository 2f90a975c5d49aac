use super::{ServerConfig, StoreSlot};
use axum::extract::FromRef;
use std::time::Instant;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub store_slot: StoreSlot,
}

impl ServerState {
    pub fn new(config: ServerConfig, store_slot: StoreSlot) -> Self {
        ServerState {
            config,
            start_time: Instant::now(),
            store_slot,
        }
    }
}

impl FromRef<ServerState> for StoreSlot {
    fn from_ref(input: &ServerState) -> Self {
        input.store_slot.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
