pub mod config;
pub mod data;
pub mod error;
pub mod generator;
pub mod handlers;
pub mod persistence;
pub mod state;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::generator::{GeneratorState, SystemClock};
use crate::handlers::{rest, ws};
use crate::persistence::{KeyValueStore, MemoryStore, PersistenceBridge, RedisStore};
use crate::state::{AppState, SharedState};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Opens storage, restores the saved state and builds the router.
pub async fn create_app(config: Config) -> Result<Router, AppError> {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Redis => {
            let client = redis::Client::open(config.storage.redis_url.clone())?;
            Arc::new(RedisStore::new(client))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };

    let persistence = PersistenceBridge::new(store);
    let generator = GeneratorState::from_persisted(persistence.load().await);
    let state = Arc::new(AppState::new(generator, persistence, Arc::new(SystemClock), config));

    Ok(create_router(state))
}

pub fn create_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/state", get(rest::get_state_handler))
        .route("/generate", post(rest::generate_handler))
        .route("/clear", post(rest::clear_handler))
        .route("/ws", get(ws::websocket_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default().include_headers(true)))
        .layer(cors)
}
