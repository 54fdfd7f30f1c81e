use axum::{extract::State, Json};
use tracing::instrument;

use crate::{
    data::{GenerateRequest, GenerateResponse},
    error::AppError,
    generator::{Range, Snapshot},
    state::SharedState,
};

// ==============================================================================
// === REST API Handlers
// =============================================================================

#[instrument(skip(state))]
pub async fn get_state_handler(State(state): State<SharedState>) -> Json<Snapshot> {
    Json(state.snapshot().await)
}

#[instrument(skip(state))]
pub async fn generate_handler(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let range = Range::new(payload.min, payload.max)?;
    let (value, snapshot) = state.generate(range).await?;
    Ok(Json(GenerateResponse { value, snapshot }))
}

#[instrument(skip(state))]
pub async fn clear_handler(State(state): State<SharedState>) -> Json<Snapshot> {
    Json(state.clear().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GeneratorConfig, LoggingConfig, ServerConfig, StorageBackend, StorageConfig};
    use crate::generator::{clock::testing::FixedClock, GeneratorError, GeneratorState};
    use crate::persistence::{MemoryStore, PersistenceBridge};
    use crate::state::AppState;
    use std::sync::Arc;

    fn setup_test_state() -> SharedState {
        let config = Config {
            server: ServerConfig { addr: "0.0.0.0:0".to_string() },
            storage: StorageConfig { backend: StorageBackend::Memory, redis_url: "redis://mock".to_string() },
            logging: LoggingConfig { level: "debug".to_string() },
            generator: GeneratorConfig::default(),
        };
        let persistence = PersistenceBridge::new(Arc::new(MemoryStore::new()));

        Arc::new(AppState::new(
            GeneratorState::default(),
            persistence,
            Arc::new(FixedClock::at(10, 15)),
            config,
        ))
    }

    #[tokio::test]
    async fn test_generate_handler_records_and_persists() {
        let state = setup_test_state();

        let Json(response) = generate_handler(State(state.clone()), Json(GenerateRequest { min: 1, max: 6 }))
            .await
            .unwrap();

        assert!((1..=6).contains(&response.value));
        assert_eq!(response.snapshot.history, vec![response.value]);
        assert_eq!(response.snapshot.total_count, 1);
        assert_eq!(response.snapshot.last_time.as_deref(), Some("10:15"));

        let stored = state.persistence.load().await;
        assert_eq!(stored.history, vec![response.value]);
        assert_eq!(stored.min_value.as_deref(), Some("1"));
        assert_eq!(stored.max_value.as_deref(), Some("6"));
        assert_eq!(stored.last_time.as_deref(), Some("10:15"));
    }

    #[tokio::test]
    async fn test_generate_handler_rejects_invalid_range() {
        let state = setup_test_state();

        let result = generate_handler(State(state.clone()), Json(GenerateRequest { min: 10, max: 10 })).await;

        match result {
            Err(AppError::Generator(GeneratorError::InvalidRange { min, max })) => {
                assert_eq!((min, max), (10, 10));
            }
            other => panic!("Expected invalid range error, got {:?}", other.map(|_| ())),
        }
        assert_eq!(state.snapshot().await.total_count, 0);
        assert_eq!(state.persistence.load().await, Default::default());
    }

    #[tokio::test]
    async fn test_clear_handler_resets_statistics() {
        let state = setup_test_state();
        for _ in 0..3 {
            generate_handler(State(state.clone()), Json(GenerateRequest { min: 0, max: 9 }))
                .await
                .unwrap();
        }

        let Json(snapshot) = clear_handler(State(state.clone())).await;

        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.total_count, 0);
        assert_eq!(snapshot.average, 0);
        assert_eq!(state.persistence.load().await.total_count, 0);
    }

    #[tokio::test]
    async fn test_generate_publishes_snapshot() {
        let state = setup_test_state();
        let mut updates = state.updates.subscribe();

        let Json(response) = generate_handler(State(state.clone()), Json(GenerateRequest { min: -5, max: 5 }))
            .await
            .unwrap();

        let published = updates.recv().await.unwrap();
        assert_eq!(published, response.snapshot);
    }
}
