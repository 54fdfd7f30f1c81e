use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::AppError;
use crate::generator::HistoryLedger;

/// Every instance reads and writes this single key.
pub const STORAGE_KEY: &str = "randomGeneratorData";

/// The stored blob. Missing or `null` fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub total_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub sum_values: i128,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    pub last_time: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PersistedState {
    pub fn capture(
        ledger: &HistoryLedger,
        min_value: Option<String>,
        max_value: Option<String>,
        last_time: Option<String>,
    ) -> Self {
        Self {
            history: ledger.history().to_vec(),
            total_count: ledger.total_count(),
            sum_values: ledger.sum_values(),
            min_value,
            max_value,
            last_time,
        }
    }
}

// --- Key-value storage ---
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;
}

pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    #[instrument(skip(self))]
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(key, value).await?;
        Ok(())
    }
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// --- Bridge ---
/// Reads and writes the generator state blob.
///
/// Persistence is best effort: failures are logged here and never reach the
/// caller.
#[derive(Clone)]
pub struct PersistenceBridge {
    store: Arc<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    #[instrument(skip_all)]
    pub async fn save(&self, state: &PersistedState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize generator state");
                return;
            }
        };

        if let Err(e) = self.store.set(STORAGE_KEY, json).await {
            tracing::error!(error = %e, "Failed to persist generator state");
        }
    }

    #[instrument(skip_all)]
    pub async fn load(&self) -> PersistedState {
        let raw = match self.store.get(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return PersistedState::default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read generator state, starting empty");
                return PersistedState::default();
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) => {
                tracing::info!(total_count = state.total_count, "Restored generator state");
                state
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding malformed generator state");
                PersistedState::default()
            }
        }
    }
}
