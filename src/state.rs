use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::config::Config;
use crate::error::AppError;
use crate::generator::{Clock, GeneratorState, OsRandomSource, Range, Snapshot};
use crate::persistence::PersistenceBridge;

/// Snapshots buffered per subscriber before slow sockets start lagging.
const UPDATE_CAPACITY: usize = 32;

pub struct AppState {
    pub generator: Mutex<GeneratorState>,
    pub persistence: PersistenceBridge,
    pub clock: Arc<dyn Clock>,
    pub updates: broadcast::Sender<Snapshot>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        generator: GeneratorState,
        persistence: PersistenceBridge,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self {
            generator: Mutex::new(generator),
            persistence,
            clock,
            updates,
            config: Arc::new(config),
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.generator.lock().await.snapshot()
    }

    /// Draw, record, persist and publish, all under the state lock.
    #[tracing::instrument(skip(self))]
    pub async fn generate(&self, range: Range) -> Result<(i64, Snapshot), AppError> {
        let mut generator = self.generator.lock().await;
        let value = generator.generate(range, &mut OsRandomSource, self.clock.as_ref())?;
        self.persistence.save(&generator.to_persisted()).await;

        let snapshot = generator.snapshot();
        self.publish(snapshot.clone());
        tracing::info!(value, total_count = snapshot.total_count, "Generated number");
        Ok((value, snapshot))
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Snapshot {
        let mut generator = self.generator.lock().await;
        generator.clear();
        self.persistence.save(&generator.to_persisted()).await;

        let snapshot = generator.snapshot();
        self.publish(snapshot.clone());
        tracing::info!("History cleared");
        snapshot
    }

    /// Pushes a snapshot to every connected socket. No subscribers is fine.
    pub fn publish(&self, snapshot: Snapshot) {
        let receivers = self.updates.send(snapshot).unwrap_or(0);
        tracing::debug!(receivers, "Published snapshot");
    }
}

pub type SharedState = Arc<AppState>;
