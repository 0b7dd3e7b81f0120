//! In-memory checkpointer for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Checkpoint, CheckpointError, CheckpointListItem, Checkpointer};

/// Keeps every checkpoint in memory, grouped by run id in write order.
///
/// Lost when the process exits; use `SqliteSaver` for persistence.
pub struct MemorySaver<S> {
    runs: RwLock<HashMap<String, Vec<Checkpoint<S>>>>,
}

impl<S> Default for MemorySaver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MemorySaver<S> {
    pub fn new() -> Self {
        Self {
            runs: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<S> Checkpointer<S> for MemorySaver<S>
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(&self, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError> {
        let mut runs = self.runs.write().await;
        runs.entry(checkpoint.run_id.clone())
            .or_default()
            .push(checkpoint.clone());
        Ok(())
    }

    async fn get_latest(&self, run_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError> {
        let runs = self.runs.read().await;
        Ok(runs.get(run_id).and_then(|history| history.last().cloned()))
    }

    async fn list(&self, run_id: &str) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        let runs = self.runs.read().await;
        Ok(runs
            .get(run_id)
            .map(|history| history.iter().map(Checkpoint::list_item).collect())
            .unwrap_or_default())
    }
}
