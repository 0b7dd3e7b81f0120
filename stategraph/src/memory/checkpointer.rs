//! Checkpointer trait and its error type.

use async_trait::async_trait;
use thiserror::Error;

use super::{Checkpoint, CheckpointListItem};

/// Error from a checkpoint backend.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// The backend could not read or durably write.
    #[error("storage error: {0}")]
    Storage(String),

    /// State could not be converted to or from bytes.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Storage for checkpoints, keyed by run id.
///
/// `put` must not return `Ok` before the checkpoint is durable for the backend's
/// notion of durability (in-memory backends: visible to later `get_latest`).
/// `get_latest` returns the checkpoint most recently put for the run.
///
/// **Interaction**: Held by `CompiledStateGraph` when compiled with
/// `compile_with_checkpointer`; written after every node, read by `resume`.
#[async_trait]
pub trait Checkpointer<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    async fn put(&self, checkpoint: &Checkpoint<S>) -> Result<(), CheckpointError>;

    async fn get_latest(&self, run_id: &str) -> Result<Option<Checkpoint<S>>, CheckpointError>;

    /// History of the run, oldest first.
    async fn list(&self, run_id: &str) -> Result<Vec<CheckpointListItem>, CheckpointError>;
}
