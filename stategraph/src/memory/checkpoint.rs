//! Checkpoint and list-item types.

use std::time::SystemTime;

/// One checkpoint: the merged state right after `node_id` completed.
///
/// Written once by the run loop and never modified. `step` counts node executions
/// of the run, continuing across resumes.
///
/// **Interaction**: Produced by `CompiledStateGraph`; consumed by `Checkpointer::put`,
/// returned by `Checkpointer::get_latest`.
#[derive(Debug, Clone)]
pub struct Checkpoint<S> {
    pub id: String,
    pub run_id: String,
    pub node_id: String,
    pub step: u64,
    pub state: S,
    pub created_at: SystemTime,
}

/// Item returned by `Checkpointer::list` for run history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointListItem {
    pub checkpoint_id: String,
    pub node_id: String,
    pub step: u64,
}

impl<S> Checkpoint<S> {
    /// Creates a checkpoint stamped with the current time. The id is `<millis>-<step>`.
    pub fn new(run_id: impl Into<String>, node_id: impl Into<String>, step: u64, state: S) -> Self {
        let now = SystemTime::now();
        let millis = now
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self {
            id: format!("{}-{}", millis, step),
            run_id: run_id.into(),
            node_id: node_id.into(),
            step,
            state,
            created_at: now,
        }
    }

    pub fn list_item(&self) -> CheckpointListItem {
        CheckpointListItem {
            checkpoint_id: self.id.clone(),
            node_id: self.node_id.clone(),
            step: self.step,
        }
    }
}
