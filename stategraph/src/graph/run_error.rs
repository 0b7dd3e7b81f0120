//! Run-time errors and the failure report returned by `run` / `resume`.

use thiserror::Error;

use crate::error::NodeError;
use crate::memory::CheckpointError;
use crate::state::SchemaError;

/// Why a run stopped in the FAILED state.
///
/// A run error ends the current run only; the compiled graph and other runs are unaffected.
#[derive(Debug, Error)]
pub enum RunError {
    /// A router (or path map) produced an id that is neither a registered node nor END.
    #[error("router for {node} returned unknown node {target}")]
    Routing { node: String, target: String },

    /// A router returned an error.
    #[error("router for {node} failed: {source}")]
    RouterFailed {
        node: String,
        #[source]
        source: NodeError,
    },

    /// A node returned an error. Its partial state was not merged.
    #[error("node {node} failed: {source}")]
    NodeExecution {
        node: String,
        #[source]
        source: NodeError,
    },

    /// A node's partial state was rejected by the graph's validator.
    #[error("node {node} returned an invalid update: {source}")]
    InvalidUpdate {
        node: String,
        #[source]
        source: SchemaError,
    },

    /// The initial state was rejected by the graph's validator.
    #[error("invalid initial state: {0}")]
    InvalidInput(#[source] SchemaError),

    /// The checkpoint after `node` could not be written; the run did not advance past it.
    #[error("checkpoint write after {node} failed: {source}")]
    CheckpointWrite {
        node: String,
        #[source]
        source: CheckpointError,
    },

    /// Loading the latest checkpoint for `resume` failed.
    #[error("checkpoint read failed: {0}")]
    CheckpointRead(#[source] CheckpointError),

    /// `resume` was called on a graph compiled without a checkpointer.
    #[error("graph has no checkpointer")]
    NoCheckpointer,

    /// `resume` found no checkpoint for the run id.
    #[error("no checkpoint for run {0}")]
    NoCheckpoint(String),

    /// A checkpoint or cursor names a node this graph does not have.
    #[error("node {0} is not registered in this graph")]
    UnknownNode(String),

    /// `RunnableConfig::recursion_limit` node executions happened without reaching END.
    #[error("recursion limit of {0} node executions reached")]
    RecursionLimit(usize),

    /// The run's cancellation token fired.
    #[error("run cancelled")]
    Cancelled,
}

/// FAILED outcome of a run: the run id, the last node whose checkpoint was committed
/// (where `resume` re-enters), and the triggering error.
#[derive(Debug, Error)]
#[error(
    "run {run_id} failed after checkpoint {}: {error}",
    checkpoint_label(.last_checkpoint)
)]
pub struct FailureReport {
    pub run_id: String,
    pub last_checkpoint: Option<String>,
    #[source]
    pub error: RunError,
}

fn checkpoint_label(last: &Option<String>) -> &str {
    last.as_deref().unwrap_or("<none>")
}

impl FailureReport {
    pub fn new(run_id: impl Into<String>, last_checkpoint: Option<String>, error: RunError) -> Self {
        Self {
            run_id: run_id.into(),
            last_checkpoint,
            error,
        }
    }

    /// True when a checkpoint was committed, so `resume` can continue instead of restarting.
    pub fn is_resumable(&self) -> bool {
        self.last_checkpoint.is_some()
    }
}
