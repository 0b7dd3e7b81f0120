//! Run config: run id, recursion limit, cancellation.
//!
//! Passed to `CompiledStateGraph::run`, `resume` and `stream`. The run id keys
//! the checkpoints written by the run.

use tokio_util::sync::CancellationToken;

/// Config for a single run or resume.
///
/// **Interaction**: Passed to `CompiledStateGraph::run(state, &config)` and
/// `CompiledStateGraph::resume(&config)`; `run_id` is forwarded to the `Checkpointer`.
#[derive(Debug, Clone)]
pub struct RunnableConfig {
    /// Identifies the run. Checkpoints are written and resumed under this id.
    pub run_id: String,
    /// Maximum node executions in one invocation. None means unbounded; cyclic graphs
    /// then rely on their routers eventually routing to END.
    pub recursion_limit: Option<usize>,
    /// When cancelled, the run stops before the next node (or discards the node that
    /// was in flight) and stays resumable from its last checkpoint.
    pub cancellation: Option<CancellationToken>,
}

impl RunnableConfig {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            recursion_limit: None,
            cancellation: None,
        }
    }

    pub fn with_recursion_limit(self, limit: usize) -> Self {
        Self {
            recursion_limit: Some(limit),
            ..self
        }
    }

    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self {
            cancellation: Some(token),
            ..self
        }
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .map(CancellationToken::is_cancelled)
            .unwrap_or(false)
    }
}
