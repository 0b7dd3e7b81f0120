//! Compiled state graph: immutable, supports run, resume and stream.
//!
//! Built by `StateGraph::compile` or `compile_with_checkpointer`. Holds nodes,
//! the outgoing edge of each node, an optional validator and an optional
//! checkpointer. Each run owns its state; the graph itself is shared read-only.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::memory::{Checkpoint, CheckpointListItem, Checkpointer, RunnableConfig};
use crate::state::{GraphState, StateValidator};
use crate::stream::{StreamEvent, StreamMode};

use super::edge::Edge;
use super::logging::{
    log_checkpoint_saved, log_node_complete, log_node_start, log_run_complete, log_run_error,
    log_run_resume, log_run_start, log_state_update,
};
use super::run_context::RunContext;
use super::{FailureReport, Next, Node, RunError, START};

/// Compiled graph: immutable structure, supports run / resume / stream.
///
/// Created by `StateGraph::compile()` or `compile_with_checkpointer()`. A run starts
/// at the node START routes to, and after each node:
/// 1. merges the node's partial state into the run's state,
/// 2. saves a checkpoint (when a checkpointer is set),
/// 3. follows the node's static edge, or asks its router, or ends if it has no edge.
///
/// Cheap to clone and safe to share across concurrent runs.
#[derive(Clone)]
pub struct CompiledStateGraph<S>
where
    S: GraphState,
{
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) edges: HashMap<String, Edge<S>>,
    pub(super) validator: Option<Arc<dyn StateValidator<S>>>,
    pub(super) checkpointer: Option<Arc<dyn Checkpointer<S>>>,
}

impl<S> CompiledStateGraph<S>
where
    S: GraphState,
{
    /// Runs the graph from its entry with `state` as the initial shared state.
    ///
    /// Returns the final state when a node without outgoing edge completes or a
    /// router returns `END`. On failure, the report names the last node whose
    /// checkpoint was committed; `resume` with the same run id continues after it.
    pub async fn run(&self, state: S, config: &RunnableConfig) -> Result<S, FailureReport> {
        self.run_with_context(state, config, None).await
    }

    /// Continues the run `config.run_id` from its latest checkpoint.
    ///
    /// The state is re-hydrated from the checkpoint and execution re-enters at the
    /// edge leaving the checkpointed node. A run whose checkpoint is at a terminal
    /// node returns the checkpointed state without running anything.
    pub async fn resume(&self, config: &RunnableConfig) -> Result<S, FailureReport> {
        let result = self.resume_inner(config).await;
        finish(&config.run_id, result)
    }

    /// Streams a run, emitting events via a channel-backed Stream.
    ///
    /// Values / Updates events are sent after each node commits, for the selected
    /// modes. If the run fails, a final `StreamEvent::Failed` is sent.
    pub fn stream(
        &self,
        state: S,
        config: RunnableConfig,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let ctx = RunContext {
            stream_tx: tx,
            stream_mode: stream_mode.into(),
        };

        tokio::spawn(async move {
            if let Err(report) = graph.run_with_context(state, &config, Some(&ctx)).await {
                ctx.emit(StreamEvent::Failed {
                    last_checkpoint: report.last_checkpoint.clone(),
                    message: report.to_string(),
                })
                .await;
            }
        });

        ReceiverStream::new(rx)
    }

    /// Latest checkpoint of a run, if the graph has a checkpointer and the run wrote one.
    pub async fn latest_checkpoint(&self, run_id: &str) -> Result<Option<Checkpoint<S>>, RunError> {
        let checkpointer = self.checkpointer.as_ref().ok_or(RunError::NoCheckpointer)?;
        checkpointer
            .get_latest(run_id)
            .await
            .map_err(RunError::CheckpointRead)
    }

    /// Checkpoint history of a run, oldest first.
    pub async fn history(&self, run_id: &str) -> Result<Vec<CheckpointListItem>, RunError> {
        let checkpointer = self.checkpointer.as_ref().ok_or(RunError::NoCheckpointer)?;
        checkpointer
            .list(run_id)
            .await
            .map_err(RunError::CheckpointRead)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Registered node ids, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort();
        ids
    }

    pub fn checkpointer(&self) -> Option<&Arc<dyn Checkpointer<S>>> {
        self.checkpointer.as_ref()
    }

    async fn run_with_context(
        &self,
        state: S,
        config: &RunnableConfig,
        ctx: Option<&RunContext<S>>,
    ) -> Result<S, FailureReport> {
        log_run_start(&config.run_id);
        let result = self.start(state, config, ctx).await;
        finish(&config.run_id, result)
    }

    async fn start(
        &self,
        state: S,
        config: &RunnableConfig,
        ctx: Option<&RunContext<S>>,
    ) -> Result<S, FailureReport> {
        let fail = |error| FailureReport::new(&config.run_id, None, error);
        if let Some(validator) = &self.validator {
            validator
                .validate_input(&state)
                .map_err(|e| fail(RunError::InvalidInput(e)))?;
        }
        match self.resolve_next(START, &state).map_err(fail)? {
            Next::End => Ok(state),
            Next::Node(entry) => {
                let cursor = Cursor {
                    state,
                    node: entry,
                    step: 0,
                    last_checkpoint: None,
                };
                self.run_loop(cursor, config, ctx).await
            }
        }
    }

    async fn resume_inner(&self, config: &RunnableConfig) -> Result<S, FailureReport> {
        let fail = |last: Option<String>, error| FailureReport::new(&config.run_id, last, error);
        let checkpoint = self
            .latest_checkpoint(&config.run_id)
            .await
            .map_err(|e| fail(None, e))?
            .ok_or_else(|| fail(None, RunError::NoCheckpoint(config.run_id.clone())))?;
        let last = Some(checkpoint.node_id.clone());
        if !self.nodes.contains_key(&checkpoint.node_id) {
            return Err(fail(last, RunError::UnknownNode(checkpoint.node_id)));
        }
        log_run_resume(&config.run_id, &checkpoint.node_id, checkpoint.step);

        let next = self
            .resolve_next(&checkpoint.node_id, &checkpoint.state)
            .map_err(|e| fail(last.clone(), e))?;
        match next {
            Next::End => Ok(checkpoint.state),
            Next::Node(id) => {
                let cursor = Cursor {
                    state: checkpoint.state,
                    node: id,
                    step: checkpoint.step + 1,
                    last_checkpoint: last,
                };
                self.run_loop(cursor, config, None).await
            }
        }
    }

    /// Steps through nodes until END, a node without edge, or a failure.
    async fn run_loop(
        &self,
        mut cursor: Cursor<S>,
        config: &RunnableConfig,
        ctx: Option<&RunContext<S>>,
    ) -> Result<S, FailureReport> {
        let mut executed = 0usize;
        loop {
            if let Some(limit) = config.recursion_limit {
                if executed >= limit {
                    return Err(cursor.fail(config, RunError::RecursionLimit(limit)));
                }
            }
            if let Err(e) = self
                .execute_node(&mut cursor.state, &cursor.node, cursor.step, config, ctx)
                .await
            {
                return Err(cursor.fail(config, e));
            }
            executed += 1;
            if self.checkpointer.is_some() {
                cursor.last_checkpoint = Some(cursor.node.clone());
            }

            let next = match self.resolve_next(&cursor.node, &cursor.state) {
                Ok(next) => next,
                Err(e) => return Err(cursor.fail(config, e)),
            };
            log_node_complete(&config.run_id, &cursor.node, &next);
            match next {
                Next::End => return Ok(cursor.state),
                Next::Node(id) => {
                    cursor.node = id;
                    cursor.step += 1;
                }
            }
        }
    }

    /// Runs one node and commits its effect: validate, merge, checkpoint, stream.
    ///
    /// Cancellation observed after the node returned discards its partial state.
    async fn execute_node(
        &self,
        state: &mut S,
        node_id: &str,
        step: u64,
        config: &RunnableConfig,
        ctx: Option<&RunContext<S>>,
    ) -> Result<(), RunError> {
        if config.is_cancelled() {
            return Err(RunError::Cancelled);
        }
        let node = self
            .nodes
            .get(node_id)
            .ok_or_else(|| RunError::UnknownNode(node_id.to_string()))?;

        log_node_start(&config.run_id, node_id, step);
        let update = node
            .run(state)
            .await
            .map_err(|source| RunError::NodeExecution {
                node: node_id.to_string(),
                source,
            })?;
        if config.is_cancelled() {
            return Err(RunError::Cancelled);
        }
        if let Some(validator) = &self.validator {
            validator
                .validate_update(node_id, &update)
                .map_err(|source| RunError::InvalidUpdate {
                    node: node_id.to_string(),
                    source,
                })?;
        }

        let streamed_update = ctx
            .filter(|c| c.wants(StreamMode::Updates))
            .map(|_| update.clone());
        state.merge(update);
        log_state_update(node_id);

        if let Some(checkpointer) = &self.checkpointer {
            let checkpoint = Checkpoint::new(&config.run_id, node_id, step, state.clone());
            checkpointer
                .put(&checkpoint)
                .await
                .map_err(|source| RunError::CheckpointWrite {
                    node: node_id.to_string(),
                    source,
                })?;
            log_checkpoint_saved(&config.run_id, node_id, step);
        }

        if let Some(ctx) = ctx {
            if ctx.wants(StreamMode::Values) {
                ctx.emit(StreamEvent::Values(state.clone())).await;
            }
            if let Some(update) = streamed_update {
                ctx.emit(StreamEvent::Updates {
                    node_id: node_id.to_string(),
                    update,
                })
                .await;
            }
        }
        Ok(())
    }

    /// Resolves what follows `from` given the current (post-merge) state.
    fn resolve_next(&self, from: &str, state: &S) -> Result<Next, RunError> {
        let target = match self.edges.get(from) {
            None => return Ok(Next::End),
            Some(Edge::Static(to)) => to.clone(),
            Some(Edge::Conditional { router, path_map }) => {
                let key = router
                    .route(state)
                    .map_err(|source| RunError::RouterFailed {
                        node: from.to_string(),
                        source,
                    })?;
                match path_map {
                    None => key,
                    Some(map) => map.get(&key).cloned().ok_or_else(|| RunError::Routing {
                        node: from.to_string(),
                        target: key,
                    })?,
                }
            }
        };
        match Next::from_target(target) {
            Next::Node(id) if !self.nodes.contains_key(&id) => Err(RunError::Routing {
                node: from.to_string(),
                target: id,
            }),
            next => Ok(next),
        }
    }
}

/// Position of a run between steps.
struct Cursor<S> {
    state: S,
    /// Node to run next.
    node: String,
    step: u64,
    last_checkpoint: Option<String>,
}

impl<S> Cursor<S> {
    fn fail(self, config: &RunnableConfig, error: RunError) -> FailureReport {
        FailureReport::new(&config.run_id, self.last_checkpoint, error)
    }
}

fn finish<S>(run_id: &str, result: Result<S, FailureReport>) -> Result<S, FailureReport> {
    match &result {
        Ok(_) => log_run_complete(run_id),
        Err(report) => log_run_error(report),
    }
    result
}
