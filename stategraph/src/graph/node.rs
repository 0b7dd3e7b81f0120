//! Graph node trait: one step in a StateGraph.
//!
//! Receives a read-only view of the shared state, returns the partial state it
//! produced. The run loop merges the partial state, checkpoints, then routes.

use async_trait::async_trait;

use crate::error::NodeError;
use crate::state::GraphState;

/// One step in a graph: state in, partial state out.
///
/// A node must not depend on effects the engine cannot see; side effects on external
/// systems are its own business. It may block or await for as long as its work takes;
/// the engine imposes no timeout.
///
/// **Interaction**: Registered via `StateGraph::add_node`; invoked by
/// `CompiledStateGraph::run` / `resume`, one node at a time per run.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: GraphState,
{
    async fn run(&self, state: &S) -> Result<S::Update, NodeError>;
}

/// Adapts a synchronous function `(&S) -> Result<S::Update, NodeError>` into a [`Node`].
///
/// Used by `StateGraph::add_fn_node`.
pub struct FnNode<F> {
    f: F,
}

impl<F> FnNode<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<S, F> Node<S> for FnNode<F>
where
    S: GraphState,
    F: Fn(&S) -> Result<S::Update, NodeError> + Send + Sync,
{
    async fn run(&self, state: &S) -> Result<S::Update, NodeError> {
        (self.f)(state)
    }
}
