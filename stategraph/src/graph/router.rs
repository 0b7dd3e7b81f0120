//! Routing functions for conditional edges.

use crate::error::NodeError;

/// Decides the next node from the state after the source node's update was merged.
///
/// Returns a node id, the `END` marker, or (when the edge has a path map) a key of
/// that map. An id the graph does not know fails the run with `RunError::Routing`;
/// an `Err` fails it with `RunError::RouterFailed`.
///
/// Closures are registered through `StateGraph::add_conditional_edges`; implement
/// this trait directly for routers that can fail.
pub trait Router<S>: Send + Sync {
    fn route(&self, state: &S) -> Result<String, NodeError>;
}

/// Infallible closure router.
pub(crate) struct FnRouter<F> {
    f: F,
}

impl<F> FnRouter<F> {
    pub(crate) fn new(f: F) -> Self {
        Self { f }
    }
}

impl<S, F> Router<S> for FnRouter<F>
where
    F: Fn(&S) -> String + Send + Sync,
{
    fn route(&self, state: &S) -> Result<String, NodeError> {
        Ok((self.f)(state))
    }
}
