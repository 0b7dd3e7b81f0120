//! Streaming types for graph runs.
//!
//! Defines stream modes and events emitted by `CompiledStateGraph::stream`
//! after each node commits.

use crate::state::GraphState;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit full state after each node completes.
    Values,
    /// Emit the node id and the partial state it returned.
    Updates,
}

/// Streamed event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: GraphState,
{
    /// Full state snapshot after a node finishes.
    Values(S),
    /// Partial state a node returned, before merge.
    Updates { node_id: String, update: S::Update },
    /// The run failed; always emitted regardless of the selected modes.
    Failed {
        last_checkpoint: Option<String>,
        message: String,
    },
}
