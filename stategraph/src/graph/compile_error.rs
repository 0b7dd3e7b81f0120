//! Graph compilation error.
//!
//! Returned by the `StateGraph` builder methods as soon as a registration is
//! rejected, and by `StateGraph::compile` for the first recorded or detected problem.

use thiserror::Error;

/// Error when building or compiling a state graph.
///
/// Builder methods record every error they return, so a graph with a rejected
/// registration never compiles even if the caller ignored the `Result`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// `add_node` was called twice with the same id.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// `START` and `END` cannot be used as node ids.
    #[error("reserved node id: {0}")]
    ReservedName(String),

    /// An edge endpoint, path-map target or schema writer is not a registered node (and not START/END).
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The source already has an outgoing edge (static or conditional).
    #[error("conflicting edges from node: {0}")]
    ConflictingEdge(String),

    /// Edge into START or out of END.
    #[error("invalid edge: {0}")]
    InvalidEdge(String),

    /// No edge leaves START, so the graph has no entry node.
    #[error("graph has no entry: add an edge from START")]
    MissingStart,
}
