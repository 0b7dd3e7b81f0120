//! Node execution error types.
//!
//! Returned by `Node::run` and by routers when a step cannot produce its
//! partial state or its routing decision.

use thiserror::Error;

/// Node or router failure.
///
/// The run loop wraps it into `RunError::NodeExecution` or
/// `RunError::RouterFailed` together with the id of the node that failed.
#[derive(Debug, Error)]
pub enum NodeError {
    /// Execution failed with a message (e.g. downstream call failed).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The state handed to the node lacks a field it needs or holds a value of the wrong shape.
    #[error("invalid state: {0}")]
    InvalidState(String),
}
