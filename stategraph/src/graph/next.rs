//! Resolved destination after a node: run another node, or end the run.

use super::END;

/// Next step after a node's edge is resolved.
///
/// - **Node(id)**: run the node with that id next.
/// - **End**: stop; return the current state as the final result.
///
/// **Interaction**: Produced by `CompiledStateGraph` from static edges and router
/// results; reaching a node with no outgoing edge is also `End`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Run the node with the given id next.
    Node(String),
    /// Stop and return the current state.
    End,
}

impl Next {
    /// Maps the `END` marker to `Next::End` and any other id to `Next::Node`.
    pub fn from_target(target: impl Into<String>) -> Self {
        let target = target.into();
        if target == END {
            Next::End
        } else {
            Next::Node(target)
        }
    }
}
