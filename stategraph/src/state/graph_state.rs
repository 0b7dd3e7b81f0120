//! State and validation traits used by the run loop.

use std::fmt::Debug;

use super::schema::SchemaError;

/// Shared state of one run.
///
/// `Update` is the partial state a node returns. `merge` applies it as a shallow
/// overwrite: every field present in the update replaces the current value, fields
/// absent from the update keep their prior value. Merging the same update twice must
/// leave the state as merging it once.
///
/// **Interaction**: `Node::run` returns `S::Update`; `CompiledStateGraph` calls `merge`
/// after each node and before the checkpoint write.
pub trait GraphState: Clone + Send + Sync + Debug + 'static {
    /// Partial state produced by a node.
    type Update: Clone + Send + Sync + Debug + 'static;

    /// Applies a node's partial state to the shared state.
    fn merge(&mut self, update: Self::Update);
}

/// Checks the caller's initial state and every node update before it is merged.
///
/// Implemented by [`StateSchema`](super::StateSchema) for [`JsonState`](super::JsonState).
/// Attach with `StateGraph::with_validator`.
pub trait StateValidator<S: GraphState>: Send + Sync {
    /// Validates the initial state handed to `run`.
    fn validate_input(&self, state: &S) -> Result<(), SchemaError>;

    /// Validates the partial state `node_id` returned, before merge.
    fn validate_update(&self, node_id: &str, update: &S::Update) -> Result<(), SchemaError>;

    /// Node ids the validator refers to (e.g. field writers). `compile` checks they are registered.
    fn referenced_nodes(&self) -> Vec<String> {
        Vec::new()
    }
}
