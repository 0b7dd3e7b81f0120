//! Shared state flowing through a graph run.
//!
//! A graph is generic over one state type `S: GraphState`. Nodes read `&S` and
//! return `S::Update`, a partial state that the run loop merges into the shared
//! state before checkpointing and routing.
//!
//! - [`GraphState`]: the merge contract (shallow overwrite, idempotent).
//! - [`JsonState`]: map-backed state for graphs whose fields are declared at runtime.
//! - [`StateSchema`]: declared fields, value kinds and writer ownership for `JsonState`.
//! - [`StateValidator`]: hook the run loop calls on the initial state and on every update.

mod graph_state;
mod json_state;
mod schema;

pub use graph_state::{GraphState, StateValidator};
pub use json_state::JsonState;
pub use schema::{FieldSpec, FieldType, SchemaError, StateSchema};
