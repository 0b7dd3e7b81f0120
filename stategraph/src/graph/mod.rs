//! State graph: nodes + static and conditional edges, compile, run and resume.
//!
//! Build a `StateGraph` with nodes and edges, compile it into an immutable
//! `CompiledStateGraph`, then run it with an initial state. Each node returns
//! a partial state; routers pick the next node from the merged state.

mod compile_error;
mod compiled;
mod edge;
mod logging;
mod next;
mod node;
mod router;
mod run_context;
mod run_error;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use logging::{
    log_checkpoint_saved, log_node_complete, log_node_start, log_run_complete, log_run_error,
    log_run_resume, log_run_start, log_state_update,
};
pub use next::Next;
pub use node::{FnNode, Node};
pub use router::Router;
pub use run_error::{FailureReport, RunError};
pub use state_graph::{StateGraph, END, START};
