//! # StateGraph for Rust
//!
//! A small state-machine engine for branching workflows. Nodes read a shared
//! state and return a partial state; static and conditional edges decide what
//! runs next; a checkpointer persists the state after every node so a failed
//! run can be resumed where it stopped.
//!
//! ## Design Principles
//!
//! - **Single state type**: Each graph uses one state type (`S: GraphState`) that all
//!   nodes read. Nodes return `S::Update`; the run loop merges it (shallow overwrite).
//! - **Routing from state only**: Branching lives in routers, functions of the merged
//!   state, instead of inline conditionals between blocking calls.
//! - **One node at a time per run**: No implicit parallelism inside a run. Independent
//!   runs of one compiled graph may execute concurrently.
//! - **Checkpoint, then route**: A run never advances past a node whose checkpoint
//!   write failed, so resume never skips state.
//!
//! ## Main Modules
//!
//! - [`graph`]: `StateGraph`, `CompiledStateGraph`, `Node`, `Router`, `Next`, run errors.
//! - [`state`]: `GraphState`, `JsonState`, `StateSchema`.
//! - [`memory`]: `Checkpointer`, `MemorySaver`, optional `SqliteSaver`, `RunnableConfig`.
//! - [`stream`]: `StreamMode`, `StreamEvent` for `CompiledStateGraph::stream`.
//!
//! ## Features
//!
//! - `sqlite` (default): Persistent checkpointer.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use stategraph::{JsonState, RunnableConfig, StateGraph, END};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = StateGraph::<JsonState>::new();
//! graph
//!     .add_fn_node("step1", |s| {
//!         let needs = s.lookup(&["input_data", "needs_analysis"]).cloned().unwrap_or(json!(false));
//!         Ok(JsonState::new().with("step1_result", json!({ "needs_analysis": needs })))
//!     })?
//!     .add_fn_node("analyze", |_| Ok(JsonState::new().with("analysis", json!({ "confidence": 0.9 }))))?
//!     .set_entry_point("step1")?
//!     .add_conditional_edges("step1", |s| {
//!         if s.lookup(&["step1_result", "needs_analysis"]) == Some(&json!(true)) {
//!             "analyze"
//!         } else {
//!             END
//!         }
//!     })?;
//! let compiled = graph.compile()?;
//!
//! let input = JsonState::new().with("input_data", json!({ "needs_analysis": true }));
//! let out = compiled.run(input, &RunnableConfig::new("run-1")).await?;
//! assert!(out.contains("analysis"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod memory;
pub mod state;
pub mod stream;

pub use error::NodeError;
pub use graph::{
    CompilationError, CompiledStateGraph, FailureReport, FnNode, Next, Node, Router, RunError,
    StateGraph, END, START,
};
pub use memory::{
    Checkpoint, CheckpointError, CheckpointListItem, Checkpointer, JsonSerializer, MemorySaver,
    RunnableConfig, Serializer,
};
#[cfg(feature = "sqlite")]
pub use memory::SqliteSaver;
pub use state::{FieldSpec, FieldType, GraphState, JsonState, SchemaError, StateSchema, StateValidator};
pub use stream::{StreamEvent, StreamMode};
