//! # Memory: Checkpointing
//!
//! Persists the shared state after every node so a failed or cancelled run can be
//! resumed from the last node that completed.
//!
//! ## Overview
//!
//! A [`Checkpointer`] stores one [`Checkpoint`] per executed node, keyed by run id.
//! The run loop writes it after the node's partial state is merged and before the
//! next node is resolved. A run never advances past a node whose checkpoint write failed.
//!
//! ## Config
//!
//! [`RunnableConfig`] is passed to `CompiledStateGraph::run` / `resume`:
//! - `run_id`: Required. Key for checkpoints of this run.
//! - `recursion_limit`: Optional cap on node executions per invocation.
//! - `cancellation`: Optional token checked between steps.
//!
//! ## Checkpointer Implementations
//!
//! | Type             | Persistence | Use case                | Feature  |
//! |------------------|-------------|-------------------------|----------|
//! | [`MemorySaver`]  | In-memory   | Dev, tests              | -        |
//! | `SqliteSaver`    | SQLite file | Single-node, production | `sqlite` |
//!
//! Use with [`StateGraph::compile_with_checkpointer`](crate::graph::StateGraph::compile_with_checkpointer).
//! [`JsonSerializer`] is required for `SqliteSaver` (state must be `Serialize + DeserializeOwned`).

mod checkpoint;
mod checkpointer;
mod config;
mod memory_saver;
mod serializer;

#[cfg(feature = "sqlite")]
mod sqlite_saver;

pub use checkpoint::{Checkpoint, CheckpointListItem};
pub use checkpointer::{CheckpointError, Checkpointer};
pub use config::RunnableConfig;
pub use memory_saver::MemorySaver;
pub use serializer::{JsonSerializer, Serializer};

#[cfg(feature = "sqlite")]
pub use sqlite_saver::SqliteSaver;
