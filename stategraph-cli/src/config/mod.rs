//! Configuration types for running the workflow.
//!
//! Re-exports [`WorkflowConfig`], [`RunOptions`] and config [`Error`].

mod run_config;
mod run_options;

pub use run_config::{Error, WorkflowConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use run_options::RunOptions;
