//! stategraph-cli library: the branching analysis workflow, reusable from other crates.
//!
//! Reads config from .env, builds step1 → analyze → high/low confidence (or simple path)
//! as a [`StateGraph`](stategraph::StateGraph) and runs or resumes it, returning the final result.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), stategraph_cli::Error> {
//! let outcome = stategraph_cli::run(serde_json::json!({
//!     "needs_analysis": true,
//!     "confidence": 0.9,
//! }))
//! .await?;
//! assert_eq!(outcome.final_result["path"], "high_confidence");
//! # Ok(())
//! # }
//! ```

mod config;
mod run;
pub mod workflow;

pub use config::{Error, RunOptions, WorkflowConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use run::{run, run_with_config, run_with_options, RunOutcome};

#[cfg(test)]
mod tests;
