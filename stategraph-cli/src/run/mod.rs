//! Run entry points: run with default config, run_with_config, or run_with_options.
//!
//! Re-exports [`run`], [`run_with_config`], [`run_with_options`], [`RunOutcome`] and [`Error`].

pub use crate::config::Error;

mod checkpointer;
mod run_with_config;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::config::{RunOptions, WorkflowConfig};

pub use run_with_config::{run_with_config, RunOutcome};

/// Run the workflow graph on `input` with config from env (.env), returns the outcome.
///
/// Loads `.env` internally, then calls `run_with_config`.
pub async fn run(input: Value) -> Result<RunOutcome, Error> {
    dotenv::dotenv().ok();
    let config = WorkflowConfig::from_env()?;
    run_with_config(&config, Some(input), CancellationToken::new()).await
}

/// Run with config from env and overrides (e.g. from CLI).
///
/// Loads `.env`, builds [`WorkflowConfig`] from env, applies `options`, validates, then runs.
/// `input` may be `None` only when resuming.
pub async fn run_with_options(
    input: Option<Value>,
    options: &RunOptions,
    cancel: CancellationToken,
) -> Result<RunOutcome, Error> {
    dotenv::dotenv().ok();
    let mut config = WorkflowConfig::from_env()?;
    config.apply_options(options);
    config.validate()?;
    run_with_config(&config, input, cancel).await
}
