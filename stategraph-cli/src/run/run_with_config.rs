//! Run the workflow with a given config; does not read .env.
//!
//! Graph form: compiles [`build_workflow_graph`](crate::workflow::build_workflow_graph)
//! with the configured checkpointer, then runs or resumes under the config's run id.
//! Procedural form: calls [`complex_workflow_with_threshold`](crate::workflow::procedural::complex_workflow_with_threshold).

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use stategraph::RunnableConfig;
use tokio_util::sync::CancellationToken;

use crate::config::WorkflowConfig;
use crate::workflow::graph::{final_result, initial_state};
use crate::workflow::{build_workflow_graph, procedural};

use super::checkpointer::checkpointer;
use super::Error;

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Run id the checkpoints were written under; `None` for the procedural form.
    pub run_id: Option<String>,
    /// The workflow's `final_result`.
    pub final_result: Value,
}

/// Run (or resume) the workflow with the given config.
///
/// `input` is required unless `config.resume` is set, where it is ignored.
/// Cancelling `cancel` stops the graph before its next node.
pub async fn run_with_config(
    config: &WorkflowConfig,
    input: Option<Value>,
    cancel: CancellationToken,
) -> Result<RunOutcome, Error> {
    config.validate()?;

    if config.procedural {
        let input = input.ok_or("procedural run needs an input")?;
        tracing::info!(threshold = config.confidence_threshold, "running procedural workflow");
        let final_result =
            procedural::complex_workflow_with_threshold(&input, config.confidence_threshold)?;
        return Ok(RunOutcome {
            run_id: None,
            final_result,
        });
    }

    let compiled = build_workflow_graph(config.confidence_threshold)?
        .compile_with_checkpointer(checkpointer(config)?)?;

    let run_id = config.run_id.clone().unwrap_or_else(generated_run_id);
    let mut runnable = RunnableConfig::new(run_id.clone()).with_cancellation(cancel);
    if let Some(limit) = config.recursion_limit {
        runnable = runnable.with_recursion_limit(limit);
    }

    let state = if config.resume {
        compiled.resume(&runnable).await?
    } else {
        let input = input.ok_or("run needs an input unless resuming")?;
        compiled.run(initial_state(input), &runnable).await?
    };

    Ok(RunOutcome {
        run_id: Some(run_id),
        final_result: final_result(&state)?.clone(),
    })
}

fn generated_run_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("run-{}", millis)
}
