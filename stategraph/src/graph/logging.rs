//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for run start/complete/error, node execution,
//! state updates, checkpoint writes and advisory compile warnings.

use super::{FailureReport, Next};

/// Log run start.
pub fn log_run_start(run_id: &str) {
    tracing::info!(run_id = run_id, "Starting graph run");
}

/// Log resume from a checkpoint.
pub fn log_run_resume(run_id: &str, node_id: &str, step: u64) {
    tracing::info!(run_id = run_id, node_id = node_id, step, "Resuming graph run after checkpoint");
}

/// Log node execution start.
pub fn log_node_start(run_id: &str, node_id: &str, step: u64) {
    tracing::debug!(run_id = run_id, node_id = node_id, step, "Starting node execution");
}

/// Log node completion with the resolved next step.
pub fn log_node_complete(run_id: &str, node_id: &str, next: &Next) {
    tracing::debug!(run_id = run_id, node_id = node_id, ?next, "Node execution complete");
}

/// Log state update (partial state merged).
pub fn log_state_update(node_id: &str) {
    tracing::debug!(node_id = node_id, "State updated");
}

pub fn log_checkpoint_saved(run_id: &str, node_id: &str, step: u64) {
    tracing::debug!(run_id = run_id, node_id = node_id, step, "Checkpoint saved");
}

/// Log run completion.
pub fn log_run_complete(run_id: &str) {
    tracing::info!(run_id = run_id, "Graph run complete");
}

/// Log run failure.
pub fn log_run_error(report: &FailureReport) {
    tracing::error!(
        run_id = %report.run_id,
        last_checkpoint = ?report.last_checkpoint,
        error = %report.error,
        "Graph run failed"
    );
}

/// Advisory: nodes on a cycle of static edges only. Such a cycle never reaches END.
pub fn log_static_cycle(nodes: &[String]) {
    tracing::warn!(?nodes, "Static edges form a cycle with no exit");
}

/// Advisory: nodes no edge path from START can reach.
pub fn log_unreachable_nodes(nodes: &[String]) {
    tracing::warn!(?nodes, "Nodes are unreachable from START");
}
