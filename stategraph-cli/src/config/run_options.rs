//! Optional overrides for running the workflow (CLI args or programmatic).
//!
//! Used by [`WorkflowConfig::apply_options`](super::WorkflowConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

/// Optional overrides for a run: run id, database, resume, threshold, limits.
///
/// All `Option` fields override the env-based config only when set; flags only
/// switch behavior on.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Run id under which checkpoints are written and resumed.
    pub run_id: Option<String>,
    /// SQLite database path for checkpoints.
    pub db_path: Option<String>,
    /// Maximum node executions per invocation.
    pub recursion_limit: Option<usize>,
    /// Confidence above which analysis takes the high-confidence path.
    pub confidence_threshold: Option<f64>,
    /// Resume `run_id` from its latest checkpoint instead of starting over.
    pub resume: bool,
    /// Run the plain-function form instead of the graph.
    pub procedural: bool,
    /// Debug logs (node start/complete, checkpoints).
    pub verbose: bool,
}
