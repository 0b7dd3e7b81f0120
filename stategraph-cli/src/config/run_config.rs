//! Workflow config: run id, checkpoint database, recursion limit, confidence threshold.
//! Filled from env / .env, then overridden by [`RunOptions`](super::RunOptions).

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Threshold used when `CONFIDENCE_THRESHOLD` is not set.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.8;

/// Workflow config. Can be filled from env / .env.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowConfig {
    /// Run id for checkpoints. Required for `resume`; generated for fresh runs when unset.
    pub run_id: Option<String>,
    /// SQLite database path. When unset, checkpoints are kept in memory for the process.
    pub db_path: Option<String>,
    /// Maximum node executions per invocation. Default: no limit.
    pub recursion_limit: Option<usize>,
    /// Confidence strictly above this takes the high-confidence path.
    pub confidence_threshold: f64,
    /// Resume `run_id` from its latest checkpoint.
    pub resume: bool,
    /// Run the plain-function form of the workflow instead of the graph.
    pub procedural: bool,
    /// When true, show debug logs.
    pub verbose: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            run_id: None,
            db_path: None,
            recursion_limit: None,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            resume: false,
            procedural: false,
            verbose: false,
        }
    }
}

impl WorkflowConfig {
    /// Fill config from env vars (and .env). Call `dotenv::dotenv().ok()` first, or use [`crate::run`].
    ///
    /// All optional: `RUN_ID`, `DB_PATH`, `RECURSION_LIMIT`, `CONFIDENCE_THRESHOLD`.
    /// A set but unparsable number is an error.
    pub fn from_env() -> Result<Self, Error> {
        let run_id = non_empty_var("RUN_ID");
        let db_path = non_empty_var("DB_PATH");
        let recursion_limit = match non_empty_var("RECURSION_LIMIT") {
            Some(s) => Some(
                s.parse::<usize>()
                    .map_err(|e| format!("RECURSION_LIMIT={:?} is not a count: {}", s, e))?,
            ),
            None => None,
        };
        let confidence_threshold = match non_empty_var("CONFIDENCE_THRESHOLD") {
            Some(s) => s
                .parse::<f64>()
                .map_err(|e| format!("CONFIDENCE_THRESHOLD={:?} is not a number: {}", s, e))?,
            None => DEFAULT_CONFIDENCE_THRESHOLD,
        };
        let config = Self {
            run_id,
            db_path,
            recursion_limit,
            confidence_threshold,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply optional overrides from `RunOptions` to this config.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(id) = &options.run_id {
            self.run_id = Some(id.clone());
        }
        if let Some(path) = &options.db_path {
            self.db_path = Some(path.clone());
        }
        if let Some(limit) = options.recursion_limit {
            self.recursion_limit = Some(limit);
        }
        if let Some(t) = options.confidence_threshold {
            self.confidence_threshold = t;
        }
        if options.resume {
            self.resume = true;
        }
        if options.procedural {
            self.procedural = true;
        }
        self.verbose = options.verbose;
    }

    /// Checks combinations `run_with_config` cannot honor.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(format!(
                "confidence threshold {} is outside 0..=1",
                self.confidence_threshold
            )
            .into());
        }
        if self.recursion_limit == Some(0) {
            return Err("recursion limit must be at least 1".into());
        }
        if self.resume && self.procedural {
            return Err("--resume needs the graph form; it cannot be combined with --procedural".into());
        }
        if self.resume && self.run_id.is_none() {
            return Err("--resume needs a run id (RUN_ID or --run-id)".into());
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
