//! Edge routers: the graph form's replacement for the procedural conditionals.

use serde_json::Value;
use stategraph::JsonState;

use super::{ANALYSIS, ANALYZE, HIGH_CONFIDENCE, LOW_CONFIDENCE, SIMPLE_PATH, STEP1_RESULT};
use super::steps::confidence_of;

/// After `step1`: `analyze` when step1 flagged the input, otherwise `simple_path`.
pub fn should_analyze(state: &JsonState) -> &'static str {
    let needs = state
        .lookup(&[STEP1_RESULT, "needs_analysis"])
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if needs {
        ANALYZE
    } else {
        SIMPLE_PATH
    }
}

/// After `analyze`: `high_confidence` when confidence is strictly above `threshold`.
pub fn confidence_check(threshold: f64) -> impl Fn(&JsonState) -> &'static str + Send + Sync {
    move |state: &JsonState| {
        let confidence = state.get(ANALYSIS).map(confidence_of).unwrap_or(0.0);
        if confidence > threshold {
            HIGH_CONFIDENCE
        } else {
            LOW_CONFIDENCE
        }
    }
}
