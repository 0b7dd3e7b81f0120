//! Procedural form: the workflow as direct calls with inline conditionals.

use serde_json::Value;
use stategraph::NodeError;

use super::steps::{
    analyze_data, confidence_of, high_confidence_path, low_confidence_path, process_step1,
    simple_path,
};
use crate::config::DEFAULT_CONFIDENCE_THRESHOLD;

/// Runs the workflow on `input` with the default threshold and returns its final result.
pub fn complex_workflow(input: &Value) -> Result<Value, NodeError> {
    complex_workflow_with_threshold(input, DEFAULT_CONFIDENCE_THRESHOLD)
}

/// Like [`complex_workflow`], with the high-confidence cut-off given explicitly.
///
/// `input` must be a JSON object, as the graph form's schema requires.
pub fn complex_workflow_with_threshold(input: &Value, threshold: f64) -> Result<Value, NodeError> {
    if !input.is_object() {
        return Err(NodeError::InvalidState(format!(
            "input must be a JSON object, got {}",
            input
        )));
    }
    let step1 = process_step1(input);
    let result = if step1["needs_analysis"].as_bool() == Some(true) {
        let analysis = analyze_data(&step1);
        if confidence_of(&analysis) > threshold {
            high_confidence_path(&analysis)
        } else {
            low_confidence_path(&analysis)
        }
    } else {
        simple_path(&step1)
    };
    Ok(result)
}
