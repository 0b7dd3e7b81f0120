//! Workflow steps as pure functions of JSON values.
//!
//! Shared by both forms: the procedural form chains them directly, the graph form
//! wraps each in a node that reads its argument from state.

use serde_json::{json, Value};

/// First step: keeps the input and lifts its `needs_analysis` flag (false when absent).
pub fn process_step1(input: &Value) -> Value {
    let needs_analysis = input
        .get("needs_analysis")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    json!({
        "input": input,
        "needs_analysis": needs_analysis,
    })
}

/// Analysis: confidence is the input's `confidence` clamped to 0..=1, or 0 when absent.
pub fn analyze_data(step1: &Value) -> Value {
    let confidence = step1
        .get("input")
        .and_then(|input| input.get("confidence"))
        .and_then(Value::as_f64)
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.0);
    json!({ "confidence": confidence })
}

/// Confidence carried by an analysis value.
pub fn confidence_of(analysis: &Value) -> f64 {
    analysis
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

pub fn high_confidence_path(analysis: &Value) -> Value {
    json!({
        "path": super::HIGH_CONFIDENCE,
        "confidence": confidence_of(analysis),
        "decision": "accept",
    })
}

pub fn low_confidence_path(analysis: &Value) -> Value {
    json!({
        "path": super::LOW_CONFIDENCE,
        "confidence": confidence_of(analysis),
        "decision": "review",
    })
}

pub fn simple_path(step1: &Value) -> Value {
    json!({
        "path": super::SIMPLE_PATH,
        "input": step1.get("input").cloned().unwrap_or(Value::Null),
    })
}
