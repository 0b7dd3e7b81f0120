//! Shared fixtures: the branching workflow with call counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use stategraph::{JsonState, NodeError, StateGraph, END, START};

/// Number of times each node ran.
#[derive(Default)]
pub struct Calls {
    pub step1: AtomicUsize,
    pub analyze: AtomicUsize,
    pub high_confidence: AtomicUsize,
    pub low_confidence: AtomicUsize,
    pub simple_path: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

pub fn input(needs_analysis: bool, confidence: f64) -> JsonState {
    JsonState::new().with(
        "input_data",
        json!({ "needs_analysis": needs_analysis, "confidence": confidence }),
    )
}

pub fn path_of(state: &JsonState) -> Option<&str> {
    state.lookup(&["final_result", "path"])?.as_str()
}

/// step1 → (needs_analysis ? analyze : simple_path); analyze → (confidence > 0.8 ? high : low).
pub fn workflow(calls: Arc<Calls>) -> StateGraph<JsonState> {
    let mut graph = StateGraph::<JsonState>::new();

    let c = calls.clone();
    graph
        .add_fn_node("step1", move |s: &JsonState| {
            c.step1.fetch_add(1, Ordering::SeqCst);
            let input = s
                .get("input_data")
                .ok_or_else(|| NodeError::InvalidState("input_data missing".into()))?;
            let needs = input.get("needs_analysis").cloned().unwrap_or(json!(false));
            Ok(JsonState::new().with("step1_result", json!({ "needs_analysis": needs })))
        })
        .unwrap();

    let c = calls.clone();
    graph
        .add_fn_node("analyze", move |s: &JsonState| {
            c.analyze.fetch_add(1, Ordering::SeqCst);
            let confidence = s
                .lookup(&["input_data", "confidence"])
                .cloned()
                .unwrap_or(json!(0.0));
            Ok(JsonState::new().with("analysis", json!({ "confidence": confidence })))
        })
        .unwrap();

    let c = calls.clone();
    graph
        .add_fn_node("high_confidence", move |_: &JsonState| {
            c.high_confidence.fetch_add(1, Ordering::SeqCst);
            Ok(JsonState::new().with("final_result", json!({ "path": "high_confidence" })))
        })
        .unwrap();

    let c = calls.clone();
    graph
        .add_fn_node("low_confidence", move |_: &JsonState| {
            c.low_confidence.fetch_add(1, Ordering::SeqCst);
            Ok(JsonState::new().with("final_result", json!({ "path": "low_confidence" })))
        })
        .unwrap();

    let c = calls;
    graph
        .add_fn_node("simple_path", move |_: &JsonState| {
            c.simple_path.fetch_add(1, Ordering::SeqCst);
            Ok(JsonState::new().with("final_result", json!({ "path": "simple_path" })))
        })
        .unwrap();

    graph.add_edge(START, "step1").unwrap();
    graph
        .add_conditional_edges("step1", |s: &JsonState| {
            if s.lookup(&["step1_result", "needs_analysis"]) == Some(&json!(true)) {
                "analyze"
            } else {
                "simple_path"
            }
        })
        .unwrap();
    graph
        .add_conditional_edges("analyze", |s: &JsonState| {
            let confidence = s
                .lookup(&["analysis", "confidence"])
                .and_then(|v| v.as_f64())
                .unwrap_or(0.0);
            if confidence > 0.8 {
                "high_confidence"
            } else {
                "low_confidence"
            }
        })
        .unwrap();
    graph.set_finish_point("high_confidence").unwrap();
    graph.set_finish_point("low_confidence").unwrap();
    graph.add_edge("simple_path", END).unwrap();
    graph
}
