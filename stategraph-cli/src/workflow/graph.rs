//! Graph form: the workflow steps as nodes over [`JsonState`], routed by edges.

use serde_json::Value;
use stategraph::{CompilationError, JsonState, NodeError, StateGraph, END, START};

use super::routers::{confidence_check, should_analyze};
use super::steps::{
    analyze_data, high_confidence_path, low_confidence_path, process_step1, simple_path,
};
use super::{
    schema, ANALYSIS, ANALYZE, FINAL_RESULT, HIGH_CONFIDENCE, INPUT_DATA, LOW_CONFIDENCE,
    SIMPLE_PATH, STEP1, STEP1_RESULT,
};

fn read<'a>(state: &'a JsonState, field: &str) -> Result<&'a Value, NodeError> {
    state
        .get(field)
        .ok_or_else(|| NodeError::InvalidState(format!("{} has not been written", field)))
}

/// Node reading `from` and writing `to` with the result of `step`.
fn step_node(
    from: &'static str,
    to: &'static str,
    step: fn(&Value) -> Value,
) -> impl Fn(&JsonState) -> Result<JsonState, NodeError> + Send + Sync + 'static {
    move |state: &JsonState| Ok(JsonState::new().with(to, step(read(state, from)?)))
}

/// Builds the workflow graph with schema validation.
///
/// ```text
/// START → step1 ─should_analyze─┬→ analyze ─confidence_check─┬→ high_confidence → END
///                               │                            └→ low_confidence  → END
///                               └→ simple_path → END
/// ```
///
/// Compile it with or without a checkpointer; the initial state carries the input under
/// `input_data` and the result lands in `final_result`.
pub fn build_workflow_graph(threshold: f64) -> Result<StateGraph<JsonState>, CompilationError> {
    let mut graph = StateGraph::<JsonState>::new();
    graph
        .add_fn_node(STEP1, step_node(INPUT_DATA, STEP1_RESULT, process_step1))?
        .add_fn_node(ANALYZE, step_node(STEP1_RESULT, ANALYSIS, analyze_data))?
        .add_fn_node(
            HIGH_CONFIDENCE,
            step_node(ANALYSIS, FINAL_RESULT, high_confidence_path),
        )?
        .add_fn_node(
            LOW_CONFIDENCE,
            step_node(ANALYSIS, FINAL_RESULT, low_confidence_path),
        )?
        .add_fn_node(SIMPLE_PATH, step_node(STEP1_RESULT, FINAL_RESULT, simple_path))?
        .add_edge(START, STEP1)?
        .add_conditional_edges(STEP1, should_analyze)?
        .add_conditional_edges(ANALYZE, confidence_check(threshold))?
        .add_edge(HIGH_CONFIDENCE, END)?
        .add_edge(LOW_CONFIDENCE, END)?
        .add_edge(SIMPLE_PATH, END)?;
    Ok(graph.with_schema(schema()))
}

/// Initial state for `input`.
pub fn initial_state(input: Value) -> JsonState {
    JsonState::new().with(INPUT_DATA, input)
}

/// The `final_result` of a finished run.
pub fn final_result(state: &JsonState) -> Result<&Value, NodeError> {
    read(state, FINAL_RESULT)
}
