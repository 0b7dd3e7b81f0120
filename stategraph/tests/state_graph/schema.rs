//! Schema validation: undeclared fields, wrong types and writes by non-owners.

use std::sync::Arc;

use serde_json::json;
use stategraph::{
    CompilationError, FieldType, JsonState, RunError, RunnableConfig, SchemaError, StateGraph,
    StateSchema,
};

use crate::common::{input, path_of, workflow, Calls};

fn schema() -> StateSchema {
    StateSchema::new()
        .field("input_data", FieldType::Object)
        .owned_field("step1_result", FieldType::Object, &["step1"])
        .owned_field("analysis", FieldType::Object, &["analyze"])
        .owned_field(
            "final_result",
            FieldType::Object,
            &["high_confidence", "low_confidence", "simple_path"],
        )
}

#[tokio::test]
async fn workflow_runs_under_its_schema() {
    let graph = workflow(Arc::new(Calls::default()))
        .with_schema(schema())
        .compile()
        .unwrap();
    let out = graph
        .run(input(true, 0.3), &RunnableConfig::new("schema-ok"))
        .await
        .unwrap();
    assert_eq!(path_of(&out), Some("low_confidence"));
}

#[tokio::test]
async fn undeclared_input_field_is_rejected_before_any_node() {
    let calls = Arc::new(Calls::default());
    let graph = workflow(calls.clone())
        .with_schema(schema())
        .compile()
        .unwrap();
    let report = graph
        .run(
            input(true, 0.3).with("extra", 1),
            &RunnableConfig::new("schema-input"),
        )
        .await
        .unwrap_err();
    match report.error {
        RunError::InvalidInput(SchemaError::UnknownField { field }) => assert_eq!(field, "extra"),
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    assert!(report.last_checkpoint.is_none());
    assert_eq!(Calls::get(&calls.step1), 0);
}

#[tokio::test]
async fn write_to_field_owned_by_another_node_fails_the_run() {
    let mut graph = StateGraph::<JsonState>::new();
    graph
        .add_fn_node("step1", |_: &JsonState| {
            Ok(JsonState::new().with("analysis", json!({ "confidence": 1.0 })))
        })
        .unwrap();
    graph
        .add_fn_node("analyze", |_: &JsonState| Ok(JsonState::new()))
        .unwrap();
    graph.set_entry_point("step1").unwrap();
    graph.add_edge("step1", "analyze").unwrap();
    let compiled = graph
        .with_schema(StateSchema::new().owned_field("analysis", FieldType::Object, &["analyze"]))
        .compile()
        .unwrap();

    let report = compiled
        .run(JsonState::new(), &RunnableConfig::new("schema-owner"))
        .await
        .unwrap_err();
    match report.error {
        RunError::InvalidUpdate { node, source } => {
            assert_eq!(node, "step1");
            assert_eq!(
                source,
                SchemaError::NotOwner {
                    field: "analysis".into(),
                    node: "step1".into()
                }
            );
        }
        other => panic!("expected InvalidUpdate, got {:?}", other),
    }
    assert!(report.last_checkpoint.is_none());
}

#[test]
fn schema_naming_unregistered_writer_fails_compile() {
    let mut graph = StateGraph::<JsonState>::new();
    graph
        .add_fn_node("rogue", |_: &JsonState| Ok(JsonState::new()))
        .unwrap();
    graph.set_entry_point("rogue").unwrap();
    let result = graph
        .with_schema(StateSchema::new().owned_field("analysis", FieldType::Object, &["analyze", "rogue"]))
        .compile();
    assert_eq!(
        result.err(),
        Some(CompilationError::NodeNotFound("analyze".into()))
    );
}

#[tokio::test]
async fn wrong_value_type_in_update_fails_the_run() {
    let mut graph = StateGraph::<JsonState>::new();
    graph
        .add_fn_node("analyze", |_: &JsonState| {
            Ok(JsonState::new().with("analysis", "high"))
        })
        .unwrap();
    graph.set_entry_point("analyze").unwrap();
    let compiled = graph
        .with_schema(StateSchema::new().owned_field("analysis", FieldType::Object, &["analyze"]))
        .compile()
        .unwrap();

    let report = compiled
        .run(JsonState::new(), &RunnableConfig::new("schema-type"))
        .await
        .unwrap_err();
    match report.error {
        RunError::InvalidUpdate { node, source } => {
            assert_eq!(node, "analyze");
            assert!(matches!(source, SchemaError::TypeMismatch { .. }));
        }
        other => panic!("expected InvalidUpdate, got {:?}", other),
    }
}
