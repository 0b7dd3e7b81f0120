//! StateGraph compile failure cases: unknown node, missing entry, conflicting edges.

use std::sync::Arc;

use stategraph::{CompilationError, JsonState, NodeError, StateGraph, END, START};

use crate::common::{workflow, Calls};

fn noop(_: &JsonState) -> Result<JsonState, NodeError> {
    Ok(JsonState::new())
}

#[test]
fn compile_fails_when_edge_refers_to_unknown_node() {
    let mut graph = StateGraph::<JsonState>::new();
    graph.add_fn_node("echo", noop).unwrap();
    graph.add_edge(START, "echo").unwrap();
    graph.add_edge("echo", "missing").unwrap();

    match graph.compile() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        _ => panic!("expected NodeNotFound"),
    }
}

#[test]
fn compile_fails_without_entry() {
    let mut graph = StateGraph::<JsonState>::new();
    graph.add_fn_node("echo", noop).unwrap();
    graph.add_edge("echo", END).unwrap();
    assert!(matches!(graph.compile(), Err(CompilationError::MissingStart)));
}

#[test]
fn second_edge_spec_for_a_source_is_rejected_and_fatal_to_compile() {
    let mut graph = workflow(Arc::new(Calls::default()));
    let err = graph.add_edge("step1", "analyze").err();
    assert_eq!(err, Some(CompilationError::ConflictingEdge("step1".into())));
    match graph.compile() {
        Err(CompilationError::ConflictingEdge(id)) => assert_eq!(id, "step1"),
        _ => panic!("expected ConflictingEdge"),
    }
}

#[test]
fn duplicate_node_is_fatal_to_compile_even_if_ignored() {
    let mut graph = workflow(Arc::new(Calls::default()));
    let _ = graph.add_fn_node("analyze", noop);
    match graph.compile() {
        Err(CompilationError::DuplicateNode(id)) => assert_eq!(id, "analyze"),
        _ => panic!("expected DuplicateNode"),
    }
}
