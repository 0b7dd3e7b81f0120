//! Failure, checkpoint and resume: resumed runs end in the same state as uninterrupted ones.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use stategraph::{
    Checkpoint, CheckpointError, CheckpointListItem, Checkpointer, JsonState, MemorySaver, Node,
    NodeError, RunError, RunnableConfig, StateGraph,
};

use crate::common::{input, path_of, workflow, Calls};

/// analyze node that fails while `fail` is set.
struct SwitchableAnalyze {
    fail: Arc<AtomicBool>,
}

#[async_trait]
impl Node<JsonState> for SwitchableAnalyze {
    async fn run(&self, state: &JsonState) -> Result<JsonState, NodeError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NodeError::ExecutionFailed("analysis service down".into()));
        }
        let confidence = state
            .lookup(&["input_data", "confidence"])
            .cloned()
            .unwrap_or(json!(0.0));
        Ok(JsonState::new().with("analysis", json!({ "confidence": confidence })))
    }
}

#[tokio::test]
async fn resumed_run_matches_uninterrupted_run() {
    let calls = Arc::new(Calls::default());
    let saver = Arc::new(MemorySaver::<JsonState>::new());
    let graph = workflow(calls.clone())
        .compile_with_checkpointer(saver.clone())
        .unwrap();
    let uninterrupted = graph
        .run(input(true, 0.85), &RunnableConfig::new("clean"))
        .await
        .unwrap();

    let fail = Arc::new(AtomicBool::new(true));
    let mut flaky = StateGraph::<JsonState>::new();
    flaky
        .add_fn_node("step1", |s: &JsonState| {
            let needs = s
                .lookup(&["input_data", "needs_analysis"])
                .cloned()
                .unwrap_or(json!(false));
            Ok(JsonState::new().with("step1_result", json!({ "needs_analysis": needs })))
        })
        .unwrap();
    flaky
        .add_node("analyze", Arc::new(SwitchableAnalyze { fail: fail.clone() }))
        .unwrap();
    flaky
        .add_fn_node("high_confidence", |_: &JsonState| {
            Ok(JsonState::new().with("final_result", json!({ "path": "high_confidence" })))
        })
        .unwrap();
    flaky.set_entry_point("step1").unwrap();
    flaky.add_edge("step1", "analyze").unwrap();
    flaky.add_edge("analyze", "high_confidence").unwrap();
    let saver = Arc::new(MemorySaver::<JsonState>::new());
    let flaky = flaky.compile_with_checkpointer(saver.clone()).unwrap();

    let config = RunnableConfig::new("interrupted");
    let report = flaky.run(input(true, 0.85), &config).await.unwrap_err();
    assert!(matches!(report.error, RunError::NodeExecution { ref node, .. } if node == "analyze"));
    assert_eq!(report.last_checkpoint.as_deref(), Some("step1"));
    let latest = saver.get_latest("interrupted").await.unwrap().unwrap();
    assert_eq!(latest.node_id, "step1");
    assert!(!latest.state.contains("analysis"));

    fail.store(false, Ordering::SeqCst);
    let resumed = flaky.resume(&config).await.unwrap();
    assert_eq!(resumed, uninterrupted);
    assert_eq!(path_of(&resumed), Some("high_confidence"));
}

/// Checkpointer whose writes fail after `ok_writes` successful ones.
struct FailingStore {
    inner: MemorySaver<JsonState>,
    ok_writes: usize,
    writes: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl Checkpointer<JsonState> for FailingStore {
    async fn put(&self, checkpoint: &Checkpoint<JsonState>) -> Result<(), CheckpointError> {
        if self.writes.fetch_add(1, Ordering::SeqCst) >= self.ok_writes {
            return Err(CheckpointError::Storage("disk full".into()));
        }
        self.inner.put(checkpoint).await
    }

    async fn get_latest(
        &self,
        run_id: &str,
    ) -> Result<Option<Checkpoint<JsonState>>, CheckpointError> {
        self.inner.get_latest(run_id).await
    }

    async fn list(&self, run_id: &str) -> Result<Vec<CheckpointListItem>, CheckpointError> {
        self.inner.list(run_id).await
    }
}

#[tokio::test]
async fn failed_checkpoint_write_stops_the_run_at_that_node() {
    let calls = Arc::new(Calls::default());
    let store = Arc::new(FailingStore {
        inner: MemorySaver::new(),
        ok_writes: 1,
        writes: Default::default(),
    });
    let graph = workflow(calls.clone())
        .compile_with_checkpointer(store.clone())
        .unwrap();

    let report = graph
        .run(input(true, 0.9), &RunnableConfig::new("cw"))
        .await
        .unwrap_err();
    match &report.error {
        RunError::CheckpointWrite { node, .. } => assert_eq!(node, "analyze"),
        other => panic!("expected CheckpointWrite, got {:?}", other),
    }
    assert_eq!(report.last_checkpoint.as_deref(), Some("step1"));
    assert_eq!(Calls::get(&calls.analyze), 1);
    assert_eq!(Calls::get(&calls.high_confidence), 0, "must not advance past analyze");

    let latest = store.get_latest("cw").await.unwrap().unwrap();
    assert_eq!(latest.node_id, "step1");
}

#[tokio::test]
async fn resume_of_completed_run_does_not_rerun_nodes() {
    let calls = Arc::new(Calls::default());
    let graph = workflow(calls.clone())
        .compile_with_checkpointer(Arc::new(MemorySaver::<JsonState>::new()))
        .unwrap();
    let config = RunnableConfig::new("done");
    let out = graph.run(input(false, 0.0), &config).await.unwrap();
    let again = graph.resume(&config).await.unwrap();
    assert_eq!(out, again);
    assert_eq!(Calls::get(&calls.step1), 1);
    assert_eq!(Calls::get(&calls.simple_path), 1);
}
