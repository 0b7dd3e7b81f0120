//! Integration-style tests for [`run_with_config`](crate::run_with_config).
//!
//! Scenarios: in-memory graph run, procedural run, resume from a SQLite database,
//! resume without a checkpoint, invalid db path, cancellation.

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::config::WorkflowConfig;
use crate::run_with_config;

/// **Scenario**: Without a db path the graph runs with an in-memory checkpointer.
///
/// Given: default config and a high-confidence input  
/// When: run_with_config is called  
/// Then: the outcome has a generated run id and the high-confidence result
#[tokio::test]
async fn graph_run_in_memory() {
    let config = WorkflowConfig::default();
    let outcome = run_with_config(
        &config,
        Some(json!({ "needs_analysis": true, "confidence": 0.95 })),
        CancellationToken::new(),
    )
    .await
    .unwrap();
    assert!(outcome.run_id.unwrap().starts_with("run-"));
    assert_eq!(outcome.final_result["path"], "high_confidence");
}

/// **Scenario**: The procedural form reports no run id and the same result.
#[tokio::test]
async fn procedural_run_matches_graph_run() {
    let input = json!({ "needs_analysis": true, "confidence": 0.3 });
    let graph = run_with_config(
        &WorkflowConfig::default(),
        Some(input.clone()),
        CancellationToken::new(),
    )
    .await
    .unwrap();
    let procedural = run_with_config(
        &WorkflowConfig {
            procedural: true,
            ..WorkflowConfig::default()
        },
        Some(input),
        CancellationToken::new(),
    )
    .await
    .unwrap();
    assert!(procedural.run_id.is_none());
    assert_eq!(procedural.final_result, graph.final_result);
}

/// **Scenario**: A completed run persisted to SQLite can be resumed by run id.
///
/// Given: a run written to a temp database under run id "persisted"  
/// When: a second call resumes "persisted" from the same database without input  
/// Then: it returns the same final result without error
#[cfg(feature = "sqlite")]
#[tokio::test]
async fn resume_from_sqlite_returns_final_result() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("runs.db").to_string_lossy().into_owned();
    let config = WorkflowConfig {
        run_id: Some("persisted".into()),
        db_path: Some(db_path),
        ..WorkflowConfig::default()
    };
    let first = run_with_config(
        &config,
        Some(json!({ "needs_analysis": false, "note": "hello" })),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    let resumed = run_with_config(
        &WorkflowConfig {
            resume: true,
            ..config
        },
        None,
        CancellationToken::new(),
    )
    .await
    .unwrap();
    assert_eq!(resumed, first);
    assert_eq!(resumed.final_result["input"]["note"], "hello");
}

/// **Scenario**: Resuming an unknown run id fails.
#[tokio::test]
async fn resume_without_checkpoint_fails() {
    let config = WorkflowConfig {
        run_id: Some("never-ran".into()),
        resume: true,
        ..WorkflowConfig::default()
    };
    let err = run_with_config(&config, None, CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("never-ran"), "{}", err);
}

/// **Scenario**: A db path that is a directory cannot be opened.
#[tokio::test]
async fn directory_db_path_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = WorkflowConfig {
        db_path: Some(dir.path().to_string_lossy().into_owned()),
        ..WorkflowConfig::default()
    };
    let result = run_with_config(&config, Some(json!({})), CancellationToken::new()).await;
    assert!(result.is_err());
}

/// **Scenario**: A cancelled token stops the graph before the first node.
#[tokio::test]
async fn cancelled_token_stops_run() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = run_with_config(&WorkflowConfig::default(), Some(json!({})), cancel)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("cancelled"), "{}", err);
}
