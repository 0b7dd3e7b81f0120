//! The branching analysis workflow, in two equivalent forms.
//!
//! step1 decides whether the input needs analysis; analysis yields a confidence that
//! picks the high- or low-confidence path; inputs without analysis take the simple path.
//!
//! - [`procedural::complex_workflow`]: plain function calls with inline conditionals.
//! - [`graph::build_workflow_graph`]: the same steps as nodes over a shared [`JsonState`],
//!   with [`routers::should_analyze`] and [`routers::confidence_check`] on the edges.
//!
//! Both forms return the same `final_result` for the same input.
//!
//! [`JsonState`]: stategraph::JsonState

pub mod graph;
pub mod procedural;
pub mod routers;
pub mod steps;

use stategraph::{FieldType, StateSchema};

/// State field holding the caller's input object.
pub const INPUT_DATA: &str = "input_data";
/// State field written by `step1`.
pub const STEP1_RESULT: &str = "step1_result";
/// State field written by `analyze`.
pub const ANALYSIS: &str = "analysis";
/// State field written by whichever path node ends the run.
pub const FINAL_RESULT: &str = "final_result";

pub const STEP1: &str = "step1";
pub const ANALYZE: &str = "analyze";
pub const HIGH_CONFIDENCE: &str = "high_confidence";
pub const LOW_CONFIDENCE: &str = "low_confidence";
pub const SIMPLE_PATH: &str = "simple_path";

/// Declared fields of the workflow state and the nodes allowed to write each.
pub fn schema() -> StateSchema {
    StateSchema::new()
        .field(INPUT_DATA, FieldType::Object)
        .owned_field(STEP1_RESULT, FieldType::Object, &[STEP1])
        .owned_field(ANALYSIS, FieldType::Object, &[ANALYZE])
        .owned_field(
            FINAL_RESULT,
            FieldType::Object,
            &[HIGH_CONFIDENCE, LOW_CONFIDENCE, SIMPLE_PATH],
        )
}

pub use graph::build_workflow_graph;
pub use procedural::complex_workflow;
