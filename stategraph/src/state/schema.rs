//! Field declarations for [`JsonState`]: names, value kinds and writer ownership.
//!
//! A schema makes the partial-state merge contract explicit. Each field names the
//! nodes allowed to write it, so two nodes cannot silently clobber the same field.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::{JsonState, StateValidator};

/// JSON value kind a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Any,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl FieldType {
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            FieldType::Any => true,
            FieldType::Bool => value.is_boolean(),
            FieldType::Number => value.is_number(),
            FieldType::String => value.is_string(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
        }
    }

    fn of(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FieldType::Any => "any",
            FieldType::Bool => "bool",
            FieldType::Number => "number",
            FieldType::String => "string",
            FieldType::Object => "object",
            FieldType::Array => "array",
        };
        f.write_str(s)
    }
}

/// Declaration of one field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub ty: FieldType,
    /// Nodes allowed to write this field. Empty means any node.
    pub writers: Vec<String>,
}

/// Error from validating a state or a partial update against a [`StateSchema`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("field {field} expects {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        found: String,
    },

    #[error("node {node} does not own field {field}")]
    NotOwner { field: String, node: String },
}

/// Declared fields of a [`JsonState`].
///
/// ```
/// use stategraph::{FieldType, StateSchema};
///
/// let schema = StateSchema::new()
///     .field("input_data", FieldType::Object)
///     .owned_field("step1_result", FieldType::Object, &["step1"]);
/// assert!(schema.contains("step1_result"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateSchema {
    fields: BTreeMap<String, FieldSpec>,
}

impl StateSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field any node may write.
    pub fn field(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.owned_field(name, ty, &[])
    }

    /// Declares a field only `writers` may write.
    pub fn owned_field(mut self, name: impl Into<String>, ty: FieldType, writers: &[&str]) -> Self {
        self.fields.insert(
            name.into(),
            FieldSpec {
                ty,
                writers: writers.iter().map(|w| w.to_string()).collect(),
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    fn check_value(&self, field: &str, value: &Value) -> Result<&FieldSpec, SchemaError> {
        let spec = self.fields.get(field).ok_or_else(|| SchemaError::UnknownField {
            field: field.to_string(),
        })?;
        if !spec.ty.accepts(value) {
            return Err(SchemaError::TypeMismatch {
                field: field.to_string(),
                expected: spec.ty,
                found: FieldType::of(value).to_string(),
            });
        }
        Ok(spec)
    }
}

impl StateValidator<JsonState> for StateSchema {
    fn validate_input(&self, state: &JsonState) -> Result<(), SchemaError> {
        for (field, value) in state.iter() {
            self.check_value(field, value)?;
        }
        Ok(())
    }

    fn validate_update(&self, node_id: &str, update: &JsonState) -> Result<(), SchemaError> {
        for (field, value) in update.iter() {
            let spec = self.check_value(field, value)?;
            if !spec.writers.is_empty() && !spec.writers.iter().any(|w| w == node_id) {
                return Err(SchemaError::NotOwner {
                    field: field.clone(),
                    node: node_id.to_string(),
                });
            }
        }
        Ok(())
    }

    fn referenced_nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self
            .fields
            .values()
            .flat_map(|spec| spec.writers.iter().cloned())
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }
}
