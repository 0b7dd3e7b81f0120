//! Map-backed shared state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::GraphState;

/// Shared state as a mapping from field name to JSON value.
///
/// A field that no node has written yet is absent. The partial state a node
/// returns is itself a `JsonState` holding only the fields it writes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonState(Map<String, Value>);

impl JsonState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns the state with `field` set to `value`. Builder form of [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Sets `field`, returning the previous value if it was written.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Looks up a nested value, e.g. `lookup(&["step1_result", "needs_analysis"])`.
    pub fn lookup(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.0.get(*first)?;
        for key in rest {
            current = current.get(*key)?;
        }
        Some(current)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl GraphState for JsonState {
    type Update = JsonState;

    fn merge(&mut self, update: JsonState) {
        for (field, value) in update.0 {
            self.0.insert(field, value);
        }
    }
}

impl From<Map<String, Value>> for JsonState {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for JsonState {
    type Error = Value;

    /// Accepts a JSON object; hands any other value back unchanged.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

impl From<JsonState> for Value {
    fn from(state: JsonState) -> Self {
        Value::Object(state.0)
    }
}
