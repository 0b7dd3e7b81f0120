//! Outgoing edge specification of a node.

use std::collections::HashMap;
use std::sync::Arc;

use super::router::Router;

/// What follows a node. A source has at most one of these.
pub(crate) enum Edge<S> {
    /// Fixed destination (node id or END).
    Static(String),
    /// Destination chosen by `router`; when `path_map` is set, the router's result is
    /// a key translated through it.
    Conditional {
        router: Arc<dyn Router<S>>,
        path_map: Option<HashMap<String, String>>,
    },
}

impl<S> Clone for Edge<S> {
    fn clone(&self) -> Self {
        match self {
            Edge::Static(to) => Edge::Static(to.clone()),
            Edge::Conditional { router, path_map } => Edge::Conditional {
                router: router.clone(),
                path_map: path_map.clone(),
            },
        }
    }
}

impl<S> Edge<S> {
    /// Destinations known without running the router. `None` when any id is possible.
    pub(crate) fn known_targets(&self) -> Option<Vec<&str>> {
        match self {
            Edge::Static(to) => Some(vec![to.as_str()]),
            Edge::Conditional {
                path_map: Some(map),
                ..
            } => Some(map.values().map(String::as_str).collect()),
            Edge::Conditional { path_map: None, .. } => None,
        }
    }
}
