//! State graph: nodes + static and conditional edges.
//!
//! Add nodes with `add_node`, connect them with `add_edge(from, to)` or
//! `add_conditional_edges(from, router)` using `START` and `END` for graph
//! entry/exit, then `compile` or `compile_with_checkpointer` to get a
//! `CompiledStateGraph`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::error::NodeError;
use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::edge::Edge;
use crate::graph::logging::{log_static_cycle, log_unreachable_nodes};
use crate::graph::node::{FnNode, Node};
use crate::graph::router::{FnRouter, Router};
use crate::memory::Checkpointer;
use crate::state::{GraphState, JsonState, StateSchema, StateValidator};

/// Sentinel for graph entry: use as `from` in `add_edge(START, first_node_id)`.
pub const START: &str = "__start__";

/// Sentinel for graph exit: use as `to` in `add_edge(last_node_id, END)`, or return it from a router.
pub const END: &str = "__end__";

/// State graph: nodes plus at most one outgoing edge specification per node.
///
/// Generic over state type `S`. Build with `add_node` / `add_edge` /
/// `add_conditional_edges`, then `compile()` to obtain an executable graph.
/// A node without an outgoing edge ends the run when it completes.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>` and routers; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S>
where
    S: GraphState,
{
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Outgoing edge per source id (START included).
    edges: HashMap<String, Edge<S>>,
    validator: Option<Arc<dyn StateValidator<S>>>,
    /// Every error a builder method returned; `compile` fails with the first.
    errors: Vec<CompilationError>,
}

impl<S> Default for StateGraph<S>
where
    S: GraphState,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: GraphState,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            validator: None,
            errors: Vec::new(),
        }
    }

    /// Attaches a validator run on the initial state and on every node's partial state.
    pub fn with_validator(self, validator: Arc<dyn StateValidator<S>>) -> Self {
        Self {
            validator: Some(validator),
            ..self
        }
    }

    /// Adds a node under `id`. Fails with `DuplicateNode` if `id` is taken.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        node: Arc<dyn Node<S>>,
    ) -> Result<&mut Self, CompilationError> {
        let id = id.into();
        if id == START || id == END {
            return Err(self.record(CompilationError::ReservedName(id)));
        }
        if self.nodes.contains_key(&id) {
            return Err(self.record(CompilationError::DuplicateNode(id)));
        }
        self.nodes.insert(id, node);
        Ok(self)
    }

    /// Adds a node from a synchronous function of the state.
    pub fn add_fn_node<F>(
        &mut self,
        id: impl Into<String>,
        f: F,
    ) -> Result<&mut Self, CompilationError>
    where
        F: Fn(&S) -> Result<S::Update, NodeError> + Send + Sync + 'static,
    {
        self.add_node(id, Arc::new(FnNode::new(f)))
    }

    /// Adds a static edge from `from` to `to`.
    ///
    /// Use `START` for graph entry and `END` for graph exit. Both ids (except
    /// START/END) must be registered via `add_node` before `compile()`.
    /// Fails with `ConflictingEdge` if `from` already has an edge; the existing
    /// edge is dropped too.
    pub fn add_edge(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<&mut Self, CompilationError> {
        let to = to.into();
        if to == START {
            return Err(self.record(CompilationError::InvalidEdge(format!("edge into {}", START))));
        }
        self.insert_edge(from.into(), Edge::Static(to))
    }

    /// Same as `add_edge(START, id)`.
    pub fn set_entry_point(&mut self, id: impl Into<String>) -> Result<&mut Self, CompilationError> {
        self.add_edge(START, id)
    }

    /// Same as `add_edge(id, END)`.
    pub fn set_finish_point(&mut self, id: impl Into<String>) -> Result<&mut Self, CompilationError> {
        self.add_edge(id, END)
    }

    /// Adds a conditional edge: after `from` completes, `router` picks the next node
    /// id (or `END`) from the merged state. `from` may be `START` to route on the
    /// initial state.
    pub fn add_conditional_edges<F, R>(
        &mut self,
        from: impl Into<String>,
        router: F,
    ) -> Result<&mut Self, CompilationError>
    where
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: Into<String>,
    {
        self.add_conditional_router(from, Self::wrap_router(router), None)
    }

    /// Like `add_conditional_edges`, but `router` returns a key of `path_map` and the
    /// mapped value is the next node id (or `END`). Map values are checked at compile time.
    pub fn add_conditional_edges_with_map<F, R, K, V>(
        &mut self,
        from: impl Into<String>,
        router: F,
        path_map: impl IntoIterator<Item = (K, V)>,
    ) -> Result<&mut Self, CompilationError>
    where
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: Into<String>,
        K: Into<String>,
        V: Into<String>,
    {
        let path_map = path_map
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.add_conditional_router(from, Self::wrap_router(router), Some(path_map))
    }

    /// Adds a conditional edge driven by a [`Router`] implementation (e.g. one that can fail).
    pub fn add_conditional_router(
        &mut self,
        from: impl Into<String>,
        router: Arc<dyn Router<S>>,
        path_map: Option<HashMap<String, String>>,
    ) -> Result<&mut Self, CompilationError> {
        self.insert_edge(from.into(), Edge::Conditional { router, path_map })
    }

    /// Builds the executable graph without persistence.
    ///
    /// Returns the first error a builder method recorded, `MissingStart` when no
    /// edge leaves START, or `NodeNotFound` for any edge endpoint, path-map target
    /// or validator-referenced node that is not registered. Cycles and unreachable
    /// nodes are only logged.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(None)
    }

    /// Builds the executable graph with a checkpointer: every node's merged state is
    /// saved under `RunnableConfig::run_id`, and `resume` becomes available.
    pub fn compile_with_checkpointer(
        self,
        checkpointer: Arc<dyn Checkpointer<S>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        self.compile_internal(Some(checkpointer))
    }

    fn wrap_router<F, R>(router: F) -> Arc<dyn Router<S>>
    where
        F: Fn(&S) -> R + Send + Sync + 'static,
        R: Into<String>,
    {
        Arc::new(FnRouter::new(move |state: &S| -> String { router(state).into() }))
    }

    fn record(&mut self, err: CompilationError) -> CompilationError {
        self.errors.push(err.clone());
        err
    }

    fn insert_edge(&mut self, from: String, edge: Edge<S>) -> Result<&mut Self, CompilationError> {
        if from == END {
            return Err(self.record(CompilationError::InvalidEdge(format!("edge from {}", END))));
        }
        if self.edges.remove(&from).is_some() {
            return Err(self.record(CompilationError::ConflictingEdge(from)));
        }
        self.edges.insert(from, edge);
        Ok(self)
    }

    fn check_target(&self, target: &str) -> Result<(), CompilationError> {
        if target != END && !self.nodes.contains_key(target) {
            return Err(CompilationError::NodeNotFound(target.to_string()));
        }
        Ok(())
    }

    fn compile_internal(
        self,
        checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    ) -> Result<CompiledStateGraph<S>, CompilationError> {
        if let Some(err) = self.errors.first() {
            return Err(err.clone());
        }
        if !self.edges.contains_key(START) {
            return Err(CompilationError::MissingStart);
        }

        let mut sources: Vec<&String> = self.edges.keys().collect();
        sources.sort();
        for from in sources {
            if from != START && !self.nodes.contains_key(from) {
                return Err(CompilationError::NodeNotFound(from.clone()));
            }
            if let Some(mut targets) = self.edges[from].known_targets() {
                targets.sort();
                for target in targets {
                    self.check_target(target)?;
                }
            }
        }
        if let Some(validator) = &self.validator {
            for id in validator.referenced_nodes() {
                if !self.nodes.contains_key(&id) {
                    return Err(CompilationError::NodeNotFound(id));
                }
            }
        }

        let cyclic = self.static_cycle_nodes();
        if !cyclic.is_empty() {
            log_static_cycle(&cyclic);
        }
        let unreachable = self.unreachable_nodes();
        if !unreachable.is_empty() {
            log_unreachable_nodes(&unreachable);
        }

        Ok(CompiledStateGraph {
            nodes: self.nodes,
            edges: self.edges,
            validator: self.validator,
            checkpointer,
        })
    }

    fn static_successor(&self, id: &str) -> Option<&str> {
        match self.edges.get(id) {
            Some(Edge::Static(to)) if to != END => Some(to.as_str()),
            _ => None,
        }
    }

    /// Nodes lying on a cycle made only of static edges, sorted.
    pub(crate) fn static_cycle_nodes(&self) -> Vec<String> {
        let mut on_cycle: Vec<String> = self
            .nodes
            .keys()
            .filter(|start| {
                let mut current = self.static_successor(start);
                for _ in 0..self.nodes.len() {
                    match current {
                        Some(id) if id == start.as_str() => return true,
                        Some(id) => current = self.static_successor(id),
                        None => return false,
                    }
                }
                false
            })
            .cloned()
            .collect();
        on_cycle.sort();
        on_cycle
    }

    /// Nodes no path from START reaches, sorted. Empty when a reachable conditional
    /// edge has no path map, since its router may return any node.
    pub(crate) fn unreachable_nodes(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([START]);
        while let Some(id) = queue.pop_front() {
            let Some(edge) = self.edges.get(id) else {
                continue;
            };
            let Some(targets) = edge.known_targets() else {
                return Vec::new();
            };
            for target in targets {
                if target != END && seen.insert(target) {
                    queue.push_back(target);
                }
            }
        }
        let mut unreachable: Vec<String> = self
            .nodes
            .keys()
            .filter(|id| !seen.contains(id.as_str()))
            .cloned()
            .collect();
        unreachable.sort();
        unreachable
    }
}

impl StateGraph<JsonState> {
    /// Validates the initial state and every node update against `schema`.
    pub fn with_schema(self, schema: StateSchema) -> Self {
        self.with_validator(Arc::new(schema))
    }
}
