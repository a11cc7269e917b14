//! Dependency graph reconstructed from a dumped state.
//!
//! Nodes are deduplicated by name: the first time a name is seen it gets the
//! next id and the kind it was seen as, and keeps both for the rest of the
//! build. Edges live in per-source sets, so repeating an edge is a no-op.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use krt_debug_core::DumpedState;

use crate::mermaid::{MermaidBuilder, Shape};
use crate::options::RenderOptions;

/// Per-build node identifier. Starts at 1, in first-encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn get(self) -> usize {
        self.0
    }

    fn index(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Only known because something depends on it
    Plain,
    /// A collection that contributed its own dump
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
}

impl Node {
    pub fn label(&self) -> String {
        self.id.to_string()
    }

    pub fn shape(&self) -> Shape {
        match self.kind {
            NodeKind::Plain => Shape::Box,
            NodeKind::Collection => Shape::Subroutine,
        }
    }
}

type EdgeSet = BTreeMap<NodeId, BTreeSet<NodeId>>;

/// Collection dependency graph with primary (whole collection) and
/// secondary (per item) edges.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
    by_name: HashMap<String, NodeId>,
    primary: EdgeSet,
    secondary: EdgeSet,
}

impl DependencyGraph {
    /// Build the graph for `state`.
    ///
    /// Collections without an input collection are skipped entirely, inputs
    /// and all; they can still show up as plain nodes when another collection
    /// depends on them.
    pub fn build(state: &DumpedState) -> Self {
        let mut graph = Self::default();

        for named in state {
            let dump = &named.state;
            if !dump.has_input_collection() {
                continue;
            }

            let this = graph.intern(&named.name, NodeKind::Collection);
            let primary = graph.intern(&dump.input_collection, NodeKind::Plain);
            graph.primary.entry(this).or_default().insert(primary);

            for input in dump.inputs.values() {
                for dep in &input.dependencies {
                    let dep = graph.intern(dep, NodeKind::Plain);
                    graph.secondary.entry(this).or_default().insert(dep);
                }
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            primary_edges = graph.primary_edge_count(),
            secondary_edges = graph.secondary_edge_count(),
            "built dependency graph"
        );
        graph
    }

    fn intern(&mut self, name: &str, kind: NodeKind) -> NodeId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = NodeId(self.nodes.len() + 1);
        self.nodes.push(Node {
            id,
            kind,
            name: name.to_string(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.by_name.get(name).and_then(|&id| self.node(id))
    }

    /// Primary edges as (dependent, dependency) pairs.
    pub fn primary_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        flatten(&self.primary)
    }

    /// Secondary edges as (dependent, dependency) pairs.
    pub fn secondary_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        flatten(&self.secondary)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn primary_edge_count(&self) -> usize {
        self.primary.values().map(BTreeSet::len).sum()
    }

    pub fn secondary_edge_count(&self) -> usize {
        self.secondary.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render as a Mermaid flowchart: primary edges, then secondary edges,
    /// then one declaration per node.
    pub fn render(&self, options: &RenderOptions) -> String {
        let mut builder = MermaidBuilder::new(options.direction);

        for (from, to) in self.primary_edges() {
            builder.edge(&from.to_string(), &to.to_string());
        }
        for (from, to) in self.secondary_edges() {
            builder.dotted_edge(&from.to_string(), &to.to_string());
        }
        for node in &self.nodes {
            builder.node(&node.label(), &node.name, node.shape());
        }

        builder.build()
    }
}

fn flatten(edges: &EdgeSet) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
    edges
        .iter()
        .flat_map(|(&from, targets)| targets.iter().map(move |&to| (from, to)))
}
