//! The full graph as seen by the compaction layer, plus a petgraph-backed
//! reference implementation with per-node visibility.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::error::{CompactionError, Result};
use crate::model::*;
use crate::notify::ListenerController;

/// Source of the visibility predicate.
pub trait NodeVisibility {
    fn nodes_count(&self) -> usize;
    fn node_is_visible(&self, node: FullIndex) -> bool;
}

/// Full graph whose adjacency never exposes a hidden node to a visible one.
pub trait HiddenNodesGraph: NodeVisibility {
    fn node_type(&self, node: FullIndex) -> NodeType;
    /// `None` when no edge joins the pair.
    fn edge_type(&self, up: FullIndex, down: FullIndex) -> Option<EdgeType>;
    /// Neighbors above `node`, in adjacency order.
    fn up_nodes(&self, node: FullIndex) -> Vec<FullIndex>;
    /// Neighbors below `node`, in adjacency order.
    fn down_nodes(&self, node: FullIndex) -> Vec<FullIndex>;
}

/// Immutable full graph. Node weights are dense: the petgraph node index is the
/// full index. An edge runs from an upper node to a lower one.
#[derive(Clone, Default)]
pub struct PermanentGraph {
    inner: DiGraph<NodeType, EdgeType>,
}

impl std::fmt::Debug for PermanentGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermanentGraph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl PermanentGraph {
    pub fn new() -> Self {
        PermanentGraph {
            inner: DiGraph::new(),
        }
    }

    /// Add a node. Returns its full index.
    pub fn add_node(&mut self, node_type: NodeType) -> FullIndex {
        FullIndex(self.inner.add_node(node_type).index())
    }

    /// Add an edge from `up` to `down`.
    pub fn add_edge(&mut self, up: FullIndex, down: FullIndex, edge_type: EdgeType) -> Result<()> {
        self.check(up)?;
        self.check(down)?;
        self.inner
            .add_edge(NodeIndex::new(up.0), NodeIndex::new(down.0), edge_type);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn node_type(&self, node: FullIndex) -> Option<NodeType> {
        self.inner.node_weight(NodeIndex::new(node.0)).copied()
    }

    pub fn edge_type(&self, up: FullIndex, down: FullIndex) -> Option<EdgeType> {
        self.inner
            .find_edge(NodeIndex::new(up.0), NodeIndex::new(down.0))
            .and_then(|e| self.inner.edge_weight(e))
            .copied()
    }

    /// All edges as `(up, down, type)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (FullIndex, FullIndex, EdgeType)> + '_ {
        self.inner.edge_references().map(|e| {
            (
                FullIndex(e.source().index()),
                FullIndex(e.target().index()),
                *e.weight(),
            )
        })
    }

    /// Neighbors in one direction, in edge insertion order.
    fn neighbors(&self, node: FullIndex, direction: Direction) -> Vec<FullIndex> {
        if node.0 >= self.inner.node_count() {
            return Vec::new();
        }
        // petgraph walks the adjacency list newest-first.
        let mut nodes: Vec<FullIndex> = self
            .inner
            .neighbors_directed(NodeIndex::new(node.0), direction)
            .map(|n| FullIndex(n.index()))
            .collect();
        nodes.reverse();
        nodes
    }

    fn check(&self, node: FullIndex) -> Result<()> {
        if node.0 >= self.inner.node_count() {
            return Err(CompactionError::OutOfRange {
                space: IndexSpace::Full,
                index: node.0,
                bound: self.inner.node_count(),
            });
        }
        Ok(())
    }
}

/// A permanent graph plus a mutable visibility flag per node.
#[derive(Debug, Clone)]
pub struct HidingGraph {
    graph: PermanentGraph,
    visible: Vec<bool>,
}

impl HidingGraph {
    /// Every node starts visible.
    pub fn new(graph: PermanentGraph) -> Self {
        let visible = vec![true; graph.node_count()];
        HidingGraph { graph, visible }
    }

    pub fn with_hidden(graph: PermanentGraph, hidden: &[FullIndex]) -> Result<Self> {
        let mut hiding = HidingGraph::new(graph);
        for &node in hidden {
            hiding.graph.check(node)?;
            hiding.visible[node.0] = false;
        }
        Ok(hiding)
    }

    pub fn permanent(&self) -> &PermanentGraph {
        &self.graph
    }

    pub fn hidden_nodes(&self) -> Vec<FullIndex> {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, v)| !**v)
            .map(|(i, _)| FullIndex(i))
            .collect()
    }

    /// Set visibility for `nodes` and report the tight enclosing range to
    /// `listeners`. Nothing is dispatched when `nodes` is empty.
    pub fn set_visible(
        &mut self,
        nodes: &[FullIndex],
        visible: bool,
        listeners: &mut ListenerController<'_>,
    ) -> Result<()> {
        for &node in nodes {
            self.graph.check(node)?;
        }
        let (Some(&up), Some(&down)) = (nodes.iter().min(), nodes.iter().max()) else {
            return Ok(());
        };
        for &node in nodes {
            self.visible[node.0] = visible;
        }
        listeners.notify(&*self, up, down)
    }
}

impl NodeVisibility for HidingGraph {
    fn nodes_count(&self) -> usize {
        self.visible.len()
    }

    fn node_is_visible(&self, node: FullIndex) -> bool {
        self.visible.get(node.0).copied().unwrap_or(false)
    }
}

impl HiddenNodesGraph for HidingGraph {
    /// `node` must be below `nodes_count()`; the view only passes indices
    /// it got back from its compaction map.
    fn node_type(&self, node: FullIndex) -> NodeType {
        debug_assert!(node.0 < self.visible.len(), "node {node} out of range");
        self.graph.node_type(node).unwrap_or_default()
    }

    fn edge_type(&self, up: FullIndex, down: FullIndex) -> Option<EdgeType> {
        self.graph.edge_type(up, down)
    }

    fn up_nodes(&self, node: FullIndex) -> Vec<FullIndex> {
        self.graph
            .neighbors(node, Direction::Incoming)
            .into_iter()
            .filter(|&n| self.node_is_visible(n))
            .collect()
    }

    fn down_nodes(&self, node: FullIndex) -> Vec<FullIndex> {
        self.graph
            .neighbors(node, Direction::Outgoing)
            .into_iter()
            .filter(|&n| self.node_is_visible(n))
            .collect()
    }
}
