//! Graph adapter over the dense visible space

use crate::compaction::CompactionMap;
use crate::config::CompactionConfig;
use crate::error::{CompactionError, Result};
use crate::graph::{HiddenNodesGraph, NodeVisibility};
use crate::layout::{GraphLayout, TranslatedLayout};
use crate::model::*;
use crate::notify::ListenerController;

/// The full graph restricted to visible nodes, renumbered densely.
///
/// The view owns the graph, its layout and the compaction map. Queries borrow
/// the map immutably; visibility changes go through [`FilteredGraphView::modify`],
/// which is the only place the map is borrowed mutably.
pub struct FilteredGraphView<G, L> {
    graph: G,
    layout: L,
    map: CompactionMap,
}

impl<G, L> std::fmt::Debug for FilteredGraphView<G, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilteredGraphView")
            .field("nodes_count", &self.map.short_size())
            .field("full_nodes_count", &self.map.long_size())
            .finish()
    }
}

impl<G: HiddenNodesGraph, L: GraphLayout> FilteredGraphView<G, L> {
    pub fn new(graph: G, layout: L) -> Result<Self> {
        Self::with_config(graph, layout, CompactionConfig::default())
    }

    /// Fails with `Inconsistent` when the layout does not cover exactly the
    /// graph's nodes.
    pub fn with_config(graph: G, layout: L, config: CompactionConfig) -> Result<Self> {
        if layout.nodes_count() != graph.nodes_count() {
            return Err(CompactionError::Inconsistent {
                reason: format!(
                    "layout covers {} nodes, graph has {}",
                    layout.nodes_count(),
                    graph.nodes_count()
                ),
            });
        }
        let map = CompactionMap::new(graph.nodes_count(), |i| graph.node_is_visible(i), config)?;
        Ok(FilteredGraphView { graph, layout, map })
    }

    /// Number of visible nodes.
    pub fn nodes_count(&self) -> usize {
        self.map.short_size()
    }

    pub fn node_type(&self, node: ShortIndex) -> Result<NodeType> {
        Ok(self.graph.node_type(self.map.long_index(node)?))
    }

    pub fn edge_type(&self, up: ShortIndex, down: ShortIndex) -> Result<Option<EdgeType>> {
        let up = self.map.long_index(up)?;
        let down = self.map.long_index(down)?;
        Ok(self.graph.edge_type(up, down))
    }

    pub fn up_nodes(&self, node: ShortIndex) -> Result<Vec<ShortIndex>> {
        let long = self.map.long_index(node)?;
        self.to_short(self.graph.up_nodes(long))
    }

    pub fn down_nodes(&self, node: ShortIndex) -> Result<Vec<ShortIndex>> {
        let long = self.map.long_index(node)?;
        self.to_short(self.graph.down_nodes(long))
    }

    pub fn layout(&self) -> TranslatedLayout<'_, L> {
        TranslatedLayout::new(&self.layout, &self.map)
    }

    /// Raw long/short translation.
    pub fn compaction(&self) -> &CompactionMap {
        &self.map
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Run `f` with mutable access to the full graph and a listener controller
    /// that already has this view's compaction map registered. Every change the
    /// graph reports through the controller is applied before `notify` returns.
    pub fn modify<R>(&mut self, f: impl FnOnce(&mut G, &mut ListenerController<'_>) -> R) -> R {
        let mut listeners = ListenerController::new();
        listeners.add_listener(&mut self.map);
        f(&mut self.graph, &mut listeners)
    }

    /// Verify the compaction against the graph's current visibility.
    pub fn check_consistency(&self) -> Result<()> {
        self.map.check_consistency(|i| self.graph.node_is_visible(i))
    }

    fn to_short(&self, nodes: Vec<FullIndex>) -> Result<Vec<ShortIndex>> {
        nodes
            .into_iter()
            .map(|n| self.map.short_index(n))
            .collect()
    }
}
