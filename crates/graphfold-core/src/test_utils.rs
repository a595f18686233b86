//! Test utilities for Graphfold

use crate::config::CompactionConfig;
use crate::graph::{HidingGraph, PermanentGraph};
use crate::layout::PermanentLayout;
use crate::model::*;
use crate::view::FilteredGraphView;

/// Five nodes, visible = {0, 2, 4}, with node 0 directly above node 2.
pub fn scenario_graph() -> HidingGraph {
    let mut graph = PermanentGraph::new();
    for _ in 0..5 {
        graph.add_node(NodeType::Usual);
    }
    graph.add_edge(FullIndex(0), FullIndex(2), EdgeType::Usual).unwrap();
    HidingGraph::with_hidden(graph, &[FullIndex(1), FullIndex(3)]).unwrap()
}

/// A single chain `0 -> 1 -> ... -> n-1`, hidden where `mask` is false.
pub fn chain_graph(mask: &[bool]) -> HidingGraph {
    let mut graph = PermanentGraph::new();
    for _ in mask {
        graph.add_node(NodeType::Usual);
    }
    for i in 1..mask.len() {
        graph.add_edge(FullIndex(i - 1), FullIndex(i), EdgeType::Usual).unwrap();
    }
    let hidden: Vec<FullIndex> = mask
        .iter()
        .enumerate()
        .filter(|(_, v)| !**v)
        .map(|(i, _)| FullIndex(i))
        .collect();
    HidingGraph::with_hidden(graph, &hidden).unwrap()
}

/// View over `graph` with a trivial layout and the given block size.
pub fn view_of(graph: HidingGraph, block_size: usize) -> FilteredGraphView<HidingGraph, PermanentLayout> {
    let layout = PermanentLayout::trivial(graph.permanent().node_count());
    let config = CompactionConfig::with_block_size(block_size).unwrap();
    FilteredGraphView::with_config(graph, layout, config).unwrap()
}

/// Deterministic pseudo-random source for sweeps.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Lcg(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn mask(&mut self, len: usize) -> Vec<bool> {
        (0..len).map(|_| self.next_u64() % 3 != 0).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeVisibility;

    #[test]
    fn test_chain_graph_hides_masked_nodes() {
        let graph = chain_graph(&[true, false, true]);
        assert_eq!(graph.nodes_count(), 3);
        assert!(!graph.node_is_visible(FullIndex(1)));
        assert_eq!(graph.permanent().edge_count(), 2);
    }

    #[test]
    fn test_lcg_is_deterministic() {
        let mut first = Lcg::new(7);
        let mut second = Lcg::new(7);
        let a: Vec<u64> = (0..4).map(|_| first.next_u64()).collect();
        let b: Vec<u64> = (0..4).map(|_| second.next_u64()).collect();
        assert_eq!(a, b);
    }
}
