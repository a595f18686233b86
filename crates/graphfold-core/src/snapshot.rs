//! JSON snapshot of a full graph, its hidden set and its layout

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompactionError, Result};
use crate::graph::{HidingGraph, PermanentGraph};
use crate::layout::PermanentLayout;
use crate::model::*;

/// Conventional snapshot file name.
pub const SNAPSHOT_FILE: &str = "graph.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub up: FullIndex,
    pub down: FullIndex,
    #[serde(rename = "type", default)]
    pub edge_type: EdgeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub ranks: Vec<usize>,
    pub heads: Vec<FullIndex>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeType>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(default)]
    pub hidden: Vec<FullIndex>,
    /// Defaults to the trivial layout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutRecord>,
}

impl GraphSnapshot {
    /// Capture a hiding graph and its layout.
    pub fn capture(graph: &HidingGraph, layout: &PermanentLayout) -> Self {
        let permanent = graph.permanent();
        GraphSnapshot {
            nodes: (0..permanent.node_count())
                .map(|i| permanent.node_type(FullIndex(i)).unwrap_or_default())
                .collect(),
            edges: permanent
                .edges()
                .map(|(up, down, edge_type)| EdgeRecord { up, down, edge_type })
                .collect(),
            hidden: graph.hidden_nodes(),
            layout: Some(LayoutRecord {
                ranks: layout.ranks().to_vec(),
                heads: layout.heads().to_vec(),
            }),
        }
    }

    /// Build the graph and layout this snapshot describes.
    pub fn into_parts(self) -> Result<(HidingGraph, PermanentLayout)> {
        let mut permanent = PermanentGraph::new();
        for node_type in &self.nodes {
            permanent.add_node(*node_type);
        }
        for edge in &self.edges {
            permanent
                .add_edge(edge.up, edge.down, edge.edge_type)
                .map_err(|e| {
                    let (up, down) = (edge.up, edge.down);
                    CompactionError::Snapshot(format!("edge {up} -> {down}: {e}"))
                })?;
        }

        let layout = match self.layout {
            Some(record) => PermanentLayout::new(record.ranks, record.heads)
                .map_err(|e| CompactionError::Snapshot(format!("layout: {e}")))?,
            None => PermanentLayout::trivial(self.nodes.len()),
        };
        if layout.ranks().len() != self.nodes.len() {
            return Err(CompactionError::Snapshot(format!(
                "layout covers {} nodes, graph has {}",
                layout.ranks().len(),
                self.nodes.len()
            )));
        }

        let graph = HidingGraph::with_hidden(permanent, &self.hidden)
            .map_err(|e| CompactionError::Snapshot(format!("hidden set: {e}")))?;
        Ok((graph, layout))
    }
}

/// Read a snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> anyhow::Result<GraphSnapshot> {
    let json_str = std::fs::read_to_string(path)?;
    let snapshot: GraphSnapshot = serde_json::from_str(&json_str)?;
    tracing::debug!("Snapshot loaded from: {}", path.display());
    Ok(snapshot)
}

/// Write a snapshot as pretty JSON, creating parent directories.
pub fn save_snapshot(snapshot: &GraphSnapshot, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json_str = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, json_str)?;
    tracing::debug!("Snapshot saved: {}", path.display());
    Ok(())
}
