//! CLI command implementations

use anyhow::Context;
use graphfold_core::{
    CompactionConfig, FilteredGraphView, FullIndex, HidingGraph, PermanentLayout, ShortIndex,
    load_snapshot,
};
use std::path::Path;

type View = FilteredGraphView<HidingGraph, PermanentLayout>;

pub fn load_config(path: Option<&Path>) -> anyhow::Result<CompactionConfig> {
    let Some(path) = path else {
        return Ok(CompactionConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = CompactionConfig::from_toml_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!("Block size {} from {}", config.block_size, path.display());
    Ok(config)
}

fn open_view(path: &Path, config: CompactionConfig) -> anyhow::Result<View> {
    let snapshot = load_snapshot(path).with_context(|| format!("loading {}", path.display()))?;
    let (graph, layout) = snapshot.into_parts()?;
    let view = FilteredGraphView::with_config(graph, layout, config)?;
    tracing::info!(
        "Loaded {}: {} of {} nodes visible",
        path.display(),
        view.nodes_count(),
        view.compaction().long_size()
    );
    Ok(view)
}

pub fn show(path: &Path, config: CompactionConfig, reveal: &[usize], hide: &[usize]) -> anyhow::Result<()> {
    let mut view = open_view(path, config)?;

    let reveal: Vec<FullIndex> = reveal.iter().copied().map(FullIndex).collect();
    let hide: Vec<FullIndex> = hide.iter().copied().map(FullIndex).collect();
    view.modify(|graph, listeners| -> graphfold_core::Result<()> {
        graph.set_visible(&reveal, true, listeners)?;
        graph.set_visible(&hide, false, listeners)
    })?;

    println!(
        "visible {} of {} nodes",
        view.nodes_count(),
        view.compaction().long_size()
    );
    println!("{:<6} {:<6} {:<10} {:<5} {:<5} {:<12} {}", "short", "full", "type", "rank", "head", "up", "down");

    let layout = view.layout();
    for s in 0..view.nodes_count() {
        let short = ShortIndex(s);
        let long = view.compaction().long_index(short)?;
        let head = match layout.one_head_of(short) {
            Ok(head) => head.to_string(),
            Err(e) => {
                tracing::warn!("No head for {}: {}", short, e);
                "-".to_string()
            }
        };
        println!(
            "{:<6} {:<6} {:<10} {:<5} {:<5} {:<12} {}",
            s,
            long.to_string(),
            format!("{:?}", view.node_type(short)?).to_lowercase(),
            layout.rank_of(short)?,
            head,
            join(&view.up_nodes(short)?),
            join(&view.down_nodes(short)?)
        );
    }
    Ok(())
}

pub fn check(path: &Path, config: CompactionConfig) -> anyhow::Result<()> {
    let view = open_view(path, config)?;
    view.check_consistency()
        .with_context(|| format!("checking {}", path.display()))?;
    println!(
        "ok: {} nodes, {} visible, block size {}",
        view.compaction().long_size(),
        view.nodes_count(),
        view.compaction().block_size()
    );
    Ok(())
}

fn join(nodes: &[ShortIndex]) -> String {
    let parts: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
    format!("[{}]", parts.join(","))
}
