//! Graphfold Core — dense renumbering of the visible part of a large graph
//!
//! A [`CompactionMap`] keeps an order-preserving bijection between full
//! indices and a dense short index space holding only visible nodes.
//! [`FilteredGraphView`] and [`TranslatedLayout`] read through it, and
//! visibility changes reach it through [`UpdateListener`].

pub mod compaction;
pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod model;
pub mod notify;
pub mod snapshot;
pub mod view;


#[cfg(test)]
pub mod test_utils;

pub use compaction::{CompactionMap, UpdateStats};
pub use config::{CompactionConfig, DEFAULT_BLOCK_SIZE};
pub use error::{CompactionError, Result};
pub use graph::{HiddenNodesGraph, HidingGraph, NodeVisibility, PermanentGraph};
pub use layout::{GraphLayout, PermanentLayout, TranslatedLayout};
pub use model::{EdgeType, FullIndex, IndexSpace, NodeType, ShortIndex};
pub use notify::{ListenerController, UpdateListener};
pub use snapshot::{EdgeRecord, GraphSnapshot, LayoutRecord, SNAPSHOT_FILE, load_snapshot, save_snapshot};
pub use view::FilteredGraphView;
