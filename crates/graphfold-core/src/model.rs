//! Index newtypes and the node/edge classifications passed through the view

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a node in the unfiltered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FullIndex(pub usize);

/// Position of a node in the dense, visible-only space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct ShortIndex(pub usize);

impl fmt::Display for FullIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ShortIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which index space a bound check failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexSpace {
    Full,
    Short,
}

impl fmt::Display for IndexSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexSpace::Full => f.write_str("full"),
            IndexSpace::Short => f.write_str("short"),
        }
    }
}

/// Discriminates how a node is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    #[default]
    Usual,
    /// Kept for context although it does not match the active filter.
    Unmatched,
}

/// Discriminates how an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    #[default]
    Usual,
    /// Stands in for a path through collapsed nodes.
    Dotted,
}
