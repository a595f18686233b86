//! Topological layout over the full graph and its translation into short space

use tracing::debug;

use crate::compaction::CompactionMap;
use crate::error::{CompactionError, Result};
use crate::model::{FullIndex, IndexSpace, ShortIndex};

/// Layout computed externally over the full graph.
pub trait GraphLayout {
    /// Number of full-graph nodes the layout covers.
    fn nodes_count(&self) -> usize;
    /// Topological rank (layout index) of a node.
    fn rank_of(&self, node: FullIndex) -> usize;
    /// Head node of the layout branch the node belongs to.
    fn one_head_of(&self, node: FullIndex) -> FullIndex;
    /// Head node whose branch covers `rank`.
    fn head_of_rank(&self, rank: usize) -> FullIndex;
}

/// Layout given as explicit per-node ranks and heads.
#[derive(Debug, Clone, PartialEq)]
pub struct PermanentLayout {
    ranks: Vec<usize>,
    heads: Vec<FullIndex>,
    /// `(first rank, head)` per distinct head, sorted by rank.
    head_starts: Vec<(usize, FullIndex)>,
}

impl PermanentLayout {
    pub fn new(ranks: Vec<usize>, heads: Vec<FullIndex>) -> Result<Self> {
        if ranks.len() != heads.len() {
            return Err(CompactionError::Inconsistent {
                reason: format!("{} ranks for {} head entries", ranks.len(), heads.len()),
            });
        }

        let mut head_starts = Vec::new();
        for (node, &head) in heads.iter().enumerate() {
            if head.0 >= heads.len() {
                return Err(CompactionError::OutOfRange {
                    space: IndexSpace::Full,
                    index: head.0,
                    bound: heads.len(),
                });
            }
            if heads[head.0] != head {
                return Err(CompactionError::Inconsistent {
                    reason: format!("head {head} of node #{node} is not its own head"),
                });
            }
            if head.0 == node {
                head_starts.push((ranks[node], head));
            }
        }
        head_starts.sort();

        Ok(PermanentLayout {
            ranks,
            heads,
            head_starts,
        })
    }

    /// Every node is its own head and ranks follow full order.
    pub fn trivial(nodes_count: usize) -> Self {
        PermanentLayout {
            ranks: (0..nodes_count).collect(),
            heads: (0..nodes_count).map(FullIndex).collect(),
            head_starts: (0..nodes_count).map(|i| (i, FullIndex(i))).collect(),
        }
    }

    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    pub fn heads(&self) -> &[FullIndex] {
        &self.heads
    }
}

impl GraphLayout for PermanentLayout {
    fn nodes_count(&self) -> usize {
        self.ranks.len()
    }

    fn rank_of(&self, node: FullIndex) -> usize {
        self.ranks[node.0]
    }

    fn one_head_of(&self, node: FullIndex) -> FullIndex {
        self.heads[node.0]
    }

    fn head_of_rank(&self, rank: usize) -> FullIndex {
        let after = self.head_starts.partition_point(|&(start, _)| start <= rank);
        self.head_starts
            .get(after.saturating_sub(1))
            .map(|&(_, head)| head)
            .unwrap_or_default()
    }
}

/// A full-space layout re-expressed over short indices.
///
/// A hidden head node is replaced by the nearest visible node at or after it
/// in full order.
pub struct TranslatedLayout<'a, L: ?Sized> {
    layout: &'a L,
    map: &'a CompactionMap,
}

impl<'a, L: GraphLayout + ?Sized> TranslatedLayout<'a, L> {
    pub fn new(layout: &'a L, map: &'a CompactionMap) -> Self {
        TranslatedLayout { layout, map }
    }

    pub fn rank_of(&self, node: ShortIndex) -> Result<usize> {
        let long = self.map.long_index(node)?;
        Ok(self.layout.rank_of(long))
    }

    pub fn one_head_of(&self, node: ShortIndex) -> Result<ShortIndex> {
        let long = self.map.long_index(node)?;
        self.visible_head(self.layout.one_head_of(long))
    }

    pub fn head_of_rank(&self, rank: usize) -> Result<ShortIndex> {
        self.visible_head(self.layout.head_of_rank(rank))
    }

    fn visible_head(&self, head: FullIndex) -> Result<ShortIndex> {
        if self.map.is_visible(head)? {
            return self.map.short_index(head);
        }
        let next = self.map.visible_before(head)?;
        if next.0 >= self.map.short_size() {
            return Err(CompactionError::HeadNodeUnavailable { head });
        }
        debug!("Head node {} is hidden, using short index {}", head, next);
        Ok(next)
    }
}
