//! Order-preserving bijection between full indices and the dense visible space
//!
//! The map keeps a snapshot of node visibility and, for every block of
//! `block_size` full indices, the number of visible nodes up to the end of that
//! block. Lookups binary-search the block sums and scan inside one block.
//! Updates re-read the predicate only over the changed range, recount the blocks
//! that overlap it and shift the sums of every later block by the net delta.

use tracing::debug;

use crate::config::CompactionConfig;
use crate::error::{CompactionError, Result};
use crate::model::{FullIndex, IndexSpace, ShortIndex};

/// Operation counts for one `update` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateStats {
    /// Predicate evaluations; always the length of the update range.
    pub predicate_calls: usize,
    /// Blocks whose counts were recomputed from the snapshot.
    pub blocks_rebuilt: usize,
    /// Later blocks whose cumulative sum was shifted.
    pub blocks_shifted: usize,
    /// Net change in the number of visible nodes.
    pub delta: isize,
}

#[derive(Debug, Clone)]
pub struct CompactionMap {
    visible: Vec<bool>,
    /// `block_sums[b]` is the visible count in `[0, (b + 1) * block_size)`.
    block_sums: Vec<usize>,
    block_size: usize,
}

impl CompactionMap {
    /// Enumerate every visible full index in increasing order.
    pub fn new(
        total_count: usize,
        predicate: impl Fn(FullIndex) -> bool,
        config: CompactionConfig,
    ) -> Result<Self> {
        config.validate()?;
        let block_size = config.block_size;
        let visible: Vec<bool> = (0..total_count).map(|i| predicate(FullIndex(i))).collect();

        let mut block_sums = Vec::with_capacity(total_count.div_ceil(block_size));
        let mut sum = 0;
        for block in visible.chunks(block_size) {
            sum += block.iter().filter(|&&v| v).count();
            block_sums.push(sum);
        }

        let map = CompactionMap {
            visible,
            block_sums,
            block_size,
        };
        debug!(
            "Compaction built: {} nodes, {} visible, {} blocks",
            map.long_size(),
            map.short_size(),
            map.block_sums.len()
        );
        Ok(map)
    }

    /// Number of currently visible nodes (S).
    pub fn short_size(&self) -> usize {
        self.block_sums.last().copied().unwrap_or(0)
    }

    /// Number of nodes in the full graph (N).
    pub fn long_size(&self) -> usize {
        self.visible.len()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Visibility as last observed by construction or `update`.
    pub fn is_visible(&self, long: FullIndex) -> Result<bool> {
        self.check_long(long)?;
        Ok(self.visible[long.0])
    }

    /// Short index of a visible node. Fails for hidden nodes instead of
    /// returning a sentinel.
    pub fn short_index(&self, long: FullIndex) -> Result<ShortIndex> {
        self.check_long(long)?;
        if !self.visible[long.0] {
            return Err(CompactionError::InvisibleIndexQueried(long));
        }
        Ok(self.count_before(long.0))
    }

    /// Full index of the node at `short` in the dense space.
    pub fn long_index(&self, short: ShortIndex) -> Result<FullIndex> {
        let size = self.short_size();
        if short.0 >= size {
            return Err(CompactionError::OutOfRange {
                space: IndexSpace::Short,
                index: short.0,
                bound: size,
            });
        }

        // First block whose running total passes `short`.
        let block = self.block_sums.partition_point(|&sum| sum <= short.0);
        let mut remaining = short.0 - self.sum_before_block(block);
        let start = block * self.block_size;
        let end = (start + self.block_size).min(self.visible.len());
        for i in start..end {
            if self.visible[i] {
                if remaining == 0 {
                    return Ok(FullIndex(i));
                }
                remaining -= 1;
            }
        }

        Err(CompactionError::Inconsistent {
            reason: format!("block {block} holds fewer visible nodes than its sum claims"),
        })
    }

    /// Number of visible nodes strictly before `long`, i.e. the short index the
    /// node would get if it were visible. Accepts `long == N`.
    pub fn visible_before(&self, long: FullIndex) -> Result<ShortIndex> {
        if long.0 > self.visible.len() {
            return Err(CompactionError::OutOfRange {
                space: IndexSpace::Full,
                index: long.0,
                bound: self.visible.len() + 1,
            });
        }
        Ok(self.count_before(long.0))
    }

    /// Re-read visibility over the inclusive range `[start, end]` and repair
    /// the block sums.
    pub fn update(
        &mut self,
        start: FullIndex,
        end: FullIndex,
        predicate: impl Fn(FullIndex) -> bool,
    ) -> Result<UpdateStats> {
        let nodes = self.visible.len();
        if start > end || end.0 >= nodes {
            return Err(CompactionError::InvalidUpdateRange {
                start: start.0,
                end: end.0,
                nodes,
            });
        }

        for i in start.0..=end.0 {
            self.visible[i] = predicate(FullIndex(i));
        }

        let first_block = start.0 / self.block_size;
        let last_block = end.0 / self.block_size;
        let old_last_sum = self.block_sums[last_block];

        let mut sum = self.sum_before_block(first_block);
        for block in first_block..=last_block {
            let block_start = block * self.block_size;
            let block_end = (block_start + self.block_size).min(nodes);
            sum += self.visible[block_start..block_end].iter().filter(|&&v| v).count();
            self.block_sums[block] = sum;
        }

        let delta = sum as isize - old_last_sum as isize;
        let mut blocks_shifted = 0;
        if delta != 0 {
            for block_sum in &mut self.block_sums[last_block + 1..] {
                *block_sum = block_sum.wrapping_add_signed(delta);
                blocks_shifted += 1;
            }
        }

        let stats = UpdateStats {
            predicate_calls: end.0 - start.0 + 1,
            blocks_rebuilt: last_block - first_block + 1,
            blocks_shifted,
            delta,
        };
        debug!(
            "Compaction updated [{}, {}]: delta {}, {} blocks rebuilt, {} shifted, {} visible",
            start.0,
            end.0,
            delta,
            stats.blocks_rebuilt,
            stats.blocks_shifted,
            self.short_size()
        );
        Ok(stats)
    }

    /// Visible full indices in short order.
    pub fn iter(&self) -> impl Iterator<Item = FullIndex> + '_ {
        self.visible
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| FullIndex(i))
    }

    /// Full scan of every invariant against `predicate`. Not part of the
    /// incremental path.
    pub fn check_consistency(&self, predicate: impl Fn(FullIndex) -> bool) -> Result<()> {
        let mut expected = 0;
        for i in 0..self.visible.len() {
            let long = FullIndex(i);
            let visible = predicate(long);
            if visible != self.visible[i] {
                return Err(CompactionError::Inconsistent {
                    reason: format!("stale visibility for node {long}"),
                });
            }
            if !visible {
                continue;
            }
            let short = self.short_index(long)?;
            if short.0 != expected {
                return Err(CompactionError::Inconsistent {
                    reason: format!("node {long} maps to {short}, expected {expected}"),
                });
            }
            if self.long_index(short)? != long {
                return Err(CompactionError::Inconsistent {
                    reason: format!("short {short} does not map back to {long}"),
                });
            }
            expected += 1;
        }

        if expected != self.short_size() {
            return Err(CompactionError::Inconsistent {
                reason: format!("{expected} visible nodes but size is {}", self.short_size()),
            });
        }
        Ok(())
    }

    fn check_long(&self, long: FullIndex) -> Result<()> {
        if long.0 >= self.visible.len() {
            return Err(CompactionError::OutOfRange {
                space: IndexSpace::Full,
                index: long.0,
                bound: self.visible.len(),
            });
        }
        Ok(())
    }

    fn sum_before_block(&self, block: usize) -> usize {
        if block == 0 { 0 } else { self.block_sums[block - 1] }
    }

    fn count_before(&self, long: usize) -> ShortIndex {
        let block = long / self.block_size;
        let block_start = block * self.block_size;
        let in_block = self.visible[block_start..long].iter().filter(|&&v| v).count();
        ShortIndex(self.sum_before_block(block) + in_block)
    }
}
