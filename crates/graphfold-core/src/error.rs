//! Contract violations raised by the compaction layer

use crate::model::{FullIndex, IndexSpace};

/// Every variant is a programming error in the owning system, not a recoverable
/// runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompactionError {
    #[error("{space} index {index} out of range (bound {bound})")]
    OutOfRange {
        space: IndexSpace,
        index: usize,
        bound: usize,
    },

    #[error("node {0} is not visible")]
    InvisibleIndexQueried(FullIndex),

    #[error("invalid update range [{start}, {end}] for {nodes} nodes")]
    InvalidUpdateRange {
        start: usize,
        end: usize,
        nodes: usize,
    },

    #[error("no visible node at or after head node {head}")]
    HeadNodeUnavailable { head: FullIndex },

    #[error("block size must be positive")]
    InvalidBlockSize,

    #[error("compaction is inconsistent: {reason}")]
    Inconsistent { reason: String },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T> = std::result::Result<T, CompactionError>;
