//! Tuning knobs for the compaction map

use serde::{Deserialize, Serialize};

use crate::error::{CompactionError, Result};

/// Number of full indices covered by one cumulative-count block.
pub const DEFAULT_BLOCK_SIZE: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    pub block_size: usize,
}

impl CompactionConfig {
    pub fn with_block_size(block_size: usize) -> Result<Self> {
        let config = CompactionConfig { block_size };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(CompactionError::InvalidBlockSize);
        }
        Ok(())
    }

    /// Parse a config from TOML text, e.g. `block_size = 64`.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: CompactionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for CompactionConfig {
    fn default() -> Self {
        CompactionConfig {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}
