use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for a metadata band group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// Deepest value tree the add operations accept. The root value is depth 1.
    pub max_nesting_depth: usize,
    /// Re-walk the removed region on undo and check it against the band ends.
    pub verify_undo: bool,
    /// Emit one debug event per band written by `pack`.
    pub log_bands: bool,
}

impl MetadataConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(
            max_nesting_depth = config.max_nesting_depth,
            verify_undo = config.verify_undo,
            log_bands = config.log_bands,
            "Loaded metadata config"
        );
        Ok(config)
    }

    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    pub fn with_verify_undo(mut self, verify: bool) -> Self {
        self.verify_undo = verify;
        self
    }

    pub fn with_log_bands(mut self, log: bool) -> Self {
        self.log_bands = log;
        self
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
            verify_undo: true,
            log_bands: true,
        }
    }
}
