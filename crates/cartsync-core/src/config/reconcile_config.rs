use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Reconciliation pass tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    /// Maximum cells fetched at once. Results are always consumed in registry
    /// order, so this never changes which duplicate wins. Default: 1.
    pub fetch_concurrency: usize,
    /// Per-cell fetch budget in milliseconds. `None` waits indefinitely.
    pub fetch_timeout_ms: Option<u64>,
    /// Drop a pass's commit when a newer pass already committed. Default: true.
    pub discard_stale_passes: bool,
}

impl ReconcileConfig {
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            fetch_concurrency: defaults::DEFAULT_FETCH_CONCURRENCY,
            fetch_timeout_ms: None,
            discard_stale_passes: defaults::DEFAULT_DISCARD_STALE_PASSES,
        }
    }
}
