use serde::{Deserialize, Serialize};

/// Counters collected over one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Generation the pass ran under.
    pub generation: u64,
    pub cells_attempted: usize,
    pub cells_failed: usize,
    /// Records that failed to decode and were skipped.
    pub records_skipped: usize,
    /// Carts discarded because their identity key was already seen.
    pub duplicates_discarded: usize,
    /// Carts removed by the visibility filter.
    pub hidden: usize,
    pub views_accepted: usize,
}
