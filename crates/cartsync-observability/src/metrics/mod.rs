//! Counters aggregated across reconciliation passes and cart creations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cartsync_core::models::PassStats;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileMetrics {
    pub passes_committed: u64,
    pub passes_discarded: u64,
    pub passes_failed: u64,
    pub cells_attempted: u64,
    pub cells_failed: u64,
    pub records_skipped: u64,
    pub duplicates_discarded: u64,
    pub carts_created: u64,
    pub creation_failures: u64,
    pub last_commit: Option<DateTime<Utc>>,
    pub last_stats: Option<PassStats>,
}

impl ReconcileMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pass that reached the commit step.
    pub fn record_pass(&mut self, stats: &PassStats, committed: bool) {
        self.cells_attempted += stats.cells_attempted as u64;
        self.cells_failed += stats.cells_failed as u64;
        self.records_skipped += stats.records_skipped as u64;
        self.duplicates_discarded += stats.duplicates_discarded as u64;
        if committed {
            self.passes_committed += 1;
            self.last_commit = Some(Utc::now());
            self.last_stats = Some(*stats);
        } else {
            self.passes_discarded += 1;
        }
    }

    /// Record a pass that failed before any cell was attempted.
    pub fn record_failure(&mut self) {
        self.passes_failed += 1;
    }

    pub fn record_creation(&mut self, succeeded: bool) {
        if succeeded {
            self.carts_created += 1;
        } else {
            self.creation_failures += 1;
        }
    }

    /// Fraction of attempted cells that failed (0.0–1.0).
    pub fn cell_failure_rate(&self) -> f64 {
        if self.cells_attempted == 0 {
            return 0.0;
        }
        self.cells_failed as f64 / self.cells_attempted as f64
    }
}
