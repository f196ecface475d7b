//! Structured log events for reconciliation and lifecycle operations.
//!
//! Each function emits a `tracing` event with structured fields.

use cartsync_core::models::PassStats;

pub fn pass_started(generation: u64, cells: usize, role: &str) {
    tracing::debug!(
        event = "pass_started",
        generation,
        cells,
        role = %role,
        "reconciliation pass started"
    );
}

pub fn pass_committed(stats: &PassStats) {
    tracing::info!(
        event = "pass_committed",
        generation = stats.generation,
        cells_attempted = stats.cells_attempted,
        cells_failed = stats.cells_failed,
        records_skipped = stats.records_skipped,
        duplicates_discarded = stats.duplicates_discarded,
        hidden = stats.hidden,
        views = stats.views_accepted,
        "reconciliation pass committed"
    );
}

/// A pass finished after a newer pass had already committed.
pub fn pass_discarded(generation: u64, newer: u64) {
    tracing::info!(
        event = "pass_discarded",
        generation,
        newer_committed = newer,
        "stale reconciliation pass discarded"
    );
}

pub fn pass_failed(generation: u64, error: &str) {
    tracing::error!(
        event = "pass_failed",
        generation,
        error = %error,
        "reconciliation pass failed"
    );
}

pub fn cell_fetch_failed(group_id: &str, cell: &str, error: &str) {
    tracing::warn!(
        event = "cell_fetch_failed",
        group_id = %group_id,
        cell = %cell,
        error = %error,
        "cell fetch failed, continuing with remaining cells"
    );
}

pub fn record_skipped(cell: &str, error: &str) {
    tracing::debug!(
        event = "record_skipped",
        cell = %cell,
        error = %error,
        "undecodable record skipped"
    );
}

pub fn registry_replaced(previous: usize, current: usize) {
    tracing::info!(
        event = "registry_replaced",
        previous,
        current,
        "cell registry replaced from enumeration"
    );
}

pub fn cell_registered(group_id: &str, cell: &str, replaced: bool) {
    tracing::info!(
        event = "cell_registered",
        group_id = %group_id,
        cell = %cell,
        replaced,
        "cell registered"
    );
}

pub fn cart_created(group_id: &str, cell: &str) {
    tracing::info!(
        event = "cart_created",
        group_id = %group_id,
        cell = %cell,
        "cart created"
    );
}

pub fn cart_creation_failed(stage: &str, error: &str) {
    tracing::error!(
        event = "cart_creation_failed",
        stage = %stage,
        error = %error,
        "cart creation failed"
    );
}

pub fn role_changed(from: &str, to: &str) {
    tracing::info!(
        event = "role_changed",
        from = %from,
        to = %to,
        "viewer role changed"
    );
}
